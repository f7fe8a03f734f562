///
/// FieldModel
/// Runtime field metadata used by inspection and fetch resolution.
///

#[derive(Debug)]
pub struct FieldModel {
    /// Field name as used in paths and predicates.
    pub name: &'static str,
    /// Classification of the field.
    pub kind: FieldKind,
    /// Bookkeeping markers that exclude a field from example inspection.
    pub flags: FieldFlags,
}

impl FieldModel {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            flags: FieldFlags::NONE,
        }
    }

    #[must_use]
    pub const fn with_flags(mut self, flags: FieldFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Whether this field participates in example inspection at all.
    #[must_use]
    pub const fn is_inspectable(&self) -> bool {
        !self.flags.transient && !self.flags.is_static && !self.flags.synthetic
    }

    #[must_use]
    pub const fn is_relation(&self) -> bool {
        matches!(self.kind, FieldKind::Relation { .. })
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self.kind, FieldKind::Collection { .. })
    }

    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        matches!(self.kind, FieldKind::PrimaryKey(_))
    }

    #[must_use]
    pub const fn is_composite_key(&self) -> bool {
        matches!(self.kind, FieldKind::CompositeKey { .. })
    }
}

///
/// FieldFlags
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[allow(clippy::struct_excessive_bools)]
pub struct FieldFlags {
    /// Not mapped to storage.
    pub transient: bool,
    /// Type-level rather than instance-level state.
    pub is_static: bool,
    /// Synthetic bookkeeping (version counters, serialization ids).
    pub synthetic: bool,
}

impl FieldFlags {
    pub const NONE: Self = Self {
        transient: false,
        is_static: false,
        synthetic: false,
    };

    pub const TRANSIENT: Self = Self {
        transient: true,
        ..Self::NONE
    };

    pub const STATIC: Self = Self {
        is_static: true,
        ..Self::NONE
    };

    pub const SYNTHETIC: Self = Self {
        synthetic: true,
        ..Self::NONE
    };
}

///
/// FieldKind
///
/// Minimal classification surface needed by the example inspector and the
/// detached fetch resolver. Aligned with `Value` variants.
///

#[derive(Debug)]
pub enum FieldKind {
    Scalar(ScalarKind),

    /// Simple primary key of the owning entity.
    PrimaryKey(ScalarKind),

    /// Embedded key object; always inspected as part of the owning row.
    CompositeKey { embeddable: &'static str },

    /// Single-valued association to another entity.
    Relation { target: &'static str },

    /// Collection-valued association. `mapped_by` names the owning field on
    /// the element type.
    Collection {
        element: &'static str,
        kind: CollectionKind,
        mapped_by: Option<&'static str>,
        orphan_removal: bool,
    },
}

///
/// ScalarKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScalarKind {
    Bool,
    Int,
    Uint,
    Text,
    Ulid,
}

///
/// CollectionKind
/// Concrete collection shape declared on the owning type.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CollectionKind {
    /// Ordered, duplicates allowed.
    List,
    /// Unique elements.
    Set,
}
