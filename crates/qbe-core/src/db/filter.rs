//! Module: db::filter
//! Responsibility: per-query request state (example, custom fragment,
//! pagination, ordering, fetch plan, hints).
//! Does not own: predicate resolution or execution.
//! Boundary: built and mutated by callers, consumed by the context processor.

use crate::{
    config::{DEFAULT_MAX_DEPTH, QbeConfig},
    expr::{Bindings, Expr, FieldPath, PredicateError},
    model::EntityModel,
    value::{EntityRef, Value},
};
use std::collections::BTreeMap;

/// Page size used when a page is requested without a valid size.
pub const PAGE_SIZE: usize = 10;

/// First page; page indexes are 1-based.
pub const PAGE_INDEX: usize = 1;

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

///
/// OrderSpec
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderSpec {
    pub path: FieldPath,
    pub direction: OrderDirection,
}

///
/// DetachedFetch
/// Collection path loaded by a secondary query after the main one.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DetachedFetch {
    pub path: FieldPath,
}

///
/// Filter
///
/// Everything one query needs: the base entity, an optional example, an
/// optional hand-written fragment, and the result shaping. The combined
/// predicate of the latest run is kept for inspection and is replaced on
/// every run.
///

#[derive(Clone, Debug)]
pub struct Filter {
    model: &'static EntityModel,
    example: Option<EntityRef>,
    max_depth: Option<usize>,
    fragment: Option<Expr>,
    caller_bindings: Bindings,
    order: Vec<OrderSpec>,
    fetch_joins: Vec<FieldPath>,
    detached: Vec<DetachedFetch>,
    hints: BTreeMap<String, String>,
    page_size: usize,
    offset: Option<usize>,
    limit: Option<usize>,
    predicate: Option<Expr>,
    bindings: Bindings,
}

impl Filter {
    /// Filter with default page size. Without an explicit `max_depth` the
    /// depth limit is taken from the configuration of whoever runs it.
    #[must_use]
    pub fn new(model: &'static EntityModel) -> Self {
        let mut filter = Self::with_config(model, &QbeConfig::default());
        filter.max_depth = None;

        filter
    }

    /// Filter whose depth limit and default page size come from `config`.
    #[must_use]
    pub fn with_config(model: &'static EntityModel, config: &QbeConfig) -> Self {
        Self {
            model,
            example: None,
            max_depth: Some(config.max_depth),
            fragment: None,
            caller_bindings: Bindings::new(),
            order: Vec::new(),
            fetch_joins: Vec::new(),
            detached: Vec::new(),
            hints: BTreeMap::new(),
            page_size: config.page_size,
            offset: None,
            limit: None,
            predicate: None,
            bindings: Bindings::new(),
        }
    }

    // ------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------

    #[must_use]
    pub fn example(mut self, example: EntityRef) -> Self {
        self.example = Some(example);
        self
    }

    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Add a hand-written fragment; repeated calls are AND-ed.
    #[must_use]
    pub fn where_(mut self, fragment: Expr) -> Self {
        self.fragment = Some(match self.fragment.take() {
            Some(existing) => existing.and(fragment),
            None => fragment,
        });
        self
    }

    /// Bind a caller-named placeholder.
    pub fn bind(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, PredicateError> {
        self.caller_bindings.bind(name, value.into())?;
        Ok(self)
    }

    #[must_use]
    pub fn order_by(mut self, path: impl Into<FieldPath>, direction: OrderDirection) -> Self {
        self.order.push(OrderSpec {
            path: path.into(),
            direction,
        });
        self
    }

    /// Load an association in the main query.
    #[must_use]
    pub fn fetch_join(mut self, path: impl Into<FieldPath>) -> Self {
        self.fetch_joins.push(path.into());
        self
    }

    /// Load a collection with a secondary, batched query.
    #[must_use]
    pub fn detached_fetch(mut self, path: impl Into<FieldPath>) -> Self {
        self.detached.push(DetachedFetch { path: path.into() });
        self
    }

    #[must_use]
    pub fn hint(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.hints.insert(key.into(), value.into());
        self
    }

    /// Page-based window; `0` for either argument selects the default.
    ///
    /// `offset = (index - 1) * size` (saturating), `limit = size`.
    #[must_use]
    pub const fn fetch_page(mut self, size: usize, index: usize) -> Self {
        let size = if size == 0 { self.page_size } else { size };
        let index = if index == 0 { PAGE_INDEX } else { index };

        self.offset = Some((index - 1).saturating_mul(size));
        self.limit = Some(size);
        self
    }

    /// Row-based window. Without a limit no window is applied; a missing
    /// offset starts at the first row.
    #[must_use]
    pub const fn fetch_range(mut self, offset: Option<usize>, limit: Option<usize>) -> Self {
        match limit {
            Some(limit) => {
                self.offset = Some(match offset {
                    Some(offset) => offset,
                    None => 0,
                });
                self.limit = Some(limit);
            }
            None => {
                self.offset = None;
                self.limit = None;
            }
        }
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn model(&self) -> &'static EntityModel {
        self.model
    }

    #[must_use]
    pub const fn example_ref(&self) -> Option<&EntityRef> {
        self.example.as_ref()
    }

    /// Depth limit for example inspection, `DEFAULT_MAX_DEPTH` when unset.
    #[must_use]
    pub const fn depth_limit(&self) -> usize {
        match self.max_depth {
            Some(max_depth) => max_depth,
            None => DEFAULT_MAX_DEPTH,
        }
    }

    /// Depth limit set on this filter, if any.
    #[must_use]
    pub const fn depth_override(&self) -> Option<usize> {
        self.max_depth
    }

    #[must_use]
    pub const fn fragment(&self) -> Option<&Expr> {
        self.fragment.as_ref()
    }

    #[must_use]
    pub const fn caller_bindings(&self) -> &Bindings {
        &self.caller_bindings
    }

    #[must_use]
    pub fn order(&self) -> &[OrderSpec] {
        &self.order
    }

    #[must_use]
    pub fn fetch_joins(&self) -> &[FieldPath] {
        &self.fetch_joins
    }

    #[must_use]
    pub fn detached_fetches(&self) -> &[DetachedFetch] {
        &self.detached
    }

    #[must_use]
    pub const fn hints(&self) -> &BTreeMap<String, String> {
        &self.hints
    }

    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        self.offset
    }

    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Combined predicate of the latest run.
    #[must_use]
    pub const fn predicate(&self) -> Option<&Expr> {
        self.predicate.as_ref()
    }

    /// Placeholder values of the latest run.
    #[must_use]
    pub const fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub(crate) fn set_resolved(&mut self, predicate: Expr, bindings: Bindings) {
        self.predicate = Some(predicate);
        self.bindings = bindings;
    }
}
