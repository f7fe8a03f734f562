//! Module: db::fetch
//! Responsibility: loading collection associations that the main query
//! cannot join, in bounded batches, and grafting them onto their owners.
//! Does not own: main-query execution or predicate resolution.
//! Boundary: runs after `find_all` with the primary results.

use crate::{
    db::{
        error::FetchError,
        filter::DetachedFetch,
        session::{Query, Session},
    },
    expr::{FieldPath, path},
    model::{CollectionKind, EntityModel, FieldKind, FieldModel, MetadataProvider},
    value::{EntityRef, Key, Value},
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

///
/// DetachedFetchTarget
///
/// A detached fetch path resolved against metadata: the collection field,
/// the type that owns it, its element type and the inverse field on the
/// element that points back at the owner.
///

#[derive(Clone, Debug)]
pub struct DetachedFetchTarget {
    pub path: FieldPath,
    pub owner: &'static EntityModel,
    pub field: &'static FieldModel,
    pub element: &'static EntityModel,
    pub inverse: &'static str,
    pub kind: CollectionKind,
    pub orphan_removal: bool,
}

impl DetachedFetchTarget {
    /// Resolve `path` from `base`. Every segment but the last must be a
    /// single-valued association; the last must be a collection mapped by
    /// an association on its element type.
    pub fn resolve(
        base: &'static EntityModel,
        path: &FieldPath,
        metadata: &dyn MetadataProvider,
    ) -> Result<Self, FetchError> {
        let mut owner = base;

        if let Some(parent) = path.parent() {
            for segment in parent.segments() {
                let field = owner.field(segment).ok_or_else(|| {
                    FetchError::discovery(owner.entity_name, segment, "no such field")
                })?;
                let FieldKind::Relation { target } = field.kind else {
                    return Err(FetchError::discovery(
                        owner.entity_name,
                        segment,
                        "intermediate segment is not a single-valued association",
                    ));
                };
                owner = metadata.model(target).ok_or_else(|| {
                    FetchError::discovery(
                        owner.entity_name,
                        segment,
                        format!("association target '{target}' has no model"),
                    )
                })?;
            }
        }

        let property = path.last();
        let field = owner
            .field(property)
            .ok_or_else(|| FetchError::discovery(owner.entity_name, property, "no such field"))?;
        let FieldKind::Collection {
            element,
            kind,
            mapped_by,
            orphan_removal,
        } = field.kind
        else {
            return Err(FetchError::discovery(
                owner.entity_name,
                property,
                "not a collection association",
            ));
        };

        let inverse = mapped_by.ok_or_else(|| {
            FetchError::discovery(
                owner.entity_name,
                property,
                "collection declares no inverse field",
            )
        })?;
        let element = metadata.model(element).ok_or_else(|| {
            FetchError::discovery(
                owner.entity_name,
                property,
                format!("element type '{element}' has no model"),
            )
        })?;
        if !element.field(inverse).is_some_and(FieldModel::is_relation) {
            return Err(FetchError::discovery(
                owner.entity_name,
                property,
                format!(
                    "inverse field '{inverse}' is not an association on '{}'",
                    element.entity_name
                ),
            ));
        }

        Ok(Self {
            path: path.clone(),
            owner,
            field,
            element,
            inverse,
            kind,
            orphan_removal,
        })
    }

    fn empty_collection(&self) -> Value {
        match self.kind {
            CollectionKind::List => Value::List(Vec::new()),
            CollectionKind::Set => Value::Set(Vec::new()),
        }
    }
}

///
/// DetachedFetchResolver
///

#[derive(Clone, Copy, Debug)]
pub struct DetachedFetchResolver {
    in_list_limit: usize,
}

impl DetachedFetchResolver {
    #[must_use]
    pub const fn new(in_list_limit: usize) -> Self {
        Self { in_list_limit }
    }

    /// Populate every target on the primary results, in declaration order.
    pub fn apply<S: Session + ?Sized>(
        &self,
        session: &mut S,
        base: &'static EntityModel,
        fetches: &[DetachedFetch],
        results: &[EntityRef],
    ) -> Result<(), FetchError> {
        for fetch in fetches {
            let target = DetachedFetchTarget::resolve(base, &fetch.path, session.metadata())?;
            self.apply_target(session, &target, results)?;
        }

        Ok(())
    }

    /// Load one collection for every driving owner and graft it.
    pub fn apply_target<S: Session + ?Sized>(
        &self,
        session: &mut S,
        target: &DetachedFetchTarget,
        results: &[EntityRef],
    ) -> Result<(), FetchError> {
        let owners = driving_owners(target, results);
        if owners.is_empty() {
            return Ok(());
        }

        // one representative per key, in key order
        let mut keyed: BTreeMap<Key, &EntityRef> = BTreeMap::new();
        for owner in &owners {
            if let Some(key) = owner.key() {
                keyed.entry(key).or_insert(owner);
            }
        }
        let keyed: Vec<_> = keyed.into_values().collect();

        let mut grouped: BTreeMap<Key, Value> = BTreeMap::new();
        let batch_size = self.in_list_limit.max(1);
        for (index, batch) in keyed.chunks(batch_size).enumerate() {
            debug!(
                path = target.path.as_str(),
                batch = index,
                owners = batch.len(),
                "executing detached fetch batch"
            );

            let in_list = batch.iter().map(|owner| Value::Entity((*owner).clone())).collect();
            let query = Query::new(target.element)
                .with_predicate(path(target.inverse).in_(in_list))
                .with_fetch_join(path(target.inverse));

            let elements = session.fetch(&query).map_err(|source| FetchError::Execute {
                property: target.path.to_string(),
                source,
            })?;

            for element in elements {
                let Some(owner_key) = element.value(target.inverse).as_key() else {
                    continue;
                };
                grouped
                    .entry(owner_key)
                    .or_insert_with(|| target.empty_collection())
                    .push_element(Value::Entity(element));
            }
        }

        for owner in &owners {
            let collection = owner
                .key()
                .and_then(|key| grouped.get(&key).cloned())
                .unwrap_or_else(|| target.empty_collection());

            if target.orphan_removal && owner.is_tracked() {
                debug!(
                    entity = owner.entity_name(),
                    field = target.field.name,
                    "detaching owner before replacing an orphan-removal collection"
                );
                session.detach(owner);
            }

            session
                .write_field(owner, target.field.name, collection)
                .map_err(|source| FetchError::Graft {
                    property: target.path.to_string(),
                    source,
                })?;
        }

        Ok(())
    }
}

// Objects that receive the collection: the results themselves, or the
// intermediate association they reach through the parent path. Distinct
// instances only, in first-seen order.
fn driving_owners(target: &DetachedFetchTarget, results: &[EntityRef]) -> Vec<EntityRef> {
    let parent = target.path.parent();
    let mut seen = BTreeSet::new();
    let mut owners: Vec<EntityRef> = Vec::new();

    for result in results {
        let owner = match &parent {
            None => Some(result.clone()),
            Some(parent) => match result.value_at(parent.as_str()) {
                Ok(Value::Entity(owner)) => Some(owner),
                _ => None,
            },
        };

        if let Some(owner) = owner
            && seen.insert(owner.addr())
        {
            owners.push(owner);
        }
    }

    owners
}
