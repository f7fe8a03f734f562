//! In-memory reference engine.
//!
//! `MemoryStore` keeps linked entity graphs per entity type; predicates are
//! evaluated against those graphs, so association paths behave like joins.
//! `MemorySession` hands out tracked copies through an identity map.
mod session;


pub use session::MemorySession;

use crate::{
    error::InternalError,
    model::{MetadataProvider, ModelRegistry},
    value::{EntityRef, Key},
};
use std::collections::BTreeMap;

///
/// MemoryStore
///

#[derive(Debug, Default)]
pub struct MemoryStore {
    models: ModelRegistry,
    rows: BTreeMap<&'static str, BTreeMap<Key, EntityRef>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(models: ModelRegistry) -> Self {
        Self {
            models,
            rows: BTreeMap::new(),
        }
    }

    /// Store a row under its key; a row with the same key is replaced.
    pub fn insert(&mut self, entity: EntityRef) -> Result<(), InternalError> {
        let name = entity.entity_name();
        if self.models.model(name).is_none() {
            return Err(InternalError::store_not_found(name));
        }
        let key = entity.key().ok_or_else(|| {
            InternalError::store_invariant(format!("cannot store '{name}' without a key"))
        })?;

        self.rows.entry(name).or_default().insert(key, entity);

        Ok(())
    }

    pub fn insert_all(
        &mut self,
        entities: impl IntoIterator<Item = EntityRef>,
    ) -> Result<(), InternalError> {
        for entity in entities {
            self.insert(entity)?;
        }

        Ok(())
    }

    /// Stored rows of one entity, in key order.
    pub fn rows(&self, entity: &str) -> impl Iterator<Item = &EntityRef> {
        self.rows.get(entity).into_iter().flat_map(BTreeMap::values)
    }

    #[must_use]
    pub fn len(&self, entity: &str) -> usize {
        self.rows.get(entity).map_or(0, BTreeMap::len)
    }

    #[must_use]
    pub const fn models(&self) -> &ModelRegistry {
        &self.models
    }

    /// Open a request-scoped session over this store.
    #[must_use]
    pub fn session(&self) -> MemorySession<'_> {
        MemorySession::new(self)
    }
}
