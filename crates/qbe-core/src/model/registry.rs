use crate::model::entity::EntityModel;
use std::collections::BTreeMap;

///
/// MetadataProvider
///
/// Capability interface over entity metadata. Implementations hand out
/// static models so that each type is described once and shared for the
/// lifetime of the process.
///

pub trait MetadataProvider {
    /// Resolve the model for an entity (or embeddable) by name.
    fn model(&self, entity: &str) -> Option<&'static EntityModel>;
}

///
/// ModelRegistry
///
/// Name-indexed set of static entity models.
///

#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: BTreeMap<&'static str, &'static EntityModel>,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model; a later registration under the same name wins.
    #[must_use]
    pub fn with(mut self, model: &'static EntityModel) -> Self {
        self.register(model);
        self
    }

    pub fn register(&mut self, model: &'static EntityModel) {
        self.models.insert(model.entity_name, model);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl MetadataProvider for ModelRegistry {
    fn model(&self, entity: &str) -> Option<&'static EntityModel> {
        self.models.get(entity).copied()
    }
}
