//! Runtime metadata for entities reachable from an example.
//!
//! Types in `model` describe *what a row looks like*: the ordered field list of
//! each entity and how every field is classified (scalar, primary key,
//! composite key, relation, collection). Models are static data computed once
//! per type; the inspector, the synthesizer and the detached fetch resolver
//! read them through a [`MetadataProvider`].
pub mod entity;
pub mod field;
pub mod registry;

pub use entity::EntityModel;
pub use field::{CollectionKind, FieldFlags, FieldKind, FieldModel, ScalarKind};
pub use registry::{MetadataProvider, ModelRegistry};
