//! Query-by-example for entity graphs: default predicates synthesized from
//! a filled example, hand-written fragments resolved against that example,
//! and batched loading of collections the main query cannot join.

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod expr;
pub mod inspect;
pub mod model;
pub mod synthesize;
pub mod value;
pub mod visitor;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Vocabulary needed to build filters and run them. Engines and the
/// resolution passes stay in their modules.
///

pub mod prelude {
    pub use crate::{
        config::QbeConfig,
        db::{Filter, OrderDirection, QbeRepository, QueryError, Session},
        expr::{Expr, FieldPath, Param, path},
        model::{EntityModel, FieldKind, FieldModel, MetadataProvider, ModelRegistry},
        value::{EntityRef, Value},
    };
}
