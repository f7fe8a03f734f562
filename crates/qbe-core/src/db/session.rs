//! Module: db::session
//! Responsibility: the persistence surface the query layer drives.
//! Does not own: predicate construction (processor) or storage layout.
//! Boundary: implemented by engines; `MemorySession` is the reference one.

use crate::{
    db::filter::{Filter, OrderSpec},
    error::InternalError,
    expr::{Bindings, Expr, FieldPath},
    model::{EntityModel, MetadataProvider},
    value::{EntityRef, Value},
};
use derive_more::{Deref, IntoIterator};
use std::collections::BTreeMap;

///
/// Query
///
/// Executable request: a resolved predicate with its placeholder values
/// plus result shaping. Built by the context processor and the detached
/// fetch resolver.
///

#[derive(Clone, Debug)]
pub struct Query {
    pub entity: &'static EntityModel,
    pub predicate: Expr,
    pub bindings: Bindings,
    pub fetch_joins: Vec<FieldPath>,
    pub order: Vec<OrderSpec>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
    pub hints: BTreeMap<String, String>,
}

impl Query {
    /// Unrestricted query over `entity`.
    #[must_use]
    pub fn new(entity: &'static EntityModel) -> Self {
        Self {
            entity,
            predicate: Expr::True,
            bindings: Bindings::new(),
            fetch_joins: Vec::new(),
            order: Vec::new(),
            offset: None,
            limit: None,
            hints: BTreeMap::new(),
        }
    }

    /// Query carrying the filter's shaping with a resolved predicate.
    #[must_use]
    pub fn from_filter(filter: &Filter, predicate: Expr, bindings: Bindings) -> Self {
        Self {
            entity: filter.model(),
            predicate,
            bindings,
            fetch_joins: filter.fetch_joins().to_vec(),
            order: filter.order().to_vec(),
            offset: filter.offset(),
            limit: filter.limit(),
            hints: filter.hints().clone(),
        }
    }

    #[must_use]
    pub fn with_predicate(mut self, predicate: Expr) -> Self {
        self.predicate = predicate;
        self
    }

    #[must_use]
    pub fn with_fetch_join(mut self, path: FieldPath) -> Self {
        self.fetch_joins.push(path);
        self
    }
}

///
/// Tuple
/// One projected row, one value per requested column.
///

#[derive(Clone, Debug, Deref, Eq, IntoIterator, PartialEq)]
pub struct Tuple(Vec<Value>);

impl Tuple {
    #[must_use]
    pub const fn new(values: Vec<Value>) -> Self {
        Self(values)
    }
}

///
/// Session
///
/// Request-scoped persistence context. Instances it returns are tracked
/// (identity-managed) until detached.
///

pub trait Session {
    /// Entity metadata known to this session.
    fn metadata(&self) -> &dyn MetadataProvider;

    fn fetch(&mut self, query: &Query) -> Result<Vec<EntityRef>, InternalError>;

    fn fetch_tuples(
        &mut self,
        query: &Query,
        columns: &[FieldPath],
    ) -> Result<Vec<Tuple>, InternalError>;

    /// Number of matching rows; pagination and ordering are ignored.
    fn count(&mut self, query: &Query) -> Result<u64, InternalError>;

    /// Whether an instance holds its full state (lazy proxies do not).
    fn is_initialized(&self, entity: &EntityRef) -> bool {
        entity.is_loaded()
    }

    /// Stop tracking an instance; later writes no longer reach the store and
    /// lazy associations are no longer loaded through it.
    fn detach(&mut self, entity: &EntityRef);

    /// Reflective field write on a returned instance.
    fn write_field(
        &mut self,
        entity: &EntityRef,
        field: &str,
        value: Value,
    ) -> Result<(), InternalError>;
}
