//! Module: db::processor
//! Responsibility: turning a filter into an executable query and running it.
//! Does not own: tree resolution (`visitor`) or default predicates
//! (`synthesize`); it sequences them.
//! Boundary: one processor per call; wraps every construction failure in
//! `QueryError::Predicate`.

use crate::{
    config::QbeConfig,
    db::{
        error::QueryError,
        fetch::DetachedFetchResolver,
        filter::Filter,
        session::{Query, Session, Tuple},
    },
    expr::{Expr, FieldPath, normalize},
    inspect::ExampleInspector,
    synthesize::synthesize,
    value::EntityRef,
    visitor::resolve,
};
use tracing::debug;

///
/// ContextProcessor
///

pub struct ContextProcessor<'a, S: Session + ?Sized> {
    session: &'a mut S,
    filter: &'a mut Filter,
    config: &'a QbeConfig,
}

impl<'a, S: Session + ?Sized> ContextProcessor<'a, S> {
    pub const fn new(session: &'a mut S, filter: &'a mut Filter, config: &'a QbeConfig) -> Self {
        Self {
            session,
            filter,
            config,
        }
    }

    /// Entities matching the filter, with detached collections populated.
    pub fn find_all(mut self) -> Result<Vec<EntityRef>, QueryError> {
        let query = self.prepare()?;
        let results = self.session.fetch(&query)?;
        debug!(
            entity = query.entity.entity_name,
            rows = results.len(),
            "query executed"
        );

        DetachedFetchResolver::new(self.config.in_list_limit).apply(
            &mut *self.session,
            self.filter.model(),
            self.filter.detached_fetches(),
            &results,
        )?;

        Ok(results)
    }

    /// Projected rows matching the filter.
    pub fn find_tuples(mut self, columns: &[FieldPath]) -> Result<Vec<Tuple>, QueryError> {
        let query = self.prepare()?;

        Ok(self.session.fetch_tuples(&query, columns)?)
    }

    /// First projected row, if any.
    pub fn find_values(self, columns: &[FieldPath]) -> Result<Option<Tuple>, QueryError> {
        Ok(self.find_tuples(columns)?.into_iter().next())
    }

    pub fn count(mut self) -> Result<u64, QueryError> {
        let query = self.prepare()?;

        Ok(self.session.count(&query)?)
    }

    /// Resolve the custom fragment, synthesize defaults for the example,
    /// store the combined predicate on the filter (replacing the previous
    /// one) and build the query.
    pub fn prepare(&mut self) -> Result<Query, QueryError> {
        let filter = &*self.filter;
        let resolution = resolve(filter)?;

        let defaults = match filter.example_ref() {
            Some(example) => {
                let max_depth = filter.depth_override().unwrap_or(self.config.max_depth);
                let inspection = ExampleInspector::new(max_depth)
                    .extract_filled(example, |entity| self.session.is_initialized(entity));
                synthesize(inspection.properties(), &resolution.customized)
            }
            None => Expr::True,
        };

        let predicate = normalize(&Expr::all(resolution.predicate.into_iter().chain([defaults])));
        debug!(
            entity = filter.model().entity_name,
            predicate = ?predicate,
            "predicate resolved"
        );

        let query = Query::from_filter(filter, predicate, resolution.bindings);
        self.filter
            .set_resolved(query.predicate.clone(), query.bindings.clone());

        Ok(query)
    }
}
