use crate::{
    config::QbeConfig,
    db::{
        error::QueryError,
        filter::Filter,
        processor::ContextProcessor,
        session::{Session, Tuple},
    },
    expr::FieldPath,
    value::EntityRef,
};

///
/// QbeRepository
///
/// Query-by-example facade over a session. Each call runs a fresh context
/// processor and writes the combined predicate back onto the filter.
///
/// The repository's `max_depth` applies to filters built with
/// `Filter::new` that never set their own depth. Page sizes are fixed when
/// the window is built, so filters that page by default size should come
/// from `Filter::with_config(model, repository.config())`.
///

pub struct QbeRepository<S: Session> {
    session: S,
    config: QbeConfig,
}

impl<S: Session> QbeRepository<S> {
    #[must_use]
    pub fn new(session: S) -> Self {
        Self::with_config(session, QbeConfig::default())
    }

    #[must_use]
    pub const fn with_config(session: S, config: QbeConfig) -> Self {
        Self { session, config }
    }

    #[must_use]
    pub const fn session(&self) -> &S {
        &self.session
    }

    pub const fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    #[must_use]
    pub const fn config(&self) -> &QbeConfig {
        &self.config
    }

    #[must_use]
    pub fn into_session(self) -> S {
        self.session
    }

    /// Entities matching the filter, detached collections included.
    pub fn find_all(&mut self, filter: &mut Filter) -> Result<Vec<EntityRef>, QueryError> {
        self.processor(filter).find_all()
    }

    /// Every projected row matching the filter.
    pub fn find_all_values(
        &mut self,
        filter: &mut Filter,
        columns: &[FieldPath],
    ) -> Result<Vec<Tuple>, QueryError> {
        self.processor(filter).find_tuples(columns)
    }

    /// First projected row matching the filter; the filter should narrow the
    /// result to one row.
    pub fn find_values(
        &mut self,
        filter: &mut Filter,
        columns: &[FieldPath],
    ) -> Result<Option<Tuple>, QueryError> {
        self.processor(filter).find_values(columns)
    }

    pub fn count(&mut self, filter: &mut Filter) -> Result<u64, QueryError> {
        self.processor(filter).count()
    }

    fn processor<'a>(&'a mut self, filter: &'a mut Filter) -> ContextProcessor<'a, S> {
        ContextProcessor::new(&mut self.session, filter, &self.config)
    }
}
