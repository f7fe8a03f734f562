use crate::{error::InternalError, expr::PredicateError};
use thiserror::Error as ThisError;

///
/// QueryError
///
/// Query-level boundary error. Every failure of a `find_*` / `count` call is
/// reported as exactly one of these, with the cause preserved.
///

#[derive(Debug, ThisError)]
pub enum QueryError {
    #[error("predicate processing failed: {0}")]
    Predicate(#[from] PredicateError),

    #[error("query execution failed: {0}")]
    Execute(#[from] InternalError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

///
/// FetchError
///
/// Failure of one detached fetch target. Fatal for that target; never retried.
///

#[derive(Debug, ThisError)]
pub enum FetchError {
    #[error("cannot resolve detached fetch '{property}' on '{owner}': {reason}")]
    MetadataDiscovery {
        owner: String,
        property: String,
        reason: String,
    },

    #[error("cannot graft collection '{property}': {source}")]
    Graft {
        property: String,
        source: InternalError,
    },

    #[error("detached fetch of '{property}' failed: {source}")]
    Execute {
        property: String,
        source: InternalError,
    },
}

impl FetchError {
    pub(crate) fn discovery(
        owner: &str,
        property: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::MetadataDiscovery {
            owner: owner.to_string(),
            property: property.to_string(),
            reason: reason.into(),
        }
    }
}
