//! Resolution of hand-written fragments against an example.
//!
//! Three passes share one [`VisitorContext`]:
//!
//! 1. `extract` pairs every placeholder with the path it is compared to and
//!    schedules comparisons whose example value is absent for disposal;
//! 2. `rewrite` rebuilds the tree, replacing disposed comparisons with the
//!    neutral constant of their enclosing combinator and retyping example
//!    placeholders;
//! 3. `bind` binds placeholder values and records the consumed paths.
//!
//! Nodes are identified by their pre-order index in the caller's tree.
mod bind;
mod extract;
mod rewrite;


use crate::{
    db::filter::Filter,
    expr::{Bindings, Expr, FieldPath, Param, PredicateError},
    value::Value,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

// ============================================================================
// Resolution
// ============================================================================

///
/// Resolution
/// Output of resolving a fragment: the rewritten predicate, its placeholder
/// values, and the example paths it consumed.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Resolution {
    pub predicate: Option<Expr>,
    pub bindings: Bindings,
    pub customized: BTreeSet<String>,
}

/// Resolve the filter's custom fragment against its example.
///
/// A filter without a fragment resolves to no predicate and no consumed paths.
pub fn resolve(filter: &Filter) -> Result<Resolution, PredicateError> {
    let Some(fragment) = filter.fragment() else {
        return Ok(Resolution::default());
    };

    let mut ctx = VisitorContext::new(filter);
    extract::extract(&mut ctx, fragment)?;
    let rewritten = rewrite::rewrite(&mut ctx, fragment)?;
    let bindings = bind::bind(&mut ctx, &rewritten)?;

    Ok(Resolution {
        predicate: Some(rewritten),
        bindings,
        customized: ctx.customized,
    })
}

// ============================================================================
// Pairing
// ============================================================================

///
/// Pairing
/// A placeholder together with the path it is compared against.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pairing {
    pub path: FieldPath,
    pub param: Param,
}

// Half-built pairing: whichever side arrives first waits for the other.
#[derive(Debug, Default)]
struct PendingPair {
    path: Option<FieldPath>,
    param: Option<Param>,
}

// ============================================================================
// VisitorContext
// ============================================================================

///
/// VisitorContext
///
/// State threaded through the three passes of one resolution run.
///

pub struct VisitorContext<'a> {
    filter: &'a Filter,
    pairs: BTreeMap<String, Pairing>,
    pending: PendingPair,
    customized: BTreeSet<String>,
    disposed: BTreeSet<usize>,
    owner: Option<usize>,
    neutral: bool,
}

impl<'a> VisitorContext<'a> {
    #[must_use]
    pub fn new(filter: &'a Filter) -> Self {
        Self {
            filter,
            pairs: BTreeMap::new(),
            pending: PendingPair::default(),
            customized: BTreeSet::new(),
            disposed: BTreeSet::new(),
            owner: None,
            // the query root behaves like an enclosing AND
            neutral: true,
        }
    }

    #[must_use]
    pub const fn filter(&self) -> &'a Filter {
        self.filter
    }

    // ------------------------------------------------------------------
    // Pairing
    // ------------------------------------------------------------------

    /// Offer a path to the pairing slot; returns the pairing it completed.
    pub fn set_path(&mut self, path: &FieldPath) -> Option<Pairing> {
        self.pending.path = Some(path.clone());
        self.commit_pending()
    }

    /// Offer a placeholder to the pairing slot; returns the pairing it completed.
    pub fn set_param(&mut self, param: &Param) -> Option<Pairing> {
        self.pending.param = Some(param.clone());
        self.commit_pending()
    }

    fn commit_pending(&mut self) -> Option<Pairing> {
        if self.pending.path.is_none() || self.pending.param.is_none() {
            return None;
        }

        let pending = std::mem::take(&mut self.pending);
        let (Some(path), Some(param)) = (pending.path, pending.param) else {
            return None;
        };
        let pairing = Pairing { path, param };
        self.pairs
            .insert(pairing.param.name().to_string(), pairing.clone());

        Some(pairing)
    }

    // Drop a half-built pairing at a comparison boundary; returns any
    // placeholder left without a path.
    fn reset_pending(&mut self) -> Option<Param> {
        std::mem::take(&mut self.pending).param
    }

    /// Path paired with `param`, if any.
    #[must_use]
    pub fn path_of(&self, param: &Param) -> Option<&FieldPath> {
        self.pairs.get(param.name()).map(|pairing| &pairing.path)
    }

    /// Swap the placeholder of an existing pairing for its retyped twin.
    pub fn replace(&mut self, param: &Param) {
        if let Some(pairing) = self.pairs.get_mut(param.name()) {
            pairing.param = param.clone();
        }
    }

    /// Example value behind a placeholder's paired path.
    ///
    /// Unpaired placeholders and filters without an example read as `Null`.
    pub fn example_value(&self, param: &Param) -> Result<Value, PredicateError> {
        let (Some(path), Some(example)) = (self.path_of(param), self.filter.example_ref()) else {
            return Ok(Value::Null);
        };

        example
            .value_at(path.as_str())
            .map_err(|err| PredicateError::UnknownPath {
                entity: example.entity_name(),
                path: path.to_string(),
                reason: err.message,
            })
    }

    // ------------------------------------------------------------------
    // Disposal
    // ------------------------------------------------------------------

    /// Schedule the current owning comparison for disposal.
    pub fn dispose_owner(&mut self) {
        if let Some(owner) = self.owner {
            trace!(node = owner, "scheduling comparison for disposal");
            self.disposed.insert(owner);
        }
    }

    #[must_use]
    pub fn is_disposed(&self, node: usize) -> bool {
        self.disposed.contains(&node)
    }

    // ------------------------------------------------------------------
    // Consumed paths
    // ------------------------------------------------------------------

    pub fn mark_customized(&mut self, path: &FieldPath) {
        self.customized.insert(path.to_string());
    }

    #[must_use]
    pub const fn customized(&self) -> &BTreeSet<String> {
        &self.customized
    }

    /// Constant a disposed node is replaced with at the current position.
    #[must_use]
    pub const fn neutral(&self) -> Expr {
        Expr::constant(self.neutral)
    }
}
