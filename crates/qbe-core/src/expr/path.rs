use crate::{
    expr::{CompareOp, Expr},
    value::Value,
};
use derive_more::Display;

///
/// FieldPath
///
/// Dot-separated navigation path relative to the query's base entity
/// (`nome`, `uf.id`, `id.projeto_id`).
///

#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
pub struct FieldPath(String);

/// Shorthand for [`FieldPath::new`].
#[must_use]
pub fn path(path: impl Into<String>) -> FieldPath {
    FieldPath::new(path)
}

impl FieldPath {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Append one segment.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        Self(format!("{}.{segment}", self.0))
    }

    /// Path without its last segment; `None` for single-segment paths.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0
            .rsplit_once('.')
            .map(|(parent, _)| Self(parent.to_string()))
    }

    #[must_use]
    pub fn last(&self) -> &str {
        self.0.rsplit_once('.').map_or(self.0.as_str(), |(_, last)| last)
    }

    // ------------------------------------------------------------------
    // Comparison builders
    // ------------------------------------------------------------------

    fn compare(self, op: CompareOp, operand: impl Into<Expr>) -> Expr {
        Expr::Compare(op, vec![Expr::Path(self), operand.into()])
    }

    #[must_use]
    pub fn eq(self, operand: impl Into<Expr>) -> Expr {
        self.compare(CompareOp::Eq, operand)
    }

    #[must_use]
    pub fn ne(self, operand: impl Into<Expr>) -> Expr {
        self.compare(CompareOp::Ne, operand)
    }

    #[must_use]
    pub fn lt(self, operand: impl Into<Expr>) -> Expr {
        self.compare(CompareOp::Lt, operand)
    }

    #[must_use]
    pub fn lte(self, operand: impl Into<Expr>) -> Expr {
        self.compare(CompareOp::Lte, operand)
    }

    #[must_use]
    pub fn gt(self, operand: impl Into<Expr>) -> Expr {
        self.compare(CompareOp::Gt, operand)
    }

    #[must_use]
    pub fn gte(self, operand: impl Into<Expr>) -> Expr {
        self.compare(CompareOp::Gte, operand)
    }

    /// Case-sensitive substring match.
    #[must_use]
    pub fn contains(self, operand: impl Into<Expr>) -> Expr {
        self.compare(CompareOp::Contains, operand)
    }

    #[must_use]
    pub fn starts_with(self, operand: impl Into<Expr>) -> Expr {
        self.compare(CompareOp::StartsWith, operand)
    }

    #[must_use]
    pub fn ends_with(self, operand: impl Into<Expr>) -> Expr {
        self.compare(CompareOp::EndsWith, operand)
    }

    #[must_use]
    pub fn in_(self, values: Vec<Value>) -> Expr {
        self.compare(CompareOp::In, Value::List(values))
    }

    #[must_use]
    pub fn not_in(self, values: Vec<Value>) -> Expr {
        self.compare(CompareOp::NotIn, Value::List(values))
    }

    #[must_use]
    pub fn is_null(self) -> Expr {
        Expr::Compare(CompareOp::IsNull, vec![Expr::Path(self)])
    }

    #[must_use]
    pub fn is_not_null(self) -> Expr {
        Expr::Compare(CompareOp::IsNotNull, vec![Expr::Path(self)])
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}
