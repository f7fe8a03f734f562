use crate::expr::Expr;

///
/// Normalize an expression without changing its meaning.
///
/// Rules:
/// - Nested AND / OR nodes are flattened
/// - Neutral elements are removed (`True` under AND, `False` under OR)
/// - Absorbing elements collapse the node (`False` under AND, `True` under OR)
/// - `NOT` over a constant folds; double negation is eliminated
///
/// Child order is preserved so that the normalized tree reads in the same
/// order the caller wrote it.
///
#[must_use]
pub fn normalize(expr: &Expr) -> Expr {
    match expr {
        Expr::And(children) => normalize_and(children),
        Expr::Or(children) => normalize_or(children),
        Expr::Not(inner) => normalize_not(inner),
        Expr::Logical(op, children) => Expr::Logical(*op, children.iter().map(normalize).collect()),
        other => other.clone(),
    }
}

fn normalize_not(inner: &Expr) -> Expr {
    match normalize(inner) {
        Expr::True => Expr::False,
        Expr::False => Expr::True,
        Expr::Not(double) => *double,
        other => Expr::Not(Box::new(other)),
    }
}

fn normalize_and(children: &[Expr]) -> Expr {
    let mut out = Vec::new();

    for child in children {
        match normalize(child) {
            Expr::True => {}
            Expr::False => return Expr::False,
            Expr::And(grandchildren) => out.extend(grandchildren),
            other => out.push(other),
        }
    }

    match out.len() {
        0 => Expr::True,
        1 => out.swap_remove(0),
        _ => Expr::And(out),
    }
}

fn normalize_or(children: &[Expr]) -> Expr {
    let mut out = Vec::new();

    for child in children {
        match normalize(child) {
            Expr::False => {}
            Expr::True => return Expr::True,
            Expr::Or(grandchildren) => out.extend(grandchildren),
            other => out.push(other),
        }
    }

    match out.len() {
        0 => Expr::False,
        1 => out.swap_remove(0),
        _ => Expr::Or(out),
    }
}
