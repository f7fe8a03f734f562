use crate::{
    expr::{Expr, NodeKind, PredicateError},
    visitor::VisitorContext,
};
use tracing::trace;

/// Second pass: rebuild the tree without disposed comparisons and with
/// example placeholders retyped to their runtime value types.
pub(super) fn rewrite(ctx: &mut VisitorContext<'_>, expr: &Expr) -> Result<Expr, PredicateError> {
    let mut next_id = 0;

    visit(ctx, expr, &mut next_id)
}

fn visit(
    ctx: &mut VisitorContext<'_>,
    expr: &Expr,
    next_id: &mut usize,
) -> Result<Expr, PredicateError> {
    let id = *next_id;

    if ctx.is_disposed(id) {
        // skip the numbering of the whole disposed subtree
        *next_id += expr.subtree_len();
        let neutral = ctx.neutral();
        trace!(node = id, replacement = ?neutral, "replacing disposed comparison");

        return Ok(neutral);
    }
    *next_id += 1;

    let saved = ctx.neutral;
    ctx.neutral = match expr.kind() {
        NodeKind::And => true,
        NodeKind::Or => false,
        // NOT flips whatever its enclosing combinator (or the root) expects
        NodeKind::Not => !saved,
        NodeKind::Other(op) => return Err(PredicateError::UnsupportedOperator { op }),
        _ => saved,
    };

    let rebuilt = match expr {
        Expr::Param(param) if param.is_example() => {
            let value = ctx.example_value(param)?;
            if value.is_null() {
                Expr::Param(param.clone())
            } else {
                let retyped = param.retyped(value.value_type());
                ctx.replace(&retyped);
                Expr::Param(retyped)
            }
        }
        _ => {
            let mut children = Vec::with_capacity(expr.children().len());
            for child in expr.children() {
                children.push(visit(ctx, child, next_id)?);
            }
            expr.rebuild(children)
        }
    };

    ctx.neutral = saved;

    Ok(rebuilt)
}
