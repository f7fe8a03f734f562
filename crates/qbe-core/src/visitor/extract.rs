use crate::{
    expr::{Expr, PredicateError},
    visitor::{Pairing, VisitorContext},
};

/// First pass: pair placeholders with paths and schedule comparisons whose
/// example value is absent.
pub(super) fn extract(ctx: &mut VisitorContext<'_>, expr: &Expr) -> Result<(), PredicateError> {
    let mut next_id = 0;

    visit(ctx, expr, &mut next_id)
}

fn visit(
    ctx: &mut VisitorContext<'_>,
    expr: &Expr,
    next_id: &mut usize,
) -> Result<(), PredicateError> {
    let id = *next_id;
    *next_id += 1;

    match expr {
        Expr::Compare(..) => {
            let saved = ctx.owner.replace(id);
            ctx.reset_pending();

            for child in expr.children() {
                visit(ctx, child, next_id)?;
            }

            let unpaired = ctx.reset_pending();
            ctx.owner = saved;

            if let Some(param) = unpaired
                && param.is_example()
                && ctx.path_of(&param).is_none()
            {
                return Err(PredicateError::UnpairedParam {
                    name: param.name().to_string(),
                });
            }
        }

        Expr::Path(path) => {
            if let Some(pairing) = ctx.set_path(path) {
                check_example_value(ctx, &pairing)?;
            }
        }

        Expr::Param(param) => {
            if let Some(pairing) = ctx.set_param(param) {
                check_example_value(ctx, &pairing)?;
            }
        }

        _ => {
            for child in expr.children() {
                visit(ctx, child, next_id)?;
            }
        }
    }

    Ok(())
}

// An example placeholder over an absent value disposes its comparison.
fn check_example_value(
    ctx: &mut VisitorContext<'_>,
    pairing: &Pairing,
) -> Result<(), PredicateError> {
    if pairing.param.is_example() && ctx.example_value(&pairing.param)?.is_null() {
        ctx.dispose_owner();
    }

    Ok(())
}
