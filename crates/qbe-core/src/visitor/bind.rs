use crate::{
    expr::{Bindings, Expr, ParamSource, PredicateError},
    visitor::VisitorContext,
};

/// Third pass: bind placeholder values and record the example paths the
/// fragment consumed. A placeholder used more than once is bound once.
pub(super) fn bind(ctx: &mut VisitorContext<'_>, expr: &Expr) -> Result<Bindings, PredicateError> {
    let mut bindings = Bindings::new();
    visit(ctx, expr, &mut bindings)?;

    Ok(bindings)
}

fn visit(
    ctx: &mut VisitorContext<'_>,
    expr: &Expr,
    bindings: &mut Bindings,
) -> Result<(), PredicateError> {
    let Expr::Param(param) = expr else {
        for child in expr.children() {
            visit(ctx, child, bindings)?;
        }
        return Ok(());
    };

    if bindings.contains_key(param.name()) {
        return Ok(());
    }

    match param.source() {
        ParamSource::Example => {
            if !param.is_retyped() {
                return Ok(());
            }
            let value = ctx.example_value(param)?;
            if value.is_null() {
                return Ok(());
            }
            if let Some(path) = ctx.path_of(param).cloned() {
                ctx.mark_customized(&path);
            }
            bindings.bind(param.name(), value)?;
        }
        ParamSource::Caller => {
            let value = ctx.filter().caller_bindings().resolve(param.name())?.clone();
            bindings.bind(param.name(), value)?;
        }
    }

    Ok(())
}
