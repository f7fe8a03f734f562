use crate::{
    expr::{Bindings, CompareOp, Expr, NodeKind, Param, PredicateError, eval, normalize, path},
    test_support::models::{CIDADE, UF},
    value::{EntityRef, Value},
};

fn cidade(nome: &str, uf_id: u64) -> EntityRef {
    let uf = EntityRef::new(&UF).with("id", uf_id).with("sigla", "PE");

    EntityRef::new(&CIDADE)
        .with("id", 1u64)
        .with("nome", nome)
        .with("uf", uf)
}

fn matches(row: &EntityRef, expr: &Expr) -> bool {
    eval(row, expr, &Bindings::new()).expect("expression should evaluate")
}

// ---- tree surface ----------------------------------------------------

#[test]
fn subtree_len_counts_every_node() {
    let expr = path("nome").eq("Recife").and(path("uf.id").eq(7u64).not());

    // and(eq(path, value), not(eq(path, value)))
    assert_eq!(expr.subtree_len(), 8);
    assert_eq!(expr.children().len(), 2);
    assert_eq!(expr.kind(), NodeKind::And);
}

#[test]
fn rebuild_keeps_kind_and_replaces_children() {
    let expr = path("nome").eq("Recife").or(path("nome").eq("Olinda"));
    let rebuilt = expr.rebuild(vec![Expr::True, Expr::False]);

    assert_eq!(rebuilt, Expr::Or(vec![Expr::True, Expr::False]));

    let negated = Expr::True.not();
    assert_eq!(negated.rebuild(vec![Expr::False]), Expr::False.not());
}

#[test]
fn comparison_nodes_classify_their_operator() {
    let expr = path("nome").contains("Mar");

    assert_eq!(expr.kind(), NodeKind::Comparison(CompareOp::Contains));
    assert_eq!(expr.children()[0].kind(), NodeKind::Path);
    assert_eq!(expr.children()[1].kind(), NodeKind::Literal);
    assert_eq!(Expr::from(Param::example()).kind(), NodeKind::Placeholder);
}

// ---- normalize -------------------------------------------------------

#[test]
fn normalize_folds_neutral_elements_without_reordering() {
    let b = path("b").eq(2u64);
    let a = path("a").eq(1u64);
    let expr = Expr::And(vec![b.clone(), Expr::True, Expr::And(vec![a.clone()])]);

    assert_eq!(normalize(&expr), Expr::And(vec![b, a]));
}

#[test]
fn normalize_collapses_absorbing_elements() {
    let a = path("a").eq(1u64);

    assert_eq!(normalize(&a.clone().and(Expr::False)), Expr::False);
    assert_eq!(normalize(&a.clone().or(Expr::True)), Expr::True);
    assert_eq!(normalize(&a.clone().or(Expr::False)), a);
}

#[test]
fn normalize_folds_negated_constants() {
    assert_eq!(normalize(&Expr::False.not()), Expr::True);
    assert_eq!(normalize(&Expr::True.not()), Expr::False);

    let a = path("a").eq(1u64);
    assert_eq!(normalize(&a.clone().not().not()), a);
}

// ---- eval ------------------------------------------------------------

#[test]
fn eval_navigates_paths_through_associations() {
    let row = cidade("Recife", 7);

    assert!(matches(&row, &path("uf.id").eq(7u64)));
    assert!(matches(&row, &path("uf.sigla").eq("PE")));
    assert!(!matches(&row, &path("uf.id").eq(8u64)));
}

#[test]
fn eval_text_contains_is_case_sensitive() {
    let row = cidade("Maranguape", 7);

    assert!(matches(&row, &path("nome").contains("Mar")));
    assert!(!matches(&row, &path("nome").contains("mar")));
    assert!(matches(&row, &path("nome").starts_with("Mara")));
    assert!(matches(&row, &path("nome").ends_with("pe")));
}

#[test]
fn eval_null_comparisons_never_match() {
    let row = EntityRef::new(&CIDADE).with("id", 1u64);

    assert!(!matches(&row, &path("nome").eq("Recife")));
    assert!(!matches(&row, &path("nome").ne("Recife")));
    assert!(!matches(&row, &path("uf.id").eq(7u64)));
    assert!(matches(&row, &path("uf").is_null()));
    assert!(matches(&row, &path("nome").is_null()));
}

#[test]
fn eval_in_list_matches_any_element() {
    let row = cidade("Recife", 7);

    assert!(matches(&row, &path("uf.id").in_(vec![Value::Uint(1), Value::Uint(7)])));
    assert!(!matches(&row, &path("uf.id").in_(vec![Value::Uint(1)])));
    assert!(matches(&row, &path("uf.id").not_in(vec![Value::Uint(1)])));
}

#[test]
fn eval_entity_equality_uses_keys() {
    let row = cidade("Recife", 7);
    let other_instance = EntityRef::new(&UF).with("id", 7u64);

    assert!(matches(&row, &path("uf").eq(other_instance)));
}

#[test]
fn eval_resolves_placeholders_from_bindings() {
    let row = cidade("Recife", 7);
    let param = Param::named("nome");
    let expr = path("nome").eq(&param);

    let err = eval(&row, &expr, &Bindings::new()).expect_err("unbound placeholder");
    assert_eq!(
        err,
        PredicateError::UnboundParam {
            name: "nome".to_string()
        }
    );

    let mut bindings = Bindings::new();
    bindings
        .bind("nome", Value::from("Recife"))
        .expect("first bind succeeds");
    assert!(eval(&row, &expr, &bindings).expect("bound placeholder"));

    let again = bindings.bind("nome", Value::from("Olinda"));
    assert!(matches!(again, Err(PredicateError::AlreadyBound { .. })));
}

#[test]
fn eval_unknown_path_is_an_error() {
    let row = cidade("Recife", 7);
    let err = eval(&row, &path("codigo").eq(1u64), &Bindings::new()).expect_err("unknown path");

    assert!(matches!(err, PredicateError::UnknownPath { entity: "Cidade", .. }));
}

#[test]
fn eval_xor_counts_true_children() {
    let row = cidade("Recife", 7);
    let yes = path("nome").eq("Recife");
    let no = path("nome").eq("Olinda");

    assert!(matches(&row, &Expr::xor(vec![yes.clone(), no.clone()])));
    assert!(!matches(&row, &Expr::xor(vec![yes.clone(), yes])));
    assert!(!matches(&row, &Expr::xor(vec![no.clone(), no])));
}
