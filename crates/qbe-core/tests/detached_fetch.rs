mod support;

use qbe_core::{
    config::QbeConfig,
    db::{Filter, MemoryStore, QbeRepository, Query},
    expr::{CompareOp, Expr},
    value::{EntityRef, Key, Value},
};
use support::{MEMBRO, SETOR, SETORES, store};

// Owner keys carried by each executed batch query, in execution order.
fn batch_sizes(executed: &[Query]) -> Vec<usize> {
    executed
        .iter()
        .filter(|query| query.entity.entity_name == MEMBRO.entity_name)
        .filter_map(|query| match &query.predicate {
            Expr::Compare(CompareOp::In, operands) => match operands.get(1) {
                Some(Expr::Value(Value::List(owners))) => Some(owners.len()),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

fn membro_keys(setor: &EntityRef) -> Vec<Key> {
    setor
        .value("membros")
        .as_elements()
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_key)
        .collect()
}

fn load_all(store: &MemoryStore, config: QbeConfig) -> (Vec<Vec<Key>>, Vec<usize>) {
    let mut repo = QbeRepository::with_config(store.session(), config);
    let mut filter = Filter::new(&SETOR).detached_fetch("membros");

    let setores = repo.find_all(&mut filter).expect("find_all");
    let collections = setores.iter().map(membro_keys).collect();

    (collections, batch_sizes(repo.session().executed()))
}

#[test]
fn owners_are_split_into_bounded_batches() {
    let store = store();

    let (collections, batches) = load_all(&store, QbeConfig::default());

    assert_eq!(collections.len(), usize::try_from(SETORES).expect("fits"));
    assert_eq!(batches, vec![1000, 1000, 500]);
}

#[test]
fn batched_results_equal_a_single_unbounded_query() {
    let store = store();

    let (batched, _) = load_all(&store, QbeConfig::default());
    let unbounded = QbeConfig {
        in_list_limit: usize::MAX,
        ..QbeConfig::default()
    };
    let (single, batches) = load_all(&store, unbounded);

    assert_eq!(batches.len(), 1);
    assert_eq!(batched, single);
}

#[test]
fn every_owner_receives_its_own_members() {
    let store = store();

    let (collections, _) = load_all(&store, QbeConfig::default());

    // setor ids are 1-based and come back in key order
    assert_eq!(collections[0], vec![Key::Uint(10_001)]);
    assert_eq!(collections[2], vec![Key::Uint(10_003), Key::Uint(20_003)]);
    assert!(collections.iter().all(|members| !members.is_empty()));
}

#[test]
fn in_list_limit_is_read_from_configuration() {
    let store = store();
    let config = QbeConfig::from_toml_str("in_list_limit = 400").expect("valid config");

    let (_, batches) = load_all(&store, config);

    assert_eq!(batches.len(), 7);
    assert_eq!(batches.iter().sum::<usize>(), 2500);
    assert_eq!(batches.last(), Some(&100));
}

#[test]
fn example_narrows_owners_before_fetching() {
    let store = store();
    let mut repo = QbeRepository::new(store.session());

    let example = EntityRef::new(&SETOR).with("nome", "Setor 12");
    let mut filter = Filter::new(&SETOR)
        .example(example)
        .detached_fetch("membros");

    // Setor 12, 120..=129, 1200..=1299
    let setores = repo.find_all(&mut filter).expect("find_all");

    assert_eq!(setores.len(), 111);
    assert_eq!(batch_sizes(repo.session().executed()), vec![111]);
}
