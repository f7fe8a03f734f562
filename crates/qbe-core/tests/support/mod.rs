#![allow(dead_code)]

use qbe_core::{
    db::MemoryStore,
    model::{CollectionKind, EntityModel, FieldKind, FieldModel, ModelRegistry, ScalarKind},
    value::EntityRef,
};

const SETOR_FIELDS: &[FieldModel] = &[
    FieldModel::new("id", FieldKind::PrimaryKey(ScalarKind::Uint)),
    FieldModel::new("nome", FieldKind::Scalar(ScalarKind::Text)),
    FieldModel::new(
        "membros",
        FieldKind::Collection {
            element: "Membro",
            kind: CollectionKind::List,
            mapped_by: Some("setor"),
            orphan_removal: false,
        },
    ),
];

pub static SETOR: EntityModel = EntityModel::new("tests::Setor", "Setor", SETOR_FIELDS);

const MEMBRO_FIELDS: &[FieldModel] = &[
    FieldModel::new("id", FieldKind::PrimaryKey(ScalarKind::Uint)),
    FieldModel::new("nome", FieldKind::Scalar(ScalarKind::Text)),
    FieldModel::new("ativo", FieldKind::Scalar(ScalarKind::Bool)),
    FieldModel::new("setor", FieldKind::Relation { target: "Setor" }),
];

pub static MEMBRO: EntityModel = EntityModel::new("tests::Membro", "Membro", MEMBRO_FIELDS);

pub const SETORES: u64 = 2500;

/// `SETORES` setores; each has one membro, every third one has a second.
pub fn store() -> MemoryStore {
    let mut store = MemoryStore::new(ModelRegistry::new().with(&SETOR).with(&MEMBRO));

    let mut rows = Vec::new();
    for id in 1..=SETORES {
        let setor = EntityRef::new(&SETOR)
            .with("id", id)
            .with("nome", format!("Setor {id}"));

        rows.push(membro(10_000 + id, id % 2 == 0, &setor));
        if id % 3 == 0 {
            rows.push(membro(20_000 + id, true, &setor));
        }
        rows.push(setor);
    }

    store.insert_all(rows).expect("rows are keyed");

    store
}

fn membro(id: u64, ativo: bool, setor: &EntityRef) -> EntityRef {
    EntityRef::new(&MEMBRO)
        .with("id", id)
        .with("nome", format!("Membro {id}"))
        .with("ativo", ativo)
        .with("setor", setor.clone())
}
