use crate::model::{
    CollectionKind, EntityModel, FieldFlags, FieldKind, FieldModel, ModelRegistry, ScalarKind,
};

// Federative unit (state): owns its cities through `Cidade::uf`.
const UF_FIELDS: &[FieldModel] = &[
    FieldModel::new("id", FieldKind::PrimaryKey(ScalarKind::Uint)),
    FieldModel::new("sigla", FieldKind::Scalar(ScalarKind::Text)),
    FieldModel::new("nome", FieldKind::Scalar(ScalarKind::Text)),
    FieldModel::new(
        "cidades",
        FieldKind::Collection {
            element: "Cidade",
            kind: CollectionKind::List,
            mapped_by: Some("uf"),
            orphan_removal: false,
        },
    ),
];

pub static UF: EntityModel = EntityModel::new("qbe_core::test_support::Uf", "Uf", UF_FIELDS);

const CIDADE_FIELDS: &[FieldModel] = &[
    FieldModel::new("id", FieldKind::PrimaryKey(ScalarKind::Uint)),
    FieldModel::new("nome", FieldKind::Scalar(ScalarKind::Text)),
    FieldModel::new("uf", FieldKind::Relation { target: "Uf" }),
    FieldModel::new(
        "pessoas",
        FieldKind::Collection {
            element: "Pessoa",
            kind: CollectionKind::Set,
            mapped_by: Some("cidade"),
            orphan_removal: false,
        },
    ),
    FieldModel::new("version", FieldKind::Scalar(ScalarKind::Uint))
        .with_flags(FieldFlags::SYNTHETIC),
    FieldModel::new("label", FieldKind::Scalar(ScalarKind::Text))
        .with_flags(FieldFlags::TRANSIENT),
];

pub static CIDADE: EntityModel =
    EntityModel::new("qbe_core::test_support::Cidade", "Cidade", CIDADE_FIELDS);

const PESSOA_FIELDS: &[FieldModel] = &[
    FieldModel::new("id", FieldKind::PrimaryKey(ScalarKind::Uint)),
    FieldModel::new("nome", FieldKind::Scalar(ScalarKind::Text)),
    FieldModel::new("ativo", FieldKind::Scalar(ScalarKind::Bool)),
    FieldModel::new("cidade", FieldKind::Relation { target: "Cidade" }),
    FieldModel::new("instances", FieldKind::Scalar(ScalarKind::Uint))
        .with_flags(FieldFlags::STATIC),
];

pub static PESSOA: EntityModel =
    EntityModel::new("qbe_core::test_support::Pessoa", "Pessoa", PESSOA_FIELDS);

const SERVIDOR_FIELDS: &[FieldModel] = &[
    FieldModel::new("id", FieldKind::PrimaryKey(ScalarKind::Uint)),
    FieldModel::new("nome", FieldKind::Scalar(ScalarKind::Text)),
    FieldModel::new("cidade", FieldKind::Relation { target: "Cidade" }),
    FieldModel::new(
        "dependentes",
        FieldKind::Collection {
            element: "Dependente",
            kind: CollectionKind::List,
            mapped_by: Some("servidor"),
            orphan_removal: true,
        },
    ),
    FieldModel::new(
        "projetos",
        FieldKind::Collection {
            element: "ProjetoServidor",
            kind: CollectionKind::Set,
            mapped_by: Some("servidor"),
            orphan_removal: false,
        },
    ),
];

pub static SERVIDOR: EntityModel =
    EntityModel::new("qbe_core::test_support::Servidor", "Servidor", SERVIDOR_FIELDS);

const DEPENDENTE_FIELDS: &[FieldModel] = &[
    FieldModel::new("id", FieldKind::PrimaryKey(ScalarKind::Uint)),
    FieldModel::new("nome", FieldKind::Scalar(ScalarKind::Text)),
    FieldModel::new("servidor", FieldKind::Relation { target: "Servidor" }),
];

pub static DEPENDENTE: EntityModel = EntityModel::new(
    "qbe_core::test_support::Dependente",
    "Dependente",
    DEPENDENTE_FIELDS,
);

const PROJETO_FIELDS: &[FieldModel] = &[
    FieldModel::new("id", FieldKind::PrimaryKey(ScalarKind::Uint)),
    FieldModel::new("nome", FieldKind::Scalar(ScalarKind::Text)),
    FieldModel::new(
        "servidores",
        FieldKind::Collection {
            element: "ProjetoServidor",
            kind: CollectionKind::Set,
            mapped_by: Some("projeto"),
            orphan_removal: false,
        },
    ),
];

pub static PROJETO: EntityModel =
    EntityModel::new("qbe_core::test_support::Projeto", "Projeto", PROJETO_FIELDS);

const PROJETO_SERVIDOR_ID_FIELDS: &[FieldModel] = &[
    FieldModel::new("projeto_id", FieldKind::Scalar(ScalarKind::Uint)),
    FieldModel::new("servidor_id", FieldKind::Scalar(ScalarKind::Uint)),
];

pub static PROJETO_SERVIDOR_ID: EntityModel = EntityModel::new(
    "qbe_core::test_support::ProjetoServidorId",
    "ProjetoServidorId",
    PROJETO_SERVIDOR_ID_FIELDS,
);

// Join entity keyed by an embedded (projeto, servidor) pair.
const PROJETO_SERVIDOR_FIELDS: &[FieldModel] = &[
    FieldModel::new(
        "id",
        FieldKind::CompositeKey {
            embeddable: "ProjetoServidorId",
        },
    ),
    FieldModel::new("projeto", FieldKind::Relation { target: "Projeto" }),
    FieldModel::new("servidor", FieldKind::Relation { target: "Servidor" }),
    FieldModel::new("papel", FieldKind::Scalar(ScalarKind::Text)),
];

pub static PROJETO_SERVIDOR: EntityModel = EntityModel::new(
    "qbe_core::test_support::ProjetoServidor",
    "ProjetoServidor",
    PROJETO_SERVIDOR_FIELDS,
);

/// Registry holding every fixture model.
#[must_use]
pub fn registry() -> ModelRegistry {
    ModelRegistry::new()
        .with(&UF)
        .with(&CIDADE)
        .with(&PESSOA)
        .with(&SERVIDOR)
        .with(&DEPENDENTE)
        .with(&PROJETO)
        .with(&PROJETO_SERVIDOR)
        .with(&PROJETO_SERVIDOR_ID)
}
