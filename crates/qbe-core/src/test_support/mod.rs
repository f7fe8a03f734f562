//! Shared fixtures for unit tests: static models and a seeded store.
pub mod models;

use crate::{db::MemoryStore, value::EntityRef};
use models::{
    CIDADE, DEPENDENTE, PESSOA, PROJETO, PROJETO_SERVIDOR, PROJETO_SERVIDOR_ID, SERVIDOR, UF,
    registry,
};

pub fn uf(id: u64, sigla: &str, nome: &str) -> EntityRef {
    EntityRef::new(&UF)
        .with("id", id)
        .with("sigla", sigla)
        .with("nome", nome)
}

pub fn cidade(id: u64, nome: &str, uf: &EntityRef) -> EntityRef {
    EntityRef::new(&CIDADE)
        .with("id", id)
        .with("nome", nome)
        .with("uf", uf.clone())
}

pub fn pessoa(id: u64, nome: &str, ativo: bool, cidade: &EntityRef) -> EntityRef {
    EntityRef::new(&PESSOA)
        .with("id", id)
        .with("nome", nome)
        .with("ativo", ativo)
        .with("cidade", cidade.clone())
}

pub fn servidor(id: u64, nome: &str, cidade: &EntityRef) -> EntityRef {
    EntityRef::new(&SERVIDOR)
        .with("id", id)
        .with("nome", nome)
        .with("cidade", cidade.clone())
}

pub fn dependente(id: u64, nome: &str, servidor: &EntityRef) -> EntityRef {
    EntityRef::new(&DEPENDENTE)
        .with("id", id)
        .with("nome", nome)
        .with("servidor", servidor.clone())
}

pub fn projeto(id: u64, nome: &str) -> EntityRef {
    EntityRef::new(&PROJETO).with("id", id).with("nome", nome)
}

pub fn projeto_servidor(projeto: &EntityRef, servidor: &EntityRef, papel: &str) -> EntityRef {
    let id = EntityRef::new(&PROJETO_SERVIDOR_ID)
        .with("projeto_id", projeto.value("id"))
        .with("servidor_id", servidor.value("id"));

    EntityRef::new(&PROJETO_SERVIDOR)
        .with("id", id)
        .with("projeto", projeto.clone())
        .with("servidor", servidor.clone())
        .with("papel", papel)
}

///
/// Seeded store
///
/// Ufs 1 (SP), 2 (RJ), 7 (ZZ); cidades 10..=14, three of which contain
/// "Mar"; pessoas 100..=102; servidores 200..=202 with dependentes
/// 300..=302 (202 has none); projetos 400 and 401 with three memberships.
///

pub fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new(registry());

    let sp = uf(1, "SP", "Sao Paulo");
    let rj = uf(2, "RJ", "Rio de Janeiro");
    let zz = uf(7, "ZZ", "Zona");

    let marilia = cidade(10, "Marilia", &sp);
    let campinas = cidade(11, "Campinas", &sp);
    let marica = cidade(12, "Marica", &rj);
    let niteroi = cidade(13, "Niteroi", &rj);
    let maracanau = cidade(14, "Maracanau", &zz);

    let joao = servidor(200, "Joao", &marilia);
    let maria = servidor(201, "Maria", &marica);
    let pedro = servidor(202, "Pedro", &campinas);

    let alpha = projeto(400, "Alpha");
    let beta = projeto(401, "Beta");

    let rows = vec![
        pessoa(100, "Ana", true, &marilia),
        pessoa(101, "Bruno", false, &marica),
        pessoa(102, "Carla", true, &campinas),
        dependente(300, "Lia", &joao),
        dependente(301, "Rui", &joao),
        dependente(302, "Ivo", &maria),
        projeto_servidor(&alpha, &joao, "lider"),
        projeto_servidor(&alpha, &maria, "membro"),
        projeto_servidor(&beta, &joao, "membro"),
        sp,
        rj,
        zz,
        marilia,
        campinas,
        marica,
        niteroi,
        maracanau,
        joao,
        maria,
        pedro,
        alpha,
        beta,
    ];

    store.insert_all(rows).expect("fixture rows are keyed");

    store
}
