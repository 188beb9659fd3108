#![allow(dead_code)]

use std::path::Path;

use registro_core::Candidate;
use registro_server::{connect_pool, run_migrations, sqlite_url_for_path, store::SqliteUserStore};
use serde_json::{json, Value};
use time::{macros::date, Date};

pub const TODAY: Date = date!(2025 - 06 - 15);

/// Candidato valido; `email` permette di variare il vincolo di unicità.
pub fn candidate(email: &str) -> Candidate {
    let value = json!({
        "firstName": "Alice",
        "lastName": "Rossi",
        "email": email,
        "password": "supersecret",
        "dob": "2001-03-09",
        "idNumber": "12345",
        "branchName": "Computer Science",
        "interestedDomain": "Web Development",
        "address": "Via Roma 1",
    });
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

// Crea un database SQLite nuovo (con migrazioni) dentro la directory indicata
pub async fn sqlite_store(dir: &Path) -> anyhow::Result<SqliteUserStore> {
    let url = sqlite_url_for_path(&dir.join("registro.db"))?;
    let pool = connect_pool(&url).await?;
    run_migrations(&pool).await?;
    Ok(SqliteUserStore::new(pool))
}
