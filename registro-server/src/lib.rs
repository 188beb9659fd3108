use anyhow::Context;
use axum::http::StatusCode;
use registro_core::{validate, Candidate, FieldErrors, StoredUser};
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use time::Date;

pub mod config;
pub mod controllers;
pub mod cors;
pub mod error;
pub mod logging;
pub mod routes;
pub mod store;

use cors::AllowedOrigin;
use store::{MemoryUserStore, SqliteUserStore, StoreError, UserStore};

/// Stato condiviso tra gli handler: lo store viene costruito esplicitamente all'avvio.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    /// Origine ammessa per CORS (CLIENT_URL); None = nessun header CORS.
    pub allowed_origin: Option<AllowedOrigin>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store, allowed_origin: None }
    }

    pub fn with_allowed_origin(mut self, origin: Option<AllowedOrigin>) -> Self {
        self.allowed_origin = origin;
        self
    }
}

/// Esito negativo di una registrazione.
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error(transparent)]
    Validation(#[from] FieldErrors),
    #[error("email already registered: {0}")]
    DuplicateEmail(String),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for RegisterError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail(email) => RegisterError::DuplicateEmail(email),
            other => RegisterError::Store(other),
        }
    }
}

/// Valida il candidato e, solo se è valido in ogni campo, lo inserisce nello store.
pub async fn register_user(
    store: &dyn UserStore,
    candidate: &Candidate,
    today: Date,
) -> Result<StoredUser, RegisterError> {
    let record = validate(candidate, today)?;
    let stored = store.insert(&record).await?;
    Ok(stored)
}

/// Hash Argon2id della password, come stringa PHC con salt casuale: in chiaro non viene mai salvata.
pub fn hash_password(password: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::PasswordHash(e.to_string()))
}

/// Verifica una password contro un hash prodotto da [`hash_password`].
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

// Dato un percorso di file, restituisce un URL SQLite valido. Crea le directory genitrici se non esistono.
pub fn sqlite_url_for_path(p: &Path) -> anyhow::Result<String> {
    let abs = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };
    if let Some(parent) = abs.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent dirs for {:?}", parent))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&abs)
        .with_context(|| format!("create/open sqlite file {:?}", abs))?;
    let s = abs.to_string_lossy().replace('\\', "/");
    // su Unix il percorso assoluto inizia già con "/"
    if s.starts_with('/') {
        Ok(format!("sqlite://{}", s))
    } else {
        Ok(format!("sqlite:///{}", s))
    }
}

/// Crea un DB URL SQLite a partire dal valore di DATABASE_URL
/// (percorso di file, URL "sqlite://" oppure "sqlite::memory:").
pub fn build_sqlite_url(raw: &str) -> anyhow::Result<String> {
    if raw == "sqlite::memory:" {
        return Ok(raw.to_string());
    }
    // Rimuovi solo il prefisso "sqlite://": in "sqlite:///var/x.db" il percorso resta assoluto.
    let path_part = raw.strip_prefix("sqlite://").unwrap_or(raw);
    sqlite_url_for_path(&PathBuf::from(path_part))
}

// Connect to the database and return a connection pool.
pub async fn connect_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
    let pool = SqlitePool::connect(db_url)
        .await
        .with_context(|| format!("connect to sqlite via {}", db_url))?;
    Ok(pool)
}

// Esegue le migrazioni del database. Crea le tabelle se non esistono.
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    let stmts = [
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id                TEXT PRIMARY KEY,
            first_name        TEXT NOT NULL,
            last_name         TEXT NOT NULL,
            email             TEXT NOT NULL UNIQUE,
            password_hash     TEXT NOT NULL,
            dob               TEXT NOT NULL,
            id_number         TEXT NOT NULL,
            branch_name       TEXT NOT NULL,
            interested_domain TEXT NOT NULL,
            address           TEXT NOT NULL,
            created_at        TEXT NOT NULL
        );"#,
    ];
    // applica ogni statement di migrazione
    for s in &stmts {
        sqlx::query(s)
            .execute(pool)
            .await
            .with_context(|| format!("apply migration: {}", s.trim().lines().next().unwrap_or_default()))?;
    }
    Ok(())
}

/// Apre lo store indicato da DATABASE_URL: "memory" usa lo store in memoria,
/// ogni altro valore un database SQLite (con migrazioni applicate).
pub async fn open_store(database_url: &str) -> anyhow::Result<Arc<dyn UserStore>> {
    if database_url == "memory" {
        return Ok(Arc::new(MemoryUserStore::new()));
    }
    let db_url = build_sqlite_url(database_url).context("build sqlite DATABASE_URL")?;
    tracing::info!(%db_url, "using sqlite store");
    let pool = connect_pool(&db_url).await.context("connect to sqlite")?;
    run_migrations(&pool).await.context("run migrations")?;
    Ok(Arc::new(SqliteUserStore::new(pool)))
}

/// Controlla lo stato di salute dello store (per SQLite: acquisisce una connessione dal pool).
pub async fn health_with_store(store: &dyn UserStore) -> StatusCode {
    match store.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "store health check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
