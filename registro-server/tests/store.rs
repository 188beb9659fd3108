mod common;

use anyhow::Result;
use common::{candidate, sqlite_store, TODAY};
use registro_core::{validate, Field};
use registro_server::store::{MemoryUserStore, StoreError, UserStore};
use registro_server::{
    build_sqlite_url, hash_password, register_user, run_migrations, verify_password, RegisterError,
};
use std::sync::Arc;
use tempfile::TempDir;

// Le migrazioni creano la tabella users e possono essere rieseguite
#[tokio::test]
async fn run_migrations_creates_users_table_idempotently() -> Result<()> {
    let td = TempDir::new()?;
    let store = sqlite_store(td.path()).await?;
    run_migrations(store.pool()).await?;

    let names: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' AND name='users'")
            .fetch_all(store.pool())
            .await?;
    assert_eq!(names, vec!["users".to_string()]);
    Ok(())
}

// La creazione del file DB e delle directory genitrici è idempotente
#[tokio::test]
async fn build_sqlite_url_creates_parent_dirs() -> Result<()> {
    let td = TempDir::new()?;
    let nested = td.path().join("a").join("b").join("registro.db");
    let parent = nested.parent().unwrap().to_path_buf();
    assert!(!parent.exists());

    let raw = format!("sqlite://{}", nested.display());
    let url = build_sqlite_url(&raw)?;
    assert!(url.starts_with("sqlite:///"));
    assert!(nested.exists(), "db file should have been created");
    // l'URL punta al percorso assoluto, non a uno relativo alla cwd
    assert_eq!(url, format!("sqlite://{}", nested.display()));
    // seconda chiamata: nessun errore, stesso URL
    assert_eq!(build_sqlite_url(&raw)?, url);
    Ok(())
}

// Un URL "sqlite:///percorso/assoluto" apre proprio quel file e il pool funziona
#[tokio::test]
async fn absolute_sqlite_url_keeps_leading_slash() -> Result<()> {
    let td = TempDir::new()?;
    let file = td.path().join("abs.db");
    let raw = format!("sqlite://{}", file.display());
    assert!(raw.starts_with("sqlite:///"));

    let url = build_sqlite_url(&raw)?;
    assert!(file.exists());
    let pool = registro_server::connect_pool(&url).await?;
    run_migrations(&pool).await?;
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users").fetch_one(&pool).await?;
    assert_eq!(count, 0);
    Ok(())
}

#[test]
fn in_memory_sqlite_url_is_passed_through() -> Result<()> {
    assert_eq!(build_sqlite_url("sqlite::memory:")?, "sqlite::memory:");
    Ok(())
}

// Insert seguito da list_all: il record compare una sola volta, con id e createdAt
async fn insert_then_list(store: &dyn UserStore) -> Result<()> {
    let record = validate(&candidate("alice@example.com"), TODAY).expect("valid");
    let stored = store.insert(&record).await?;
    assert!(!stored.id.is_empty());
    assert!(time::OffsetDateTime::parse(&stored.created_at, &time::format_description::well_known::Rfc3339).is_ok());

    let all = store.list_all().await?;
    assert_eq!(all.iter().filter(|u| u.id == stored.id).count(), 1);
    assert_eq!(all, vec![stored]);
    Ok(())
}

#[tokio::test]
async fn sqlite_insert_then_list() -> Result<()> {
    let td = TempDir::new()?;
    insert_then_list(&sqlite_store(td.path()).await?).await
}

#[tokio::test]
async fn memory_insert_then_list() -> Result<()> {
    insert_then_list(&MemoryUserStore::new()).await
}

// Email uguali a meno delle maiuscole: la seconda registrazione è un duplicato
async fn duplicate_email_ignores_case(store: &dyn UserStore) -> Result<()> {
    register_user(store, &candidate("A@b.com"), TODAY).await?;
    let err = register_user(store, &candidate("a@b.com"), TODAY).await.unwrap_err();
    assert!(matches!(err, RegisterError::DuplicateEmail(ref e) if e == "a@b.com"), "{err:?}");

    let err = register_user(store, &candidate("  A@B.COM "), TODAY).await.unwrap_err();
    assert!(matches!(err, RegisterError::DuplicateEmail(_)));

    assert_eq!(store.list_all().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn sqlite_duplicate_email_ignores_case() -> Result<()> {
    let td = TempDir::new()?;
    duplicate_email_ignores_case(&sqlite_store(td.path()).await?).await
}

#[tokio::test]
async fn memory_duplicate_email_ignores_case() -> Result<()> {
    duplicate_email_ignores_case(&MemoryUserStore::new()).await
}

#[tokio::test]
async fn store_rejects_duplicate_record_directly() -> Result<()> {
    let store = MemoryUserStore::new();
    let record = validate(&candidate("bob@example.com"), TODAY).expect("valid");
    store.insert(&record).await?;
    let err = store.insert(&record).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEmail(_)));
    Ok(())
}

// Un candidato non valido non arriva mai allo store
#[tokio::test]
async fn invalid_candidate_is_not_persisted() -> Result<()> {
    let store = MemoryUserStore::new();
    let mut bad = candidate("carol@example.com");
    bad.insert("idNumber".into(), "12x".into());
    bad.remove("address");

    let err = register_user(&store, &bad, TODAY).await.unwrap_err();
    match err {
        RegisterError::Validation(errors) => assert_eq!(errors.fields(), vec![Field::IdNumber, Field::Address]),
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert!(store.list_all().await?.is_empty());
    Ok(())
}

// La password è salvata solo come hash Argon2id con salt, verificabile
#[tokio::test]
async fn password_is_stored_hashed() -> Result<()> {
    let td = TempDir::new()?;
    let sqlite = sqlite_store(td.path()).await?;
    let memory = MemoryUserStore::new();
    register_user(&sqlite, &candidate("dan@example.com"), TODAY).await?;
    register_user(&memory, &candidate("dan@example.com"), TODAY).await?;

    let from_sqlite = sqlite.password_hash("dan@example.com").await?.expect("hash in sqlite");
    let from_memory = memory.password_hash("dan@example.com").expect("hash in memory");
    for hash in [&from_sqlite, &from_memory] {
        assert!(hash.starts_with("$argon2id$"), "{hash}");
        assert!(!hash.contains("supersecret"));
        assert!(verify_password("supersecret", hash));
        assert!(!verify_password("wrong-password", hash));
    }
    // salt diverso a ogni inserimento
    assert_ne!(from_sqlite, from_memory);
    Ok(())
}

#[test]
fn same_password_hashes_differently() -> Result<()> {
    let first = hash_password("supersecret")?;
    let second = hash_password("supersecret")?;
    assert_ne!(first, second);
    assert!(verify_password("supersecret", &first) && verify_password("supersecret", &second));
    assert!(!verify_password("supersecret", "not-a-phc-string"));
    Ok(())
}

#[tokio::test]
async fn list_all_keeps_insertion_order() -> Result<()> {
    let td = TempDir::new()?;
    let sqlite = sqlite_store(td.path()).await?;
    let memory = MemoryUserStore::new();
    let emails = ["z@example.com", "a@example.com", "m@example.com"];
    for store in [&sqlite as &dyn UserStore, &memory] {
        for email in emails {
            register_user(store, &candidate(email), TODAY).await?;
        }
        let listed: Vec<String> = store.list_all().await?.into_iter().map(|u| u.email).collect();
        assert_eq!(listed, emails);
    }
    Ok(())
}

// Inserimenti concorrenti con la stessa email: ne passa esattamente uno
#[tokio::test]
async fn concurrent_duplicate_inserts_admit_one() -> Result<()> {
    let td = TempDir::new()?;
    let stores: [Arc<dyn UserStore>; 2] =
        [Arc::new(sqlite_store(td.path()).await?), Arc::new(MemoryUserStore::new())];
    for store in stores {
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let c = candidate("race@example.com");
                let result = register_user(store.as_ref(), &c, TODAY).await;
                result
            }));
        }
        let mut ok = 0;
        for h in handles {
            match h.await? {
                Ok(_) => ok += 1,
                Err(RegisterError::DuplicateEmail(_)) => {}
                Err(other) => panic!("unexpected error {other:?}"),
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(store.list_all().await?.len(), 1);
    }
    Ok(())
}

#[tokio::test]
async fn health_reports_ok_for_open_stores() -> Result<()> {
    let td = TempDir::new()?;
    let sqlite = sqlite_store(td.path()).await?;
    assert!(registro_server::health_with_store(&sqlite).await.is_success());
    assert!(registro_server::health_with_store(&MemoryUserStore::new()).await.is_success());

    sqlite.pool().close().await;
    assert_eq!(
        registro_server::health_with_store(&sqlite).await,
        axum::http::StatusCode::SERVICE_UNAVAILABLE
    );
    Ok(())
}
