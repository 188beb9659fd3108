use async_trait::async_trait;
use registro_core::{new_user_id, now_timestamp, Branch, InterestedDomain, StoredUser, UserRecord};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use time::{macros::format_description, Date};

use super::{StoreError, UserStore};
use crate::hash_password;

/// Store su SQLite. Lo schema è creato da `run_migrations`.
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Hash della password salvato per `email`.
    pub async fn password_hash(&self, email: &str) -> Result<Option<String>, StoreError> {
        let hash = sqlx::query_scalar("SELECT password_hash FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(hash)
    }
}

// Converte una riga della tabella users nel modello esposto sul wire.
fn user_from_row(row: &SqliteRow) -> Result<StoredUser, StoreError> {
    let id: String = row.try_get("id")?;
    let corrupt = |reason: String| StoreError::Corrupt { id: id.clone(), reason };

    let dob: String = row.try_get("dob")?;
    let dob = Date::parse(&dob, format_description!("[year]-[month]-[day]"))
        .map_err(|e| corrupt(format!("dob: {e}")))?;
    let branch_name: String = row.try_get("branch_name")?;
    let branch_name: Branch = branch_name.parse().map_err(|e| corrupt(format!("branch_name: {e}")))?;
    let interested_domain: String = row.try_get("interested_domain")?;
    let interested_domain: InterestedDomain = interested_domain
        .parse()
        .map_err(|e| corrupt(format!("interested_domain: {e}")))?;

    Ok(StoredUser {
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        dob,
        id_number: row.try_get("id_number")?,
        branch_name,
        interested_domain,
        address: row.try_get("address")?,
        created_at: row.try_get("created_at")?,
        id,
    })
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn insert(&self, record: &UserRecord) -> Result<StoredUser, StoreError> {
        let user_id = new_user_id();
        let created_at = now_timestamp()?;
        let dob = record
            .dob()
            .format(format_description!("[year]-[month]-[day]"))
            .map_err(StoreError::Timestamp)?;
        let password_hash = hash_password(record.password())?;

        // nessun controllo preventivo: l'indice UNIQUE su email rende l'inserimento atomico
        let result = sqlx::query(
            "INSERT INTO users (id, first_name, last_name, email, password_hash, dob, id_number, \
             branch_name, interested_domain, address, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user_id)
        .bind(record.first_name())
        .bind(record.last_name())
        .bind(record.email().as_str())
        .bind(&password_hash)
        .bind(&dob)
        .bind(record.id_number())
        .bind(record.branch_name().as_str())
        .bind(record.interested_domain().as_str())
        .bind(record.address())
        .bind(&created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(StoredUser::from_record(record, user_id, created_at)),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::DuplicateEmail(record.email().as_str().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_all(&self) -> Result<Vec<StoredUser>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, first_name, last_name, email, dob, id_number, branch_name, \
             interested_domain, address, created_at FROM users ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(user_from_row).collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.pool.acquire().await?;
        Ok(())
    }
}
