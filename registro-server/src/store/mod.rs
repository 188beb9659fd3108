//! Persistenza degli utenti, indipendente dalla tecnologia di storage.

mod memory;
mod sqlite;

use async_trait::async_trait;
use registro_core::{StoredUser, UserRecord};

pub use memory::MemoryUserStore;
pub use sqlite::SqliteUserStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Vincolo di unicità sull'email violato.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// Riga persistita che non rispetta più il modello.
    #[error("corrupt user row {id}: {reason}")]
    Corrupt { id: String, reason: String },
    #[error("hash password: {0}")]
    PasswordHash(String),
    #[error("format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

/// Store degli utenti. Solo inserimento e lettura completa: niente update/delete.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserisce un record già validato, assegnando id e createdAt.
    /// L'unicità dell'email è garantita in modo atomico dal backend.
    async fn insert(&self, record: &UserRecord) -> Result<StoredUser, StoreError>;

    /// Tutti gli utenti, in ordine di inserimento.
    async fn list_all(&self) -> Result<Vec<StoredUser>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
