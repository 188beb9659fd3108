use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use registro_core::{new_user_id, now_timestamp, StoredUser, UserRecord};

use super::{StoreError, UserStore};
use crate::hash_password;

struct MemoryRow {
    seq: u64,
    user: StoredUser,
    password_hash: String,
}

/// Store in memoria, indicizzato per email (già normalizzata dalla validazione).
/// Usato nei test e con DATABASE_URL=memory.
#[derive(Default)]
pub struct MemoryUserStore {
    users: DashMap<String, MemoryRow>,
    next_seq: AtomicU64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash della password salvato per `email`.
    pub fn password_hash(&self, email: &str) -> Option<String> {
        self.users.get(email).map(|row| row.password_hash.clone())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, record: &UserRecord) -> Result<StoredUser, StoreError> {
        let created_at = now_timestamp()?;
        let password_hash = hash_password(record.password())?;
        // l'entry tiene il lock sullo shard: controllo e inserimento sono atomici
        match self.users.entry(record.email().as_str().to_string()) {
            Entry::Occupied(occupied) => Err(StoreError::DuplicateEmail(occupied.key().clone())),
            Entry::Vacant(vacant) => {
                let user = StoredUser::from_record(record, new_user_id(), created_at);
                let row = MemoryRow {
                    seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                    user: user.clone(),
                    password_hash,
                };
                vacant.insert(row);
                Ok(user)
            }
        }
    }

    async fn list_all(&self) -> Result<Vec<StoredUser>, StoreError> {
        let mut rows: Vec<(u64, StoredUser)> =
            self.users.iter().map(|row| (row.seq, row.user.clone())).collect();
        rows.sort_by_key(|(seq, _)| *seq);
        Ok(rows.into_iter().map(|(_, user)| user).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
