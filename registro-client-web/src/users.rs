//! Stato della pagina utenti: la lista arriva intera da GET /api/users,
//! senza ricerca né paginazione lato client.

use registro_core::{ListUsersResponse, StoredUser};

use crate::api::ListError;

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Failed(String),
    Loaded(Vec<StoredUser>),
}

impl From<Result<ListUsersResponse, ListError>> for ListState {
    fn from(result: Result<ListUsersResponse, ListError>) -> Self {
        match result {
            Ok(users) => ListState::Loaded(users),
            Err(e) => ListState::Failed(e.to_string()),
        }
    }
}

pub fn summary(users: &[StoredUser]) -> String {
    format!("{} users found", users.len())
}

pub fn full_name(user: &StoredUser) -> String {
    format!("{} {}", user.first_name, user.last_name)
}
