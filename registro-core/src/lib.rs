//! registro-core: tipi condivisi tra client e server (modelli, contratto di validazione, DTO HTTP, errori).
//! Niente I/O o dipendenze non compatibili con WASM.

pub mod models;
pub mod protocol;
pub mod error;
pub mod utils;
pub mod validation;

// Re-export utili per ridurre i percorsi nei crate client/server
pub use error::Error;
pub use models::{Branch, Email, InterestedDomain, StoredUser, UnknownVariant, UserRecord};
pub use protocol::http::{ListUsersResponse, RegisterRequest, ValidationDetails};
pub use utils::{new_user_id, now_timestamp, today_utc};
pub use validation::{validate, validate_field, validate_now, Candidate, Field, FieldError, FieldErrorKind, FieldErrors};
