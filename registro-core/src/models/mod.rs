pub mod user;
pub mod branch;
pub mod interest;

// Re-export per comodità
pub use user::{Email, StoredUser, UserRecord};
pub use branch::Branch;
pub use interest::InterestedDomain;

/// Valore testuale che non appartiene a nessuna variante di un enum chiuso.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant `{0}`")]
pub struct UnknownVariant(pub String);
