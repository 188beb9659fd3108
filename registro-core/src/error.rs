use serde::{Deserialize, Serialize};

/// Codici errore esposti sul wire.
pub mod codes {
    pub const VALIDATION_FAILED: &str = "validation_failed";
    pub const DUPLICATE_EMAIL: &str = "duplicate_email";
    pub const INVALID_BODY: &str = "invalid_body";
    pub const NOT_FOUND: &str = "not_found";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// Errore condiviso per le risposte HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    /// Codice messaggio
    pub code: String,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl Error {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.into(), message: message.into(), details: None }
    }

    /// Allega dettagli strutturati (es. gli errori per campo).
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
