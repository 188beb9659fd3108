use serde::{Deserialize, Serialize};

use crate::models::StoredUser;
use crate::validation::{Candidate, FieldError};
/*
    http dto for http requests
*/
// Register: POST /api/users
/// Corpo della registrazione così come lo compila il form (tutto testo).
/// Il server lo riceve come oggetto JSON non tipizzato e lo passa al contratto di validazione.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub dob: String, // YYYY-MM-DD
    pub id_number: String,
    pub branch_name: String,
    pub interested_domain: String,
    pub address: String,
}

impl RegisterRequest {
    /// Converte la richiesta nell'oggetto chiave/valore accettato da `validate`.
    pub fn to_candidate(&self) -> Candidate {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => Candidate::new(),
        }
    }
}

// La risposta di successo è lo StoredUser stesso (201).

/// Dettagli dell'errore `validation_failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationDetails {
    pub fields: Vec<FieldError>,
}

// Users listing: GET /api/users restituisce direttamente l'array.
pub type ListUsersResponse = Vec<StoredUser>;
