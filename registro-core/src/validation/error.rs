use serde::{Deserialize, Serialize};

use super::Field;

/// Tipo di violazione di un campo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldErrorKind {
    /// Campo assente, null o vuoto (dopo il trim, dove previsto).
    Required,
    TooLong { max: usize },
    TooShort { min: usize },
    /// Pattern non rispettato (email, idNumber) o data non interpretabile.
    InvalidFormat,
    /// Valore fuori dall'enumerazione ammessa.
    NotAllowed,
    InFuture,
    /// Il valore JSON non è testo (né un numero convertibile).
    InvalidType,
}

/// Errore attribuibile a un singolo campo di input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    #[serde(flatten)]
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, kind: FieldErrorKind) -> Self {
        Self { field, kind, message: message_for(field, kind) }
    }
}

fn message_for(field: Field, kind: FieldErrorKind) -> String {
    match (field, kind) {
        (_, FieldErrorKind::Required) => "Required".to_string(),
        (_, FieldErrorKind::TooLong { max }) => format!("Must be {max} characters or less"),
        (Field::Password, FieldErrorKind::TooShort { min }) => {
            format!("Password must be at least {min} characters")
        }
        (_, FieldErrorKind::TooShort { min }) => format!("Must be at least {min} characters"),
        (Field::Email, FieldErrorKind::InvalidFormat) => "Please fill a valid email address".to_string(),
        (Field::IdNumber, FieldErrorKind::InvalidFormat) => "ID number must contain only digits".to_string(),
        (Field::Dob, FieldErrorKind::InvalidFormat) => "Invalid date".to_string(),
        (_, FieldErrorKind::InvalidFormat) => "Invalid format".to_string(),
        (Field::BranchName, FieldErrorKind::NotAllowed) => "Please select a valid branch".to_string(),
        (Field::InterestedDomain, FieldErrorKind::NotAllowed) => "Please select a valid domain".to_string(),
        (_, FieldErrorKind::NotAllowed) => "Value not allowed".to_string(),
        (_, FieldErrorKind::InFuture) => "Date of birth cannot be in the future".to_string(),
        (_, FieldErrorKind::InvalidType) => "Must be text".to_string(),
    }
}

/// Insieme degli errori di validazione, al massimo uno per campo, nell'ordine dei campi.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(transparent)]
#[error("validation failed for: {}", joined_fields(.0))]
pub struct FieldErrors(Vec<FieldError>);

fn joined_fields(errors: &[FieldError]) -> String {
    errors.iter().map(|e| e.field.as_str()).collect::<Vec<_>>().join(", ")
}

impl FieldErrors {
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Campi che hanno fallito, in ordine.
    pub fn fields(&self) -> Vec<Field> {
        self.0.iter().map(|e| e.field).collect()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }

    /// Registra l'esito di una regola: il valore se valido, altrimenti l'errore.
    pub(crate) fn check<T>(&mut self, field: Field, outcome: Result<T, FieldErrorKind>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(kind) => {
                self.0.push(FieldError::new(field, kind));
                None
            }
        }
    }
}
