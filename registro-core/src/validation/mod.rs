//! Contratto di validazione per gli utenti, condiviso tra server (submit) e client (form).
//!
//! `validate` applica ogni regola in modo indipendente e raccoglie tutte le violazioni,
//! un errore per campo. `validate_field` espone la stessa regola per un singolo campo:
//! `validate` è esattamente la congiunzione di `validate_field` su tutti i campi, quindi
//! i due boundary accettano e rifiutano gli stessi input.

mod error;
mod rules;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::Date;

use crate::models::UserRecord;
use crate::utils::today_utc;

pub use error::{FieldError, FieldErrorKind, FieldErrors};

/// Input non tipizzato (oggetto JSON) da validare.
pub type Candidate = Map<String, Value>;

/// Campi di input di un utente, nell'ordine in cui vengono validati.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Password,
    Dob,
    IdNumber,
    BranchName,
    InterestedDomain,
    Address,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Password,
        Field::Dob,
        Field::IdNumber,
        Field::BranchName,
        Field::InterestedDomain,
        Field::Address,
    ];

    /// Chiave camelCase usata nel JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Password => "password",
            Field::Dob => "dob",
            Field::IdNumber => "idNumber",
            Field::BranchName => "branchName",
            Field::InterestedDomain => "interestedDomain",
            Field::Address => "address",
        }
    }

    /// Etichetta leggibile, usata dal form.
    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
            Field::Password => "Password",
            Field::Dob => "Date of Birth",
            Field::IdNumber => "ID Number",
            Field::BranchName => "Branch",
            Field::InterestedDomain => "Interested Domain",
            Field::Address => "Address",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Valida un candidato rispetto alla data `today` (la data di nascita non può superarla).
pub fn validate(candidate: &Candidate, today: Date) -> Result<UserRecord, FieldErrors> {
    let mut errors = FieldErrors::default();
    let get = |field: Field| candidate.get(field.as_str());

    let first_name = errors.check(Field::FirstName, rules::first_name(get(Field::FirstName)));
    let last_name = errors.check(Field::LastName, rules::last_name(get(Field::LastName)));
    let email = errors.check(Field::Email, rules::email(get(Field::Email)));
    let password = errors.check(Field::Password, rules::password(get(Field::Password)));
    let dob = errors.check(Field::Dob, rules::dob(get(Field::Dob), today));
    let id_number = errors.check(Field::IdNumber, rules::id_number(get(Field::IdNumber)));
    let branch_name = errors.check(Field::BranchName, rules::branch_name(get(Field::BranchName)));
    let interested_domain = errors.check(
        Field::InterestedDomain,
        rules::interested_domain(get(Field::InterestedDomain)),
    );
    let address = errors.check(Field::Address, rules::address(get(Field::Address)));

    // Ogni campo è Some solo se la sua regola è passata: nessun successo parziale.
    let record = || -> Option<UserRecord> {
        Some(UserRecord {
            first_name: first_name?,
            last_name: last_name?,
            email: email?,
            password: password?,
            dob: dob?,
            id_number: id_number?,
            branch_name: branch_name?,
            interested_domain: interested_domain?,
            address: address?,
        })
    };
    record().ok_or(errors)
}

/// Come [`validate`], usando la data UTC corrente.
pub fn validate_now(candidate: &Candidate) -> Result<UserRecord, FieldErrors> {
    validate(candidate, today_utc())
}

/// Valida un singolo campo, per i messaggi interattivi del form.
pub fn validate_field(field: Field, raw: Option<&Value>, today: Date) -> Result<(), FieldError> {
    let outcome = match field {
        Field::FirstName => rules::first_name(raw).map(drop),
        Field::LastName => rules::last_name(raw).map(drop),
        Field::Email => rules::email(raw).map(drop),
        Field::Password => rules::password(raw).map(drop),
        Field::Dob => rules::dob(raw, today).map(drop),
        Field::IdNumber => rules::id_number(raw).map(drop),
        Field::BranchName => rules::branch_name(raw).map(drop),
        Field::InterestedDomain => rules::interested_domain(raw).map(drop),
        Field::Address => rules::address(raw).map(drop),
    };
    outcome.map_err(|kind| FieldError::new(field, kind))
}
