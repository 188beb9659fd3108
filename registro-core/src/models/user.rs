use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use time::Date;

use super::{Branch, InterestedDomain};

pub const MAX_FIRST_NAME_LEN: usize = 15;
pub const MAX_LAST_NAME_LEN: usize = 20;
pub const MIN_PASSWORD_LEN: usize = 8;

// Date sul wire come "YYYY-MM-DD" (lo stesso formato dell'<input type="date">).
time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

// \w in versione ASCII, come nello schema originale del form.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,3})+$")
        .expect("static email pattern")
});

/// Indirizzo email normalizzato: trim, minuscolo e conforme al pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Normalizza `raw` e lo accetta solo se rispetta il pattern `local@domain.tld`.
    pub fn parse(raw: &str) -> Option<Email> {
        let normalized = raw.trim().to_lowercase();
        EMAIL_PATTERN.is_match(&normalized).then_some(Email(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Utente validato, pronto per essere persistito.
/// Si costruisce solo passando dal contratto di validazione.
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: Email,
    pub(crate) password: String,
    pub(crate) dob: Date,
    pub(crate) id_number: String,
    pub(crate) branch_name: Branch,
    pub(crate) interested_domain: InterestedDomain,
    pub(crate) address: String,
}

impl UserRecord {
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn dob(&self) -> Date {
        self.dob
    }

    pub fn id_number(&self) -> &str {
        &self.id_number
    }

    pub fn branch_name(&self) -> Branch {
        self.branch_name
    }

    pub fn interested_domain(&self) -> InterestedDomain {
        self.interested_domain
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

// La password non deve finire nei log.
impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("dob", &self.dob)
            .field("id_number", &self.id_number)
            .field("branch_name", &self.branch_name)
            .field("interested_domain", &self.interested_domain)
            .field("address", &self.address)
            .finish()
    }
}

/// Utente persistito ed esposto sul wire. La password non viene mai restituita.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(with = "iso_date")]
    pub dob: Date,
    pub id_number: String,
    pub branch_name: Branch,
    pub interested_domain: InterestedDomain,
    pub address: String,
    pub created_at: String, // RFC3339 UTC
}

impl StoredUser {
    /// Costruisce la vista persistita di un record appena inserito.
    pub fn from_record(record: &UserRecord, id: String, created_at: String) -> Self {
        Self {
            id,
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.as_str().to_string(),
            dob: record.dob,
            id_number: record.id_number.clone(),
            branch_name: record.branch_name,
            interested_domain: record.interested_domain,
            address: record.address.clone(),
            created_at,
        }
    }
}
