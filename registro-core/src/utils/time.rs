use time::{format_description::well_known::Rfc3339, Date, OffsetDateTime};

/// Restituisce l'istante corrente in UTC formattato come RFC3339 (es. "2025-11-02T12:34:56Z").
pub fn now_timestamp() -> Result<String, time::error::Format> {
    OffsetDateTime::now_utc().format(&Rfc3339)
}

/// Data corrente in UTC, riferimento per il controllo sulla data di nascita.
pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}
