use serde_json::Value;
use time::{format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime, UtcOffset};

use super::FieldErrorKind;
use crate::models::user::{MAX_FIRST_NAME_LEN, MAX_LAST_NAME_LEN, MIN_PASSWORD_LEN};
use crate::models::{Branch, Email, InterestedDomain};

/// Estrae il testo grezzo: null/assente → None, i numeri diventano testo.
fn text(raw: Option<&Value>) -> Result<Option<String>, FieldErrorKind> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(FieldErrorKind::InvalidType),
    }
}

/// Testo obbligatorio, senza trim: la stringa vuota conta come assente.
fn required(raw: Option<&Value>) -> Result<String, FieldErrorKind> {
    match text(raw)? {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(FieldErrorKind::Required),
    }
}

/// Testo obbligatorio dopo il trim.
fn required_trimmed(raw: Option<&Value>) -> Result<String, FieldErrorKind> {
    let trimmed = required(raw)?.trim().to_string();
    if trimmed.is_empty() {
        return Err(FieldErrorKind::Required);
    }
    Ok(trimmed)
}

/// Lunghezza in unità UTF-16, come la misurano il form e il database originali.
fn text_len(value: &str) -> usize {
    value.encode_utf16().count()
}

fn at_most(value: String, max: usize) -> Result<String, FieldErrorKind> {
    if text_len(&value) > max {
        return Err(FieldErrorKind::TooLong { max });
    }
    Ok(value)
}

pub(super) fn first_name(raw: Option<&Value>) -> Result<String, FieldErrorKind> {
    at_most(required_trimmed(raw)?, MAX_FIRST_NAME_LEN)
}

pub(super) fn last_name(raw: Option<&Value>) -> Result<String, FieldErrorKind> {
    at_most(required_trimmed(raw)?, MAX_LAST_NAME_LEN)
}

pub(super) fn email(raw: Option<&Value>) -> Result<Email, FieldErrorKind> {
    let value = required_trimmed(raw)?;
    Email::parse(&value).ok_or(FieldErrorKind::InvalidFormat)
}

pub(super) fn password(raw: Option<&Value>) -> Result<String, FieldErrorKind> {
    let value = required(raw)?;
    if text_len(&value) < MIN_PASSWORD_LEN {
        return Err(FieldErrorKind::TooShort { min: MIN_PASSWORD_LEN });
    }
    Ok(value)
}

/// Accetta "YYYY-MM-DD" oppure un timestamp RFC3339 completo (si usa la data UTC).
pub(super) fn dob(raw: Option<&Value>, today: Date) -> Result<Date, FieldErrorKind> {
    let value = required_trimmed(raw)?;
    let date = Date::parse(&value, format_description!("[year]-[month]-[day]"))
        .or_else(|_| {
            OffsetDateTime::parse(&value, &Rfc3339).map(|dt| dt.to_offset(UtcOffset::UTC).date())
        })
        .map_err(|_| FieldErrorKind::InvalidFormat)?;
    if date > today {
        return Err(FieldErrorKind::InFuture);
    }
    Ok(date)
}

pub(super) fn id_number(raw: Option<&Value>) -> Result<String, FieldErrorKind> {
    let value = required(raw)?;
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldErrorKind::InvalidFormat);
    }
    Ok(value)
}

pub(super) fn branch_name(raw: Option<&Value>) -> Result<Branch, FieldErrorKind> {
    required(raw)?.parse().map_err(|_| FieldErrorKind::NotAllowed)
}

pub(super) fn interested_domain(raw: Option<&Value>) -> Result<InterestedDomain, FieldErrorKind> {
    required(raw)?.parse().map_err(|_| FieldErrorKind::NotAllowed)
}

pub(super) fn address(raw: Option<&Value>) -> Result<String, FieldErrorKind> {
    required_trimmed(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn numbers_are_accepted_as_text() {
        assert_eq!(id_number(Some(&Value::from(12345))), Ok("12345".to_string()));
    }

    #[test]
    fn id_number_is_not_trimmed() {
        assert_eq!(id_number(Some(&Value::from(" 123"))), Err(FieldErrorKind::InvalidFormat));
    }

    #[test]
    fn blank_names_count_as_missing() {
        assert_eq!(first_name(Some(&Value::from("   "))), Err(FieldErrorKind::Required));
        assert_eq!(address(Some(&Value::Null)), Err(FieldErrorKind::Required));
    }

    #[test]
    fn length_is_measured_after_trim() {
        let padded = format!("  {}  ", "a".repeat(15));
        assert_eq!(first_name(Some(&Value::from(padded))), Ok("a".repeat(15)));
        assert_eq!(
            first_name(Some(&Value::from("a".repeat(16)))),
            Err(FieldErrorKind::TooLong { max: 15 })
        );
    }

    #[test]
    fn astral_characters_count_as_two_units() {
        let emoji = "\u{1F600}";
        // 8 emoji = 16 unità: oltre il limite di 15
        assert_eq!(
            first_name(Some(&Value::from(emoji.repeat(8)))),
            Err(FieldErrorKind::TooLong { max: 15 })
        );
        assert_eq!(first_name(Some(&Value::from(emoji.repeat(7)))), Ok(emoji.repeat(7)));
        // 4 emoji = 8 unità: password abbastanza lunga
        assert_eq!(password(Some(&Value::from(emoji.repeat(4)))), Ok(emoji.repeat(4)));
        assert_eq!(
            password(Some(&Value::from("\u{1F600}abcde"))),
            Err(FieldErrorKind::TooShort { min: 8 })
        );
    }

    #[test]
    fn accented_letters_count_as_one_unit() {
        assert_eq!(last_name(Some(&Value::from("è".repeat(20)))), Ok("è".repeat(20)));
    }

    #[test]
    fn dob_accepts_rfc3339_timestamps() {
        let today = date!(2025 - 06 - 15);
        assert_eq!(
            dob(Some(&Value::from("2000-01-02T00:00:00Z")), today),
            Ok(date!(2000 - 01 - 02))
        );
        assert_eq!(dob(Some(&Value::from("02/01/2000")), today), Err(FieldErrorKind::InvalidFormat));
    }

    #[test]
    fn objects_are_a_type_error() {
        let raw = serde_json::json!({"first": "x"});
        assert_eq!(address(Some(&raw)), Err(FieldErrorKind::InvalidType));
    }
}
