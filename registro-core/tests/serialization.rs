use registro_core::*;
use serde_json::{self as json, Value};
use time::macros::date;

fn parse(json_str: &str) -> Value {
    json::from_str(json_str).expect("valid json")
}

fn sample_user() -> StoredUser {
    StoredUser {
        id: "55555555-5555-4555-8555-555555555555".to_string(),
        first_name: "Alice".to_string(),
        last_name: "Rossi".to_string(),
        email: "alice@example.com".to_string(),
        dob: date!(2001 - 03 - 09),
        id_number: "12345".to_string(),
        branch_name: Branch::ComputerScience,
        interested_domain: InterestedDomain::DataScience,
        address: "Via Roma 1".to_string(),
        created_at: "2025-11-02T10:10:10Z".to_string(),
    }
}

/*
    Obiettivo test:
    verificare che StoredUser venga serializzato con i nomi campo giusti (camelCase),
    con la data di nascita come "YYYY-MM-DD" e gli enum con il nome mostrato nel form.
    La password non deve comparire.
*/
#[test]
fn stored_user_wire_shape() {
    let user = sample_user();
    let s = json::to_string(&user).expect("serialize");
    let v = parse(&s);

    assert_eq!(v["id"], user.id);
    assert_eq!(v["firstName"], "Alice");
    assert_eq!(v["dob"], "2001-03-09");
    assert_eq!(v["idNumber"], "12345");
    assert_eq!(v["branchName"], "Computer Science");
    assert_eq!(v["interestedDomain"], "Data Science");
    assert_eq!(v["createdAt"], user.created_at);
    assert!(v.get("password").is_none(), "password must never be serialized");

    let back: StoredUser = json::from_str(&s).expect("deserialize");
    assert_eq!(back, user);
}

/*
    Obiettivo test: la lista utenti è un array JSON nudo, come se lo aspetta la pagina di elenco.
*/
#[test]
fn list_users_response_is_a_bare_array() {
    let resp: ListUsersResponse = vec![sample_user()];
    let v = json::to_value(&resp).expect("serialize");
    assert!(v.is_array());
    assert_eq!(v[0]["email"], "alice@example.com");
}

/*
    Obiettivo test: un FieldError espone field, kind (con i parametri appiattiti) e message.
*/
#[test]
fn field_error_wire_shape() {
    let err = FieldError::new(Field::FirstName, FieldErrorKind::TooLong { max: 15 });
    let v = json::to_value(&err).expect("serialize");

    assert_eq!(v["field"], "firstName");
    assert_eq!(v["kind"], "tooLong");
    assert_eq!(v["max"], 15);
    assert_eq!(v["message"], "Must be 15 characters or less");

    let back: FieldError = json::from_value(v).expect("deserialize");
    assert_eq!(back, err);
}

/*
    Obiettivo test: l'envelope di errore con dettagli di validazione è leggibile dal client.
*/
#[test]
fn validation_error_envelope() {
    let details = ValidationDetails {
        fields: vec![
            FieldError::new(Field::Email, FieldErrorKind::Required),
            FieldError::new(Field::Dob, FieldErrorKind::InFuture),
        ],
    };
    let err = Error::new(error::codes::VALIDATION_FAILED, "validation failed for: email, dob")
        .with_details(json::to_value(&details).expect("serialize details"));

    let v = json::to_value(&err).expect("serialize");
    assert_eq!(v["code"], "validation_failed");
    assert_eq!(v["details"]["fields"][1]["kind"], "inFuture");
    assert_eq!(v["details"]["fields"][1]["message"], "Date of birth cannot be in the future");

    let back: Error = json::from_value(v).expect("deserialize");
    let parsed: ValidationDetails =
        json::from_value(back.details.expect("details")).expect("deserialize details");
    assert_eq!(parsed, details);
}

/*
    Obiettivo test: un Error senza dettagli omette il campo details.
*/
#[test]
fn error_without_details_omits_field() {
    let err = Error::new(error::codes::INTERNAL_ERROR, "Something broke!");
    let v = json::to_value(&err).expect("serialize");
    assert!(v.get("details").is_none());
}

/*
    Obiettivo test: RegisterRequest produce un candidato con le chiavi camelCase attese.
*/
#[test]
fn register_request_to_candidate_uses_camel_case_keys() {
    let req = RegisterRequest { first_name: "Bob".into(), id_number: "42".into(), ..Default::default() };
    let candidate = req.to_candidate();

    assert_eq!(candidate.len(), Field::ALL.len());
    for field in Field::ALL {
        assert!(candidate.contains_key(field.as_str()), "missing key {}", field);
    }
    assert_eq!(candidate["firstName"], "Bob");
    assert_eq!(candidate["idNumber"], "42");
}

#[test]
fn enums_reject_unknown_wire_values() {
    assert!(json::from_str::<Branch>("\"computer science\"").is_err());
    assert!(json::from_str::<InterestedDomain>("\"Cybersecurity\"").is_ok());
}
