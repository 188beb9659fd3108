//! Stato del form di registrazione. Le regole sono quelle di registro-core,
//! le stesse che il server applica al submit.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use registro_core::{validate, validate_field, Candidate, Field, FieldError, FieldErrors, RegisterRequest};
use serde_json::Value;
use time::Date;
use yew::Reducible;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: HashMap<Field, String>,
    /// Campi già visitati: gli errori si mostrano solo per questi (come formik.touched).
    touched: HashSet<Field>,
    /// Errori restituiti dal server all'ultimo submit, finché il campo non viene modificato.
    server_errors: Vec<FieldError>,
}

pub enum FormAction {
    Set(Field, String),
    Touch(Field),
    TouchAll,
    ServerRejected(Vec<FieldError>),
    Reset,
}

impl Reducible for FormState {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FormAction::Set(field, value) => {
                next.server_errors.retain(|e| e.field != field);
                next.values.insert(field, value);
            }
            FormAction::Touch(field) => {
                next.touched.insert(field);
            }
            FormAction::TouchAll => next.touched.extend(Field::ALL),
            FormAction::ServerRejected(errors) => next.server_errors = errors,
            FormAction::Reset => next = FormState::default(),
        }
        Rc::new(next)
    }
}

impl FormState {
    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    /// Corpo della richiesta: tutti i campi, anche vuoti, come testo.
    pub fn request(&self) -> RegisterRequest {
        let text = |f: Field| self.value(f).to_string();
        RegisterRequest {
            first_name: text(Field::FirstName),
            last_name: text(Field::LastName),
            email: text(Field::Email),
            password: text(Field::Password),
            dob: text(Field::Dob),
            id_number: text(Field::IdNumber),
            branch_name: text(Field::BranchName),
            interested_domain: text(Field::InterestedDomain),
            address: text(Field::Address),
        }
    }

    /// Candidato da inviare, nella forma accettata da `validate`.
    pub fn candidate(&self) -> Candidate {
        self.request().to_candidate()
    }

    /// Messaggio da mostrare sotto il campo, se c'è.
    pub fn error_for(&self, field: Field, today: Date) -> Option<String> {
        if self.touched.contains(&field) {
            let raw = Value::from(self.value(field));
            if let Err(e) = validate_field(field, Some(&raw), today) {
                return Some(e.message);
            }
        }
        self.server_errors.iter().find(|e| e.field == field).map(|e| e.message.clone())
    }

    /// Valida l'intero form: restituisce il candidato da inviare oppure tutti gli errori.
    pub fn checked(&self, today: Date) -> Result<Candidate, FieldErrors> {
        let candidate = self.candidate();
        validate(&candidate, today)?;
        Ok(candidate)
    }
}
