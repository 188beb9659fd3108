use registro_core::{error::codes, Candidate, Error, FieldError, ListUsersResponse, StoredUser, ValidationDetails};

/// Base URL del server, fissata a build time.
pub const API_URL: &str = match option_env!("REGISTRO_API_URL") {
    Some(url) => url,
    None => "http://127.0.0.1:3000/",
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    /// Il server ha rifiutato la richiesta (validazione o email duplicata).
    #[error("{message}")]
    Rejected { message: String, fields: Vec<FieldError> },
    #[error("Submission failed")]
    Failed,
}

/// Errore nel caricamento della lista utenti.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ListError(pub String);

fn users_url(base_url: &str) -> String {
    format!("{}/api/users", base_url.trim_end_matches('/'))
}

/// Traduce l'envelope di errore del server in un errore per il form.
pub fn rejection_from(error: Error) -> SubmitError {
    let fields = match (error.code.as_str(), error.details) {
        (codes::VALIDATION_FAILED, Some(details)) => serde_json::from_value::<ValidationDetails>(details)
            .map(|d| d.fields)
            .unwrap_or_default(),
        _ => Vec::new(),
    };
    let message = match error.code.as_str() {
        codes::DUPLICATE_EMAIL => "This email is already registered".to_string(),
        codes::INTERNAL_ERROR => return SubmitError::Failed,
        _ => error.message,
    };
    SubmitError::Rejected { message, fields }
}

/// POST /api/users
pub async fn register(base_url: &str, candidate: &Candidate) -> Result<StoredUser, SubmitError> {
    let response = reqwest::Client::new()
        .post(users_url(base_url))
        .json(candidate)
        .send()
        .await
        .map_err(|_| SubmitError::Failed)?;

    if response.status().is_success() {
        return response.json::<StoredUser>().await.map_err(|_| SubmitError::Failed);
    }
    match response.json::<Error>().await {
        Ok(error) => Err(rejection_from(error)),
        Err(_) => Err(SubmitError::Failed),
    }
}

/// GET /api/users
pub async fn list_users(base_url: &str) -> Result<ListUsersResponse, ListError> {
    let response = reqwest::Client::new()
        .get(users_url(base_url))
        .send()
        .await
        .map_err(|e| ListError(e.to_string()))?;

    if !response.status().is_success() {
        let message = match response.json::<Error>().await {
            Ok(error) => error.message,
            Err(_) => "Could not load users".to_string(),
        };
        return Err(ListError(message));
    }
    response.json::<ListUsersResponse>().await.map_err(|e| ListError(e.to_string()))
}
