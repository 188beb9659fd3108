//! CORS minimale: una sola origine ammessa (CLIENT_URL), con credenziali.

use anyhow::Context;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedOrigin(HeaderValue);

impl AllowedOrigin {
    /// L'origine non ha mai lo slash finale, l'URL del client sì (es. "http://localhost:5173/").
    pub fn parse(client_url: &str) -> anyhow::Result<Self> {
        let origin = client_url.trim().trim_end_matches('/');
        let value = HeaderValue::from_str(origin)
            .with_context(|| format!("invalid CLIENT_URL {:?}", client_url))?;
        Ok(Self(value))
    }

    pub fn as_header(&self) -> &HeaderValue {
        &self.0
    }
}

fn allow(response: &mut Response, origin: &AllowedOrigin) {
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.0.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
    headers.insert(header::VARY, HeaderValue::from_static("origin"));
}

/// Middleware: risponde ai preflight e aggiunge gli header alle risposte per l'origine ammessa.
pub async fn cors(State(origin): State<AllowedOrigin>, request: Request, next: Next) -> Response {
    let same_origin = request
        .headers()
        .get(header::ORIGIN)
        .is_some_and(|o| o == origin.as_header());

    if same_origin && request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        allow(&mut response, &origin);
        let headers = response.headers_mut();
        headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET, POST, OPTIONS"));
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("content-type"));
        return response;
    }

    let mut response = next.run(request).await;
    if same_origin {
        allow(&mut response, &origin);
    }
    response
}
