use std::net::SocketAddr;

use anyhow::Context;

use crate::cors::AllowedOrigin;
use crate::logging::LogFormat;

pub const DEFAULT_DATABASE_URL: &str = "registro.db";
pub const DEFAULT_PORT: u16 = 3000;

/// Configurazione del server, letta dalle variabili d'ambiente.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// File SQLite, URL "sqlite://", "sqlite::memory:" oppure "memory".
    pub database_url: String,
    pub allowed_origin: Option<AllowedOrigin>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Come `from_env`, ma con una sorgente arbitraria (utile nei test).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(p) => p.trim().parse::<u16>().with_context(|| format!("parse PORT {:?}", p))?,
            None => DEFAULT_PORT,
        };
        // BIND_ADDR vince su PORT
        let bind = non_empty("BIND_ADDR").unwrap_or_else(|| format!("127.0.0.1:{port}"));
        let bind_addr: SocketAddr = bind.trim().parse().context("parse BIND_ADDR")?;

        let database_url = non_empty("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let allowed_origin = non_empty("CLIENT_URL")
            .map(|url| AllowedOrigin::parse(&url))
            .transpose()?;
        let log_format = match non_empty("LOG_FORMAT") {
            Some(f) => f.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self { bind_addr, database_url, allowed_origin, log_format })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
        assert!(cfg.allowed_origin.is_none());
        assert_eq!(cfg.log_format, LogFormat::Text);
    }

    #[test]
    fn port_is_used_without_bind_addr() {
        let cfg = config(&[("PORT", "8081")]).unwrap();
        assert_eq!(cfg.bind_addr.port(), 8081);

        let cfg = config(&[("PORT", "8081"), ("BIND_ADDR", "0.0.0.0:9000")]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn client_url_trailing_slash_is_dropped() {
        let cfg = config(&[("CLIENT_URL", "http://localhost:5173/")]).unwrap();
        let origin = cfg.allowed_origin.expect("origin");
        assert_eq!(origin.as_header(), "http://localhost:5173");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(config(&[("PORT", "abc")]).is_err());
        assert!(config(&[("BIND_ADDR", "nowhere")]).is_err());
        assert!(config(&[("LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = config(&[("DATABASE_URL", "  "), ("LOG_FORMAT", "JSON")]).unwrap();
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.log_format, LogFormat::Json);
    }
}
