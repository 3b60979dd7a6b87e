use std::time::Duration;

use anyhow::{Context, Result, anyhow};

pub(crate) const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/beta";
const DEFAULT_SESSION_FILE: &str = ".arena_session";

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) api_url: String,
    pub(crate) session_file: String,
    pub(crate) log_level: String,
    pub(crate) connect_timeout: Duration,
    pub(crate) request_timeout: Duration,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        let api_url = std::env::var("ARENA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let session_file = std::env::var("ARENA_SESSION_FILE")
            .map(|value| value.trim().to_string())
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_FILE.to_string());
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_string());
        let connect_timeout = Duration::from_secs(parse_u64_env("ARENA_CONNECT_TIMEOUT_SECS", 5)?);
        let request_timeout = Duration::from_secs(parse_u64_env("ARENA_REQUEST_TIMEOUT_SECS", 15)?);

        Ok(Self {
            api_url,
            session_file,
            log_level,
            connect_timeout,
            request_timeout,
        })
    }
}

/// Добавляет схему `http://`, если адрес указан без неё.
pub(crate) fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_u64_env(key: &str, default: u64) -> Result<u64> {
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    parse_positive(key, &raw)
}

fn parse_positive(key: &str, raw: &str) -> Result<u64> {
    let value = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://arena.example.com/beta".to_string());
        assert_eq!(s, "https://arena.example.com/beta");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:8000/beta".to_string());
        assert_eq!(s, "http://127.0.0.1:8000/beta");
    }

    #[test]
    fn parse_positive_accepts_numbers() {
        assert_eq!(parse_positive("X", " 30 ").expect("valid"), 30);
    }

    #[test]
    fn parse_positive_rejects_zero_and_garbage() {
        assert!(parse_positive("X", "0").is_err());
        assert!(parse_positive("X", "soon").is_err());
    }
}
