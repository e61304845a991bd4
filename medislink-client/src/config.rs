use std::time::Duration;

use anyhow::{Context, Result, anyhow};

/// Адрес API по умолчанию.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Настройки HTTP-клиента.
pub struct ClientConfig {
    /// Базовый URL сервера, например `http://127.0.0.1:8080`.
    pub base_url: String,
    /// Таймаут установки соединения.
    pub connect_timeout: Duration,
    /// Таймаут всего запроса.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
        }
    }
}

impl ClientConfig {
    /// Читает настройки из окружения:
    /// - `MEDISLINK_API_URL`
    /// - `MEDISLINK_CONNECT_TIMEOUT_SECS`
    /// - `MEDISLINK_REQUEST_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("MEDISLINK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let connect_timeout = parse_secs(
            "MEDISLINK_CONNECT_TIMEOUT_SECS",
            std::env::var("MEDISLINK_CONNECT_TIMEOUT_SECS").ok(),
            5,
        )?;
        let request_timeout = parse_secs(
            "MEDISLINK_REQUEST_TIMEOUT_SECS",
            std::env::var("MEDISLINK_REQUEST_TIMEOUT_SECS").ok(),
            15,
        )?;

        Ok(Self {
            base_url: normalize_base_url(&base_url),
            connect_timeout,
            request_timeout,
        })
    }

    /// Подменяет базовый URL; схема `http://` добавляется, если её нет.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }
}

/// Добавляет схему к адресу без неё и убирает завершающий `/`.
pub fn normalize_base_url(raw: &str) -> String {
    let raw = raw.trim().trim_end_matches('/');
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    }
}

fn parse_secs(key: &str, raw: Option<String>, default: u64) -> Result<Duration> {
    let value = raw
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(Duration::from_secs(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_scheme_and_loses_trailing_slash() {
        assert_eq!(normalize_base_url("localhost:8080/"), "http://localhost:8080");
        assert_eq!(
            normalize_base_url("https://api.medislink.id"),
            "https://api.medislink.id"
        );
    }

    #[test]
    fn missing_timeout_uses_default() {
        assert_eq!(
            parse_secs("T", None, 5).expect("default parses"),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn zero_or_garbage_timeout_is_error() {
        assert!(parse_secs("T", Some("0".to_string()), 5).is_err());
        assert!(parse_secs("T", Some("soon".to_string()), 5).is_err());
    }
}
