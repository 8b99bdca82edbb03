use std::env;
use std::str::FromStr;

use actix_web::http::Uri;
use anyhow::{Context, Result, anyhow, bail};

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub database_name: String,
    pub server_addr: String,
    pub db_max_connections: u32,

    pub cors_origins: Vec<String>,

    // Logging
    pub log_dir: String,
    pub log_level: tracing::Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .ok_or_else(|| anyhow!("DATABASE_URL must be set"))?,
            database_name: var("DATABASE_NAME", "hrms_lite"),
            server_addr: var("SERVER_ADDR", "0.0.0.0:8000"),
            db_max_connections: parse("DB_MAX_CONNECTIONS", &var("DB_MAX_CONNECTIONS", "10"))?,

            cors_origins: parse_origins(&var("CORS_ORIGINS", DEFAULT_CORS_ORIGINS))?,

            log_dir: var("LOG_DIR", "logs"),
            log_level: parse("LOG_LEVEL", &var("LOG_LEVEL", "info"))?,
        })
    }
}

fn parse<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse()
        .with_context(|| format!("{key} has an invalid value '{raw}'"))
}

/// Each origin must be an absolute `scheme://host[:port]`; wildcards are
/// rejected because credentials are allowed.
fn parse_origins(raw: &str) -> Result<Vec<String>> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            let uri: Uri = parse("CORS_ORIGINS", origin)?;
            let bare = uri.path_and_query().is_none_or(|pq| pq.as_str() == "/");
            if uri.scheme().is_none() || uri.host().is_none() || !bare {
                bail!("CORS_ORIGINS has an invalid origin '{origin}'");
            }
            Ok(origin.trim_end_matches('/').to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply() {
        let config = config(&[("DATABASE_URL", "mysql://root@localhost:3306")]).unwrap();

        assert_eq!(config.database_name, "hrms_lite");
        assert_eq!(config.server_addr, "0.0.0.0:8000");
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.log_level, tracing::Level::INFO);
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:5173", "http://localhost:3000"]
        );
    }

    #[test]
    fn database_url_is_required() {
        assert!(config(&[]).is_err());
    }

    #[test]
    fn invalid_numbers_are_errors() {
        let err = config(&[("DATABASE_URL", "memory://"), ("DB_MAX_CONNECTIONS", "many")])
            .unwrap_err();
        assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
    }

    #[test]
    fn cors_origins_are_trimmed() {
        let config = config(&[
            ("DATABASE_URL", "memory://"),
            ("CORS_ORIGINS", " https://hr.example.com , ,http://localhost:5173"),
        ])
        .unwrap();
        assert_eq!(
            config.cors_origins,
            vec!["https://hr.example.com", "http://localhost:5173"]
        );
    }

    #[test]
    fn invalid_cors_origins_are_errors() {
        for origins in ["*", "localhost:3000", "http://", "https://hr.example.com/app", "http://a b"] {
            let err = config(&[("DATABASE_URL", "memory://"), ("CORS_ORIGINS", origins)])
                .unwrap_err();
            assert!(err.to_string().contains("CORS_ORIGINS"), "{origins}: {err}");
        }
    }
}
