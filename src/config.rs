use std::env;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deployment {
    Local,
    Prod,
}

impl Deployment {
    /// `prod`/`production` select JSON logs; anything else is local.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

/// Server configuration, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,

    // Shared secret expected in the `ApiToken` header
    pub api_token: String,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Application metadata
    pub deployment: Deployment,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// `DATABASE_URL` wins when set; otherwise the URL is assembled from
    /// `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER` and `DB_PASSWORD`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => {
                let host = lookup("DB_HOST").ok_or(ConfigError::Missing("DB_HOST"))?;
                let port = lookup("DB_PORT").unwrap_or_else(|| "5432".to_string());
                let name = lookup("DB_NAME").ok_or(ConfigError::Missing("DB_NAME"))?;
                let user = lookup("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?;
                let password =
                    lookup("DB_PASSWORD").ok_or(ConfigError::Missing("DB_PASSWORD"))?;
                format!("postgres://{user}:{password}@{host}:{port}/{name}")
            }
        };

        Ok(Self {
            database_url,

            api_token: required_token(&lookup)?,

            // API settings
            api_host: lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            api_port: lookup("API_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),

            deployment: Deployment::from_str(
                &lookup("DEPLOYMENT").unwrap_or_else(|| "local".to_string()),
            ),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

/// Poller configuration.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Base URL of the humidity API, without trailing slash
    pub api_url: String,
    pub api_token: String,
    pub poll_interval: Duration,
}

impl PollerConfig {
    /// Load poller configuration from environment variables (and `.env` if present).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `API_TOKEN` is missing or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// # Errors
    ///
    /// Returns `ConfigError` if `API_TOKEN` is missing or empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: lookup("API_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string())
                .trim_end_matches('/')
                .to_string(),
            api_token: required_token(&lookup)?,
            poll_interval: Duration::from_millis(
                lookup("POLL_INTERVAL_MS")
                    .and_then(|v| v.parse().ok())
                    .filter(|ms| *ms > 0)
                    .unwrap_or(2000),
            ),
        })
    }
}

fn required_token(lookup: &impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
    let token = lookup("API_TOKEN").ok_or(ConfigError::Missing("API_TOKEN"))?;
    if token.is_empty() {
        return Err(ConfigError::Invalid {
            name: "API_TOKEN",
            reason: "must not be empty",
        });
    }
    Ok(token)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid environment variable {name}: {reason}")]
    Invalid {
        name: &'static str,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn database_url_is_assembled_from_parts() {
        let config = Config::from_lookup(lookup_from(&[
            ("DB_HOST", "db"),
            ("DB_NAME", "humidity"),
            ("DB_USER", "sensor"),
            ("DB_PASSWORD", "hunter2"),
            ("API_TOKEN", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "postgres://sensor:hunter2@db:5432/humidity");
        assert_eq!(config.api_token, "secret");
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.deployment, Deployment::Local);
    }

    #[test]
    fn database_url_overrides_parts() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://u:p@elsewhere/db"),
            ("DB_HOST", "ignored"),
            ("API_TOKEN", "secret"),
            ("API_PORT", "8080"),
            ("DEPLOYMENT", "Production"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "postgres://u:p@elsewhere/db");
        assert_eq!(config.api_port, 8080);
        assert_eq!(config.deployment, Deployment::Prod);
    }

    #[test]
    fn non_production_deployments_are_local() {
        for name in ["local", "staging", "dev", ""] {
            assert_eq!(Deployment::from_str(name), Deployment::Local, "{name:?}");
        }
        assert_eq!(Deployment::from_str("PROD"), Deployment::Prod);
    }

    #[test]
    fn missing_database_part_is_reported() {
        let err = Config::from_lookup(lookup_from(&[
            ("DB_HOST", "db"),
            ("DB_USER", "sensor"),
            ("DB_PASSWORD", "pw"),
            ("API_TOKEN", "secret"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::Missing("DB_NAME")));
    }

    #[test]
    fn api_token_is_required_and_non_empty() {
        let err = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("API_TOKEN")));

        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("API_TOKEN", ""),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "API_TOKEN", .. }));
    }

    #[test]
    fn unparsable_port_falls_back_to_default() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("API_TOKEN", "secret"),
            ("API_PORT", "eighty"),
        ]))
        .unwrap();
        assert_eq!(config.api_port, 3000);
    }

    #[test]
    fn poller_defaults() {
        let config = PollerConfig::from_lookup(lookup_from(&[("API_TOKEN", "secret")])).unwrap();
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.poll_interval, Duration::from_secs(2));
    }

    #[test]
    fn poller_trims_trailing_slash_and_rejects_zero_interval() {
        let config = PollerConfig::from_lookup(lookup_from(&[
            ("API_TOKEN", "secret"),
            ("API_URL", "http://sensor-box:3000/"),
            ("POLL_INTERVAL_MS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://sensor-box:3000");
        assert_eq!(config.poll_interval, Duration::from_millis(2000));
    }
}
