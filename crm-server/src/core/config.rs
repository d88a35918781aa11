//! Server configuration, loaded from the environment

use std::time::Duration;

use crate::auth::JwtConfig;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone)]
pub struct Config {
    /// development | staging | production
    pub environment: String,
    pub http_port: u16,
    /// SQLite URL, e.g. `sqlite://crm.db` or `sqlite::memory:`
    pub database_url: String,
    pub jwt: JwtConfig,
    /// Fallback log filter when `RUST_LOG` is unset
    pub log_level: String,
    pub log_json: bool,
    /// Daily rolling log files are written here when set
    pub log_dir: Option<String>,
    pub request_timeout: Duration,
    /// Seeded at start-up when no user with this name exists
    pub bootstrap_admin: Option<(String, String)>,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> Result<T, BoxError> {
    match std::env::var(name) {
        Ok(v) if !v.is_empty() => v
            .parse()
            .map_err(|_| format!("{name} has an invalid value: {v}").into()),
        _ => Ok(default),
    }
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    pub fn from_env() -> Result<Self, BoxError> {
        let environment = env_or("ENVIRONMENT", "development");

        let bootstrap_admin = match (
            std::env::var("BOOTSTRAP_ADMIN_USERNAME").ok().filter(|v| !v.is_empty()),
            std::env::var("BOOTSTRAP_ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
        ) {
            (Some(user), Some(pass)) => Some((user, pass)),
            (None, None) => None,
            _ => {
                return Err(
                    "BOOTSTRAP_ADMIN_USERNAME and BOOTSTRAP_ADMIN_PASSWORD must be set together"
                        .into(),
                );
            }
        };

        Ok(Self {
            http_port: env_parse("HTTP_PORT", 5000)?,
            database_url: env_or("DATABASE_URL", "sqlite://crm.db"),
            jwt: JwtConfig {
                secret: Self::require_secret("JWT_SECRET", &environment)?,
                expiration_minutes: env_parse("JWT_EXPIRATION_MINUTES", 60)?,
                issuer: env_or("JWT_ISSUER", "travel-crm"),
                audience: env_or("JWT_AUDIENCE", "travel-crm-clients"),
            },
            log_level: env_or("LOG_LEVEL", "info"),
            log_json: env_parse("LOG_JSON", false)?,
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.is_empty()),
            request_timeout: Duration::from_millis(env_parse("REQUEST_TIMEOUT_MS", 30_000)?),
            bootstrap_admin,
            environment,
        })
    }

    /// In-memory configuration for tests and embedding
    pub fn in_memory() -> Self {
        Self {
            environment: "development".to_string(),
            http_port: 0,
            database_url: "sqlite::memory:".to_string(),
            jwt: JwtConfig::default(),
            log_level: "info".to_string(),
            log_json: false,
            log_dir: None,
            request_timeout: Duration::from_secs(30),
            bootstrap_admin: None,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_secret_fallback_only_in_development() {
        let name = "CRM_TEST_SECRET_THAT_IS_NEVER_SET";
        assert_eq!(
            Config::require_secret(name, "development").unwrap(),
            format!("dev-{name}-not-for-production")
        );
        assert!(Config::require_secret(name, "production").is_err());
    }

    #[test]
    fn test_in_memory_defaults() {
        let config = Config::in_memory();
        assert_eq!(config.jwt.expiration_minutes, 60);
        assert!(!config.is_production());
    }
}
