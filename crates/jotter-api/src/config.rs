//! Server configuration.
//!
//! Configuration is read from environment variables (after `.env` is
//! loaded by the binary):
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `3000` |
//! | `DATABASE_URL` | `postgres://localhost/jotter` |
//! | `DB_MAX_CONNECTIONS` | `10` |
//! | `SESSION_COOKIE` | `__session` |
//! | `LOGIN_PATH` | `/login` |
//! | `SESSION_TTL_DAYS` | `30` |
//! | `MAX_BODY_BYTES` | `65536` |
//! | `RUN_MIGRATIONS` | `true` |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

pub const DEFAULT_SESSION_COOKIE: &str = "__session";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_SESSION_TTL_DAYS: u64 = 30;
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Session gate settings shared with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSettings {
    /// Name of the cookie carrying the session token.
    pub cookie_name: String,
    /// Where unauthenticated requests are redirected.
    pub login_path: String,
    /// Lifetime of newly issued sessions.
    pub session_ttl: Duration,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_DAYS * 24 * 60 * 60),
        }
    }
}

impl AuthSettings {
    /// Login URL that sends the user back to `return_to` afterwards.
    pub fn login_url(&self, return_to: &str) -> String {
        format!(
            "{}?redirectTo={}",
            self.login_path,
            urlencoding::encode(return_to)
        )
    }
}

/// Full server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub max_body_bytes: usize,
    pub run_migrations: bool,
    pub auth: AuthSettings,
}

impl ApiConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AuthSettings::default();

        let session_ttl_days: u64 = parse_or(&lookup, "SESSION_TTL_DAYS", DEFAULT_SESSION_TTL_DAYS)?;
        if session_ttl_days == 0 {
            return Err(ConfigError::Validation(
                "SESSION_TTL_DAYS must be >= 1".to_string(),
            ));
        }

        let login_path = lookup("LOGIN_PATH").unwrap_or(defaults.login_path);
        if !login_path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "LOGIN_PATH must be an absolute path, got {:?}",
                login_path
            )));
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "postgres://localhost/jotter".to_string()),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            max_body_bytes: parse_or(&lookup, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
            run_migrations: parse_bool_or(&lookup, "RUN_MIGRATIONS", true)?,
            auth: AuthSettings {
                cookie_name: lookup("SESSION_COOKIE").unwrap_or(defaults.cookie_name),
                login_path,
                session_ttl: Duration::from_secs(session_ttl_days * 24 * 60 * 60),
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> ConfigResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

fn parse_bool_or<F>(lookup: &F, name: &'static str, default: bool) -> ConfigResult<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name).as_deref().map(str::trim) {
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => Err(ConfigError::InvalidValue {
            name,
            value: other.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ConfigResult<ApiConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.database_url, "postgres://localhost/jotter");
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert!(config.run_migrations);
        assert_eq!(config.auth, AuthSettings::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("SESSION_COOKIE", "sid"),
            ("LOGIN_PATH", "/auth/login"),
            ("SESSION_TTL_DAYS", "1"),
            ("RUN_MIGRATIONS", "false"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.auth.cookie_name, "sid");
        assert_eq!(config.auth.login_path, "/auth/login");
        assert_eq!(config.auth.session_ttl, Duration::from_secs(86_400));
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for PORT: \"eighty\"");
    }

    #[test]
    fn test_invalid_bool_is_an_error() {
        assert!(config_from(&[("RUN_MIGRATIONS", "maybe")]).is_err());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        assert!(matches!(
            config_from(&[("SESSION_TTL_DAYS", "0")]),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_relative_login_path_rejected() {
        assert!(config_from(&[("LOGIN_PATH", "login")]).is_err());
    }

    #[test]
    fn test_login_url_encodes_return_path() {
        let auth = AuthSettings::default();
        assert_eq!(
            auth.login_url("/notes/abc?x=1"),
            "/login?redirectTo=%2Fnotes%2Fabc%3Fx%3D1"
        );
    }
}
