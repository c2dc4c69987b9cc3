//! Runtime configuration, loaded from the environment.
//!
//! Base URLs and ids are injected, never literal in library code. `.env`
//! files are honored because `main` runs `dotenvy::dotenv()` before this
//! loads.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use tracing::{debug, warn};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api/v1";

/// Environment-driven settings for the API client.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the recall API, without a trailing slash.
    pub api_base: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// User id sent with watchlist writes (single-user MVP backend).
    pub user_id: i64,
}

impl Config {
    pub fn load() -> Self {
        Self {
            api_base: trim_base(env_or("RRAD_API_URL", DEFAULT_API_BASE.to_string())),
            timeout_secs: env_or("RRAD_TIMEOUT_SECS", 10),
            user_id: env_or("RRAD_USER_ID", 1),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: 10,
            user_id: 1,
        }
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(e) => {
                warn!("invalid {key} value '{raw}': {e}; using default {default}");
                default
            }
        },
        Err(_) => {
            debug!("{key} not set, using default {default}");
            default
        }
    }
}

fn trim_base(base: String) -> String {
    base.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        assert_eq!(
            trim_base("http://localhost:8000/api/v1/".to_string()),
            "http://localhost:8000/api/v1"
        );
    }

    #[test]
    fn defaults_are_sane() {
        let cfg = Config::default();
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
        assert_eq!(cfg.timeout_secs, 10);
        assert_eq!(cfg.user_id, 1);
    }
}
