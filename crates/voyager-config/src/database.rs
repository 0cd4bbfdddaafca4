//! libSQL database and connection pool configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ConfigError;

fn default_path() -> String {
    "voyager.db".to_string()
}

const fn default_max_open_connections() -> u32 {
    25
}

const fn default_max_idle_connections() -> u32 {
    25
}

/// Five hours.
const fn default_max_lifetime_secs() -> u64 {
    5 * 60 * 60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database file, or `:memory:`. Ignored when remote access is configured.
    #[serde(default = "default_path")]
    pub path: String,

    /// Remote database URL (e.g., `libsql://voyagers.turso.io`).
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,

    /// Upper bound on simultaneously checked-out connections.
    #[serde(default = "default_max_open_connections")]
    pub max_open_connections: u32,

    /// Upper bound on connections kept for reuse.
    #[serde(default = "default_max_idle_connections")]
    pub max_idle_connections: u32,

    /// Connections older than this are discarded instead of reused. Zero disables the limit.
    #[serde(default = "default_max_lifetime_secs")]
    pub max_lifetime_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            url: String::new(),
            auth_token: String::new(),
            max_open_connections: default_max_open_connections(),
            max_idle_connections: default_max_idle_connections(),
            max_lifetime_secs: default_max_lifetime_secs(),
        }
    }
}

impl DatabaseConfig {
    /// Check if the remote URL and token are both present.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }

    /// Maximum connection lifetime, or `None` when unlimited.
    #[must_use]
    pub const fn max_lifetime(&self) -> Option<Duration> {
        if self.max_lifetime_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.max_lifetime_secs))
        }
    }

    /// Reject pool settings that could never hand out a connection.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `max_open_connections` is zero,
    /// or if only one of `url`/`auth_token` is set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_open_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.max_open_connections".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.url.is_empty() != self.auth_token.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.url".into(),
                reason: "url and auth_token must be set together".into(),
            });
        }
        Ok(())
    }
}
