use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Store-wide settings, loadable from an optional `storefront.toml`.
#[derive(Deserialize, Debug, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_capacity")]
    pub max_users: usize,
    #[serde(default = "default_capacity")]
    pub max_products: usize,
    #[serde(default = "default_capacity")]
    pub max_orders: usize,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_capacity() -> usize {
    100
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_users: default_capacity(),
            max_products: default_capacity(),
            max_orders: default_capacity(),
        }
    }
}

/// Loads the configuration file, falling back to defaults when it does not
/// exist. A present-but-broken file is an error rather than a silent default.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<StoreConfig, ConfigError> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = match std::fs::read_to_string(path_ref) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file, using defaults");
            return Ok(StoreConfig::default());
        }
        Err(e) => return Err(ConfigError::Read(path_ref.to_path_buf(), e)),
    };
    toml::from_str(&contents).map_err(|e| ConfigError::Parse(path_ref.to_path_buf(), e))
}

/// The admin credential pair, injected from the environment rather than
/// compiled in. Never stored in the users file.
#[derive(Clone, PartialEq, Eq)]
pub struct SuperuserCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for SuperuserCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuperuserCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub const ADMIN_USER_VAR: &str = "STOREFRONT_ADMIN_USER";
pub const ADMIN_PASSWORD_VAR: &str = "STOREFRONT_ADMIN_PASSWORD";

impl SuperuserCredentials {
    /// Reads the credential pair from `STOREFRONT_ADMIN_USER` /
    /// `STOREFRONT_ADMIN_PASSWORD`, keeping the historical pair as the
    /// fallback so existing deployments keep working.
    pub fn from_env() -> Self {
        Self {
            username: std::env::var(ADMIN_USER_VAR).unwrap_or_else(|_| "admin".to_string()),
            password: std::env::var(ADMIN_PASSWORD_VAR).unwrap_or_else(|_| "MATRF".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_yields_defaults() {
        let config = load_config("definitely/not/a/real/path.toml").unwrap();
        assert_eq!(config.max_products, 100);
        assert_eq!(config.data_dir, PathBuf::from("."));
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "data_dir = \"/srv/store\"\nmax_orders = 7\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/store"));
        assert_eq!(config.max_orders, 7);
        assert_eq!(config.max_users, 100);
    }

    #[test]
    fn debug_output_redacts_the_password() {
        let creds = SuperuserCredentials {
            username: "admin".into(),
            password: "supersecret".into(),
        };
        let debug = format!("{creds:?}");
        assert!(!debug.contains("supersecret"));
    }
}
