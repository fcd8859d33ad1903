//! Configuration module for courseflow-server.
//!
//! Handles loading configuration from TOML files, CLI arguments,
//! and environment variables. Also handles admin secret hashing.

pub mod file;
pub mod runtime;

use crate::config::file::FileConfig;
use crate::config::runtime::{AdminConfig, CheckoutConfig, ServerConfig, SharedConfig};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("password hashing error: {0}")]
    HashError(String),

    #[error("DATABASE_URL environment variable not set")]
    MissingDatabaseUrl,
}

/// Loaded configuration result containing all parts.
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub admin: AdminConfig,
    pub checkout: CheckoutConfig,
}

impl LoadedConfig {
    /// Convert into a SharedConfig with Arc<RwLock<T>> wrappers.
    pub fn into_shared(self) -> SharedConfig {
        SharedConfig::new(self.server, self.admin, self.checkout)
    }
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: std::path::PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    /// 4. Hash the admin secret if it's plaintext (and rewrite the file)
    /// 5. Build the loaded configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        let mut file_config: FileConfig = toml::from_str(&config_content)?;

        self.validate(&file_config)?;

        let secret_hash = if file_config.is_admin_secret_hashed() {
            file_config.admin.secret.clone()
        } else {
            let hash = self.hash_secret(&file_config.admin.secret)?;
            file_config.admin.secret = hash.clone();
            // the override is not persisted
            self.rewrite_config(&file_config)?;
            tracing::info!("Admin secret hashed and config file updated");
            hash
        };

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }

        Ok(self.build_loaded_config(file_config, secret_hash))
    }

    /// Reload the configuration (used during SIGHUP).
    pub fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.load()
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        if config.admin.secret.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "admin secret must not be empty".to_owned(),
            ));
        }
        if config.checkout.session_ttl_secs == 0 {
            return Err(ConfigError::ValidationError(
                "checkout.session_ttl_secs must be positive".to_owned(),
            ));
        }
        if config.checkout.sweep_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "checkout.sweep_interval_secs must be positive".to_owned(),
            ));
        }
        Ok(())
    }

    fn hash_secret(&self, plaintext: &str) -> Result<String, ConfigError> {
        use argon2::{
            Argon2, PasswordHasher,
            password_hash::{SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ConfigError::HashError(e.to_string()))
    }

    fn rewrite_config(&self, config: &FileConfig) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(config)?;

        // Write atomically: write to temp file, then rename
        let temp_path = self.config_path.with_extension("toml.tmp");
        std::fs::write(&temp_path, toml_string)?;
        std::fs::rename(&temp_path, &self.config_path)?;

        Ok(())
    }

    fn build_loaded_config(&self, file_config: FileConfig, secret_hash: String) -> LoadedConfig {
        LoadedConfig {
            server: ServerConfig {
                listen: file_config.server.listen,
            },
            admin: AdminConfig::from_hash(secret_hash),
            checkout: CheckoutConfig {
                session_ttl: Duration::from_secs(file_config.checkout.session_ttl_secs),
                sweep_interval: Duration::from_secs(file_config.checkout.sweep_interval_secs),
            },
        }
    }
}

/// Get the database URL from the environment.
pub fn get_database_url() -> Result<String, ConfigError> {
    std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp_config(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("courseflow-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_plaintext_secret_is_hashed_and_persisted() {
        let path = write_temp_config(
            "[server]\nlisten = \"127.0.0.1:3000\"\n\n[admin]\nsecret = \"open-sesame\"\n",
        );
        let loader = ConfigLoader::new(&path, Some("127.0.0.1:4000".parse().unwrap()));

        let loaded = loader.load().unwrap();
        assert!(loaded.admin.verify_secret("open-sesame"));
        assert!(!loaded.admin.verify_secret("wrong"));
        assert_eq!(loaded.server.listen.port(), 4000);
        assert_eq!(loaded.checkout.session_ttl, Duration::from_secs(3600));

        let rewritten: FileConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(rewritten.is_admin_secret_hashed());
        assert_eq!(rewritten.admin.secret, loaded.admin.secret_hash());
        assert_eq!(rewritten.server.listen.port(), 3000);

        // a second load keeps the existing hash
        let reloaded = loader.reload().unwrap();
        assert_eq!(reloaded.admin.secret_hash(), loaded.admin.secret_hash());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let path = write_temp_config(
            "[admin]\nsecret = \"s\"\n\n[checkout]\nsession_ttl_secs = 0\n",
        );
        let result = ConfigLoader::new(&path, None).load();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigLoader::new("/nonexistent/courseflow.toml", None).load();
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
