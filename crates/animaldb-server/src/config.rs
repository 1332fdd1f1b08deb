//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default database URL for local development.
pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/animaldb_api";

/// Default maximum database connections in the pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

/// Default minimum database connections in the pool.
pub const DEFAULT_DATABASE_MIN_CONNECTIONS: u32 = 0;

/// Default database connection timeout in seconds.
pub const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default database idle timeout in seconds.
pub const DEFAULT_DATABASE_IDLE_TIMEOUT_SECS: u64 = 10;

/// Default directory served as static files.
pub const DEFAULT_PUBLIC_DIR: &str = "./public";

/// URL prefix (and sub-directory of the public dir) for uploaded images.
pub const IMAGE_PREFIX: &str = "/img/";

/// Default request body limit for uploads (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Default CORS allowed origin.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "*";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub uploads: UploadConfig,
    pub cors: CorsConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

/// What an update does to the stored image when the request carries no file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UpdateImagePolicy {
    /// Store an empty image reference, dropping the previous one
    #[default]
    Clear,
    /// Keep whatever image reference is already stored
    Preserve,
}

impl std::str::FromStr for UpdateImagePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clear" => Ok(Self::Clear),
            "preserve" | "keep" => Ok(Self::Preserve),
            _ => Err(anyhow::anyhow!("Invalid update image policy: {}", s)),
        }
    }
}

/// Upload and static file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Root of the statically served tree; images land in `<public_dir>/img`
    pub public_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub update_image_policy: UpdateImagePolicy,
}

impl UploadConfig {
    /// Directory uploaded images are written to
    pub fn image_dir(&self) -> PathBuf {
        self.public_dir.join(IMAGE_PREFIX.trim_matches('/'))
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from `.env`, the environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let update_image_policy = match std::env::var("ANIMALDB_UPDATE_IMAGE_POLICY") {
            Ok(value) => value.parse()?,
            Err(_) => UpdateImagePolicy::default(),
        };

        let config = Config {
            server: ServerConfig {
                host: std::env::var("ANIMALDB_HOST")
                    .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                port: env_or("ANIMALDB_PORT", DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: env_or(
                    "ANIMALDB_SHUTDOWN_TIMEOUT",
                    DEFAULT_SHUTDOWN_TIMEOUT_SECS,
                ),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                max_connections: env_or(
                    "DATABASE_MAX_CONNECTIONS",
                    DEFAULT_DATABASE_MAX_CONNECTIONS,
                ),
                min_connections: env_or(
                    "DATABASE_MIN_CONNECTIONS",
                    DEFAULT_DATABASE_MIN_CONNECTIONS,
                ),
                connect_timeout_secs: env_or(
                    "DATABASE_CONNECT_TIMEOUT",
                    DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
                ),
                idle_timeout_secs: env_or(
                    "DATABASE_IDLE_TIMEOUT",
                    DEFAULT_DATABASE_IDLE_TIMEOUT_SECS,
                ),
            },
            uploads: UploadConfig {
                public_dir: std::env::var("ANIMALDB_PUBLIC_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_PUBLIC_DIR)),
                max_upload_bytes: env_or("ANIMALDB_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
                update_image_policy,
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_CORS_ALLOWED_ORIGIN.to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: env_or("CORS_ALLOW_CREDENTIALS", false),
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.database.url.is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("Database max_connections must be greater than 0");
        }

        if self.database.min_connections > self.database.max_connections {
            anyhow::bail!(
                "Database min_connections ({}) cannot be greater than max_connections ({})",
                self.database.min_connections,
                self.database.max_connections
            );
        }

        if self.uploads.public_dir.as_os_str().is_empty() {
            anyhow::bail!("Public directory cannot be empty");
        }

        if self.uploads.max_upload_bytes == 0 {
            anyhow::bail!("Upload limit must be greater than 0");
        }

        // Browsers reject a wildcard origin combined with credentials.
        if self.cors.allow_credentials
            && (self.cors.allowed_origins.is_empty()
                || self.cors.allowed_origins.iter().any(|o| o == "*"))
        {
            anyhow::bail!("CORS credentials require an explicit list of allowed origins");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
                min_connections: DEFAULT_DATABASE_MIN_CONNECTIONS,
                connect_timeout_secs: DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
                idle_timeout_secs: DEFAULT_DATABASE_IDLE_TIMEOUT_SECS,
            },
            uploads: UploadConfig {
                public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
                max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
                update_image_policy: UpdateImagePolicy::Clear,
            },
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
                allow_credentials: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.uploads.update_image_policy, UpdateImagePolicy::Clear);
    }

    #[test]
    fn test_image_dir_under_public_dir() {
        let config = Config::default();
        assert_eq!(config.uploads.image_dir(), PathBuf::from("./public/img"));
    }

    #[test]
    fn test_update_image_policy_from_str() {
        assert_eq!("clear".parse::<UpdateImagePolicy>().unwrap(), UpdateImagePolicy::Clear);
        assert_eq!(
            " Preserve ".parse::<UpdateImagePolicy>().unwrap(),
            UpdateImagePolicy::Preserve
        );
        assert!("sometimes".parse::<UpdateImagePolicy>().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_min_above_max_connections() {
        let mut config = Config::default();
        config.database.min_connections = 10;
        config.database.max_connections = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_wildcard_with_credentials() {
        let mut config = Config::default();
        config.cors.allow_credentials = true;
        assert!(config.validate().is_err());

        config.cors.allowed_origins = vec!["http://localhost:8080".to_string()];
        assert!(config.validate().is_ok());
    }
}
