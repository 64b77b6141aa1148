use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;

/// Minimum accepted length of the token signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Longest accepted token lifetime (one year).
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("auth.jwt_secret is empty (set it in the config file or STOCKROOM_JWT_SECRET)")]
    MissingSecret,

    #[error("auth.jwt_secret must be at least {} bytes", MIN_SECRET_LEN)]
    WeakSecret,

    #[error(
        "auth.token_ttl_hours is {0}, must be between 1 and {max}",
        max = MAX_TOKEN_TTL_HOURS
    )]
    InvalidTokenTtl(i64),

    #[error("storage.backend is postgres but no postgres_url / DATABASE_URL was given")]
    MissingDatabaseUrl,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default directive; `RUST_LOG` replaces the whole filter when set
    #[serde(default = "default_log_level")]
    pub level: String,
    pub dir: String,
    pub file: String,
    #[serde(default)]
    pub json: bool,
    #[serde(default)]
    pub rotation: Rotation,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: "./logs".to_string(),
            file: "stockroom.log".to_string(),
            json: false,
            rotation: Rotation::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_body_limit() -> usize {
    crate::gateway::DEFAULT_BODY_LIMIT_BYTES
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    #[serde(default)]
    pub postgres_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            postgres_url: None,
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    #[serde(default)]
    pub argon2: Argon2Config,
}

fn default_token_ttl_hours() -> i64 {
    24
}

impl AuthConfig {
    /// Token lifetime as a duration, rejecting values outside 1..=MAX_TOKEN_TTL_HOURS
    pub fn token_validity(&self) -> Result<chrono::Duration, ConfigError> {
        let hours = self.token_ttl_hours;
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&hours) {
            return Err(ConfigError::InvalidTokenTtl(hours));
        }
        chrono::Duration::try_hours(hours).ok_or(ConfigError::InvalidTokenTtl(hours))
    }
}

// Keeps the signing secret out of logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("argon2", &self.argon2)
            .finish()
    }
}

/// Argon2id cost parameters
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Config {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for Argon2Config {
    fn default() -> Self {
        // argon2 crate defaults (OWASP minimum for Argon2id)
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl AppConfig {
    /// Load `config/<env>.yaml`, apply environment overrides and validate.
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
            path: config_path.clone(),
            source,
        })?;
        let mut config = Self::from_yaml_str(&content)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// `STOCKROOM_JWT_SECRET` and `DATABASE_URL` win over the file values.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(secret) = lookup("STOCKROOM_JWT_SECRET").filter(|s| !s.is_empty()) {
            self.auth.jwt_secret = secret;
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|s| !s.is_empty()) {
            self.storage.postgres_url = Some(url);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if self.auth.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::WeakSecret);
        }
        self.auth.token_validity()?;
        if self.storage.backend == StorageBackend::Postgres && self.storage.postgres_url.is_none()
        {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
logging:
  level: info
  dir: ./logs
  file: stockroom.log
  rotation: hourly
gateway:
  host: 127.0.0.1
  port: 8080
storage:
  backend: postgres
auth:
  token_ttl_hours: 12
"#;

    #[test]
    fn test_parse_with_defaults() {
        let config = AppConfig::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.logging.rotation, Rotation::Hourly);
        assert!(!config.logging.json);
        assert_eq!(config.gateway.body_limit_bytes, 64 * 1024);
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(config.storage.max_connections, 10);
        assert_eq!(config.auth.token_ttl_hours, 12);
        assert_eq!(config.auth.argon2, Argon2Config::default());
    }

    #[test]
    fn test_logging_section_is_optional() {
        let config = AppConfig::from_yaml_str(
            r#"
gateway:
  host: 127.0.0.1
  port: 8080
auth:
  jwt_secret: kkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkk
"#,
        )
        .unwrap();
        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let mut config = AppConfig::from_yaml_str(SAMPLE).unwrap();
        config.storage.postgres_url = Some("postgresql://localhost/x".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::MissingSecret)));

        config.auth.jwt_secret = "short".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::WeakSecret)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::from_yaml_str(SAMPLE).unwrap();
        config.apply_overrides(|key| match key {
            "STOCKROOM_JWT_SECRET" => Some("k".repeat(MIN_SECRET_LEN)),
            "DATABASE_URL" => Some("postgresql://db/stockroom".to_string()),
            _ => None,
        });
        assert_eq!(
            config.storage.postgres_url.as_deref(),
            Some("postgresql://db/stockroom")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_postgres_requires_url() {
        let mut config = AppConfig::from_yaml_str(SAMPLE).unwrap();
        config.auth.jwt_secret = "k".repeat(MIN_SECRET_LEN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingDatabaseUrl)
        ));

        config.storage.backend = StorageBackend::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_token_ttl_must_be_in_range() {
        let mut config = AppConfig::from_yaml_str(SAMPLE).unwrap();
        config.auth.jwt_secret = "k".repeat(MIN_SECRET_LEN);
        config.storage.backend = StorageBackend::Memory;

        for bad in [0, -5, MAX_TOKEN_TTL_HOURS + 1, i64::MAX / 1000] {
            config.auth.token_ttl_hours = bad;
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidTokenTtl(h)) if h == bad),
                "ttl {bad} accepted"
            );
        }

        config.auth.token_ttl_hours = MAX_TOKEN_TTL_HOURS;
        assert!(config.validate().is_ok());
        config.auth.token_ttl_hours = 1;
        assert_eq!(
            config.auth.token_validity().unwrap(),
            chrono::Duration::hours(1)
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let mut config = AppConfig::from_yaml_str(SAMPLE).unwrap();
        config.auth.jwt_secret = "super-secret-value".to_string();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-value"));
        assert!(rendered.contains("<redacted>"));
    }
}
