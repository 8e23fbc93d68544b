//! Environment-driven application configuration.

use std::env;
use std::time::Duration;

use crate::domain::DEFAULT_PRESIGN_TTL;

/// Configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is unset.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    /// An environment variable is set but unusable.
    #[error("invalid value for {name}: {reason}")]
    Invalid {
        name: &'static str,
        reason: String,
    },
}

/// MongoDB connection settings.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// Connection string.
    pub uri: String,
    /// Database name.
    pub database: String,
}

/// SMTP relay settings.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    /// Use implicit TLS; cleartext with the relay otherwise.
    pub secure: bool,
    pub username: String,
    pub password: String,
    /// Sender address, e.g. `Acme <no-reply@acme.example>`.
    pub from: String,
}

/// S3 bucket settings.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub region: String,
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Custom endpoint for S3-compatible stores; AWS default when unset.
    pub endpoint: Option<String>,
}

/// Full application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP bind port.
    pub port: u16,
    pub mongo: MongoConfig,
    pub mail: MailConfig,
    pub storage: StorageConfig,
    /// Lifetime of minted document retrieval URLs.
    pub presign_ttl: Duration,
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parsed<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|err: T::Err| ConfigError::Invalid {
        name,
        reason: err.to_string(),
    })
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// A required variable is unset or fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("PORT") {
            Ok(raw) => parsed("PORT", &raw)?,
            Err(_) => 8080,
        };

        let mail_port = match env::var("EMAIL_PORT") {
            Ok(raw) => parsed("EMAIL_PORT", &raw)?,
            Err(_) => 587,
        };
        let secure = env::var("EMAIL_SECURE").is_ok_and(|raw| raw == "true" || raw == "1");

        let presign_ttl = match env::var("PRESIGN_TTL_SECS") {
            Ok(raw) => Duration::from_secs(parsed("PRESIGN_TTL_SECS", &raw)?),
            Err(_) => DEFAULT_PRESIGN_TTL,
        };

        Ok(Self {
            port,
            mongo: MongoConfig {
                uri: required("MONGODB_URI")?,
                database: required("MONGODB_DB")?,
            },
            mail: MailConfig {
                host: required("EMAIL_HOST")?,
                port: mail_port,
                secure,
                username: required("MAIL_USER")?,
                password: required("MAIL_PASS")?,
                from: required("MAIL_FROM")?,
            },
            storage: StorageConfig {
                region: required("AWS_REGION")?,
                bucket: required("AWS_BUCKET_NAME")?,
                access_key_id: required("AWS_ACCESS_KEY_ID")?,
                secret_access_key: required("AWS_SECRET_ACCESS_KEY")?,
                endpoint: env::var("AWS_ENDPOINT_URL").ok(),
            },
            presign_ttl,
        })
    }
}
