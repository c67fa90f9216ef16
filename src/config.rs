//! Application configuration management.
//!
//! Configuration is read from environment variables (a `.env` file is loaded
//! first when present) and deserialized with `envy` into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: full PostgreSQL connection string. When absent the URL is
///   composed from `DB_HOST`, `DB_PORT`, `DB_USERNAME`, `DB_PASSWORD`,
///   `DB_NAME` and the optional `DB_PARAMS` query string.
/// - `DB_MAX_CONNECTIONS` (optional): pool size, defaults to 10
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 8080
/// - `JWT_SECRET` (required): HS256 signing key for access tokens
/// - `JWT_TTL_MINUTES` (optional): access token lifetime, defaults to 60
/// - `S3_ID`, `S3_SECRET_KEY`, `S3_BUCKET_NAME`, `S3_REGION` (optional):
///   object storage credentials for image uploads
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: Option<String>,
    pub db_host: Option<String>,
    #[serde(default = "default_db_port")]
    pub db_port: u16,
    pub db_username: Option<String>,
    pub db_password: Option<String>,
    pub db_name: Option<String>,
    pub db_params: Option<String>,

    #[serde(default = "default_max_connections")]
    pub db_max_connections: u32,

    #[serde(default = "default_port")]
    pub server_port: u16,

    pub jwt_secret: String,

    #[serde(default = "default_jwt_ttl")]
    pub jwt_ttl_minutes: i64,

    pub s3_id: Option<String>,
    pub s3_secret_key: Option<String>,
    pub s3_bucket_name: Option<String>,
    pub s3_region: Option<String>,
}

/// Object storage settings, present only when every `S3_*` variable is set.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    pub region: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Env(#[from] envy::Error),

    #[error("missing database settings: set DATABASE_URL or {0}")]
    MissingDatabase(&'static str),
}

fn default_db_port() -> u16 {
    5432
}

fn default_max_connections() -> u32 {
    10
}

fn default_port() -> u16 {
    8080
}

fn default_jwt_ttl() -> i64 {
    60
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., JWT_SECRET)
    /// - Values cannot be parsed into expected types
    /// - Neither DATABASE_URL nor the complete DB_* set is present
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        let config = envy::from_env::<Config>()?;
        config.connection_url()?;
        Ok(config)
    }

    /// PostgreSQL connection string, either given directly or composed from parts.
    pub fn connection_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = &self.database_url {
            return Ok(url.clone());
        }

        let host = self
            .db_host
            .as_deref()
            .ok_or(ConfigError::MissingDatabase("DB_HOST"))?;
        let user = self
            .db_username
            .as_deref()
            .ok_or(ConfigError::MissingDatabase("DB_USERNAME"))?;
        let password = self.db_password.as_deref().unwrap_or_default();
        let name = self
            .db_name
            .as_deref()
            .ok_or(ConfigError::MissingDatabase("DB_NAME"))?;

        let mut url = format!(
            "postgres://{}:{}@{}:{}/{}",
            user, password, host, self.db_port, name
        );
        if let Some(params) = self.db_params.as_deref().filter(|p| !p.is_empty()) {
            url.push('?');
            url.push_str(params.trim_start_matches('?'));
        }
        Ok(url)
    }

    /// Storage settings, or `None` when uploads are not configured.
    pub fn storage(&self) -> Option<StorageConfig> {
        Some(StorageConfig {
            access_key_id: self.s3_id.clone()?,
            secret_access_key: self.s3_secret_key.clone()?,
            bucket: self.s3_bucket_name.clone()?,
            region: self.s3_region.clone()?,
        })
    }
}

#[cfg(test)]
impl Config {
    /// Minimal configuration for tests that never touch the environment.
    pub fn for_tests() -> Self {
        Self {
            database_url: Some("postgres://localhost/marketplace_test".to_string()),
            db_host: None,
            db_port: default_db_port(),
            db_username: None,
            db_password: None,
            db_name: None,
            db_params: None,
            db_max_connections: default_max_connections(),
            server_port: default_port(),
            jwt_secret: "test-secret".to_string(),
            jwt_ttl_minutes: default_jwt_ttl(),
            s3_id: None,
            s3_secret_key: None,
            s3_bucket_name: None,
            s3_region: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_database_url_wins() {
        let config = Config::for_tests();
        assert_eq!(
            config.connection_url().unwrap(),
            "postgres://localhost/marketplace_test"
        );
    }

    #[test]
    fn url_is_composed_from_parts() {
        let config = Config {
            database_url: None,
            db_host: Some("db".into()),
            db_port: 5433,
            db_username: Some("market".into()),
            db_password: Some("secret".into()),
            db_name: Some("shop".into()),
            db_params: Some("sslmode=disable".into()),
            ..Config::for_tests()
        };

        assert_eq!(
            config.connection_url().unwrap(),
            "postgres://market:secret@db:5433/shop?sslmode=disable"
        );
    }

    #[test]
    fn missing_host_is_reported() {
        let config = Config {
            database_url: None,
            ..Config::for_tests()
        };

        let err = config.connection_url().unwrap_err();
        assert!(err.to_string().contains("DB_HOST"));
    }

    #[test]
    fn storage_requires_every_field() {
        let mut config = Config::for_tests();
        assert!(config.storage().is_none());

        config.s3_id = Some("id".into());
        config.s3_secret_key = Some("key".into());
        config.s3_bucket_name = Some("bucket".into());
        assert!(config.storage().is_none());

        config.s3_region = Some("ap-southeast-1".into());
        let storage = config.storage().unwrap();
        assert_eq!(storage.bucket, "bucket");
        assert_eq!(storage.region, "ap-southeast-1");
    }
}
