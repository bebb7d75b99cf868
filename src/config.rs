use std::env;
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";
pub const DEFAULT_API_BASE_URL: &str = "https://api.anthropic.com";

#[derive(Clone, Debug)]
pub struct Config {
    pub anthropic_api_key: SecretString,
    pub anthropic_model: String,
    pub anthropic_api_base_url: String,
    pub model_timeout_secs: u64,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: String,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a local `.env` file.
    pub fn from_env() -> Self {
        Self {
            anthropic_api_key: SecretString::from(
                env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
            ),
            anthropic_model: env::var("ANTHROPIC_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            anthropic_api_base_url: env::var("ANTHROPIC_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            model_timeout_secs: env::var("MODEL_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(120),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or(10 * 1024 * 1024),
        }
    }

    /// Rejects configuration the service cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        if self.anthropic_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ConfigError(
                "ANTHROPIC_API_KEY is not set. Add it to the environment or a local .env file."
                    .to_string(),
            ));
        }

        if self.model_timeout_secs == 0 {
            return Err(AppError::ConfigError(
                "MODEL_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        if self.max_upload_bytes == 0 {
            return Err(AppError::ConfigError(
                "MAX_UPLOAD_BYTES must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn test_config() -> Self {
        Self {
            anthropic_api_key: SecretString::from("test-api-key".to_string()),
            anthropic_model: DEFAULT_MODEL.to_string(),
            anthropic_api_base_url: "http://127.0.0.1:9".to_string(),
            model_timeout_secs: 5,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8000,
            cors_allowed_origin: "http://localhost:3000".to_string(),
            upload_dir: env::temp_dir().join("weekli-test-uploads"),
            max_upload_bytes: 1024 * 1024,
        }
    }
}
