//! Configuration for the S3 store client.
//!
//! Values are provided explicitly or loaded from the standard AWS environment
//! variables. Secrets have no defaults.

use crate::error::StoreError;

/// Connection settings for an S3 or S3-compatible store.
#[derive(Debug, Clone)]
pub struct S3StoreConfig {
    /// AWS access key ID (required).
    pub access_key_id: String,
    /// AWS secret access key (required).
    pub secret_access_key: String,
    /// Session token for temporary credentials.
    pub session_token: Option<String>,
    /// Region, e.g. `us-east-1`.
    pub region: String,
    /// Custom endpoint for S3-compatible services.
    pub endpoint: Option<String>,
    /// Address buckets by path instead of virtual host.
    pub force_path_style: bool,
}

impl S3StoreConfig {
    /// Create a configuration with static credentials.
    pub fn new(access_key_id: &str, secret_access_key: &str, region: &str) -> Self {
        Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            session_token: None,
            region: region.to_string(),
            endpoint: None,
            force_path_style: false,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - AWS_ACCESS_KEY_ID
    /// - AWS_SECRET_ACCESS_KEY
    /// - AWS_REGION
    ///
    /// Optional:
    /// - AWS_SESSION_TOKEN
    /// - AWS_S3_ENDPOINT (for S3-compatible services)
    /// - AWS_S3_FORCE_PATH_STYLE (`true` or `1`)
    pub fn from_env() -> Result<Self, StoreError> {
        let access_key = required_var("AWS_ACCESS_KEY_ID")?;
        let secret_key = required_var("AWS_SECRET_ACCESS_KEY")?;
        let region = required_var("AWS_REGION")?;

        let mut config = Self::new(&access_key, &secret_key, &region);

        if let Ok(token) = std::env::var("AWS_SESSION_TOKEN") {
            if !token.is_empty() {
                config = config.session_token(&token);
            }
        }

        if let Ok(endpoint) = std::env::var("AWS_S3_ENDPOINT") {
            if !endpoint.is_empty() {
                config = config.endpoint(&endpoint);
            }
        }

        if let Ok(flag) = std::env::var("AWS_S3_FORCE_PATH_STYLE") {
            config = config.force_path_style(parse_flag(&flag));
        }

        Ok(config)
    }

    /// Set the session token.
    pub fn session_token(mut self, token: &str) -> Self {
        self.session_token = Some(token.to_string());
        self
    }

    /// Set a custom endpoint URL.
    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_string());
        self
    }

    /// Set whether to use path-style addressing.
    pub fn force_path_style(mut self, force: bool) -> Self {
        self.force_path_style = force;
        self
    }
}

fn required_var(name: &str) -> Result<String, StoreError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(StoreError::config(format!(
            "{} environment variable is required",
            name
        ))),
    }
}

/// Interprets `true`/`1`/`yes` (any case) as enabled.
pub(crate) fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}
