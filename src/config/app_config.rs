use std::env;

/// Application settings read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    /// HMAC secret shared with the source-control host
    pub webhook_secret: Option<String>,
    /// Development switch that disables signature checks
    pub skip_signature_verification: bool,
    /// JSON file holding the pipeline trigger rules
    pub trigger_rules_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 8080,
            webhook_secret: None,
            skip_signature_verification: false,
            trigger_rules_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let webhook_secret = env::var("WEBHOOK_SECRET").ok().filter(|s| !s.is_empty());
        if webhook_secret.is_none() {
            tracing::warn!("WEBHOOK_SECRET is not set; push webhooks will be refused");
        }

        let skip_signature_verification =
            env::var("WEBHOOK_SKIP_VERIFICATION").unwrap_or_default() == "true";

        let trigger_rules_path = env::var("TRIGGER_RULES_PATH").ok().filter(|s| !s.is_empty());

        Ok(Self {
            server_port,
            webhook_secret,
            skip_signature_verification,
            trigger_rules_path,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("Failed to read trigger rules from {path}: {source}")]
    RulesUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse trigger rules: {0}")]
    RulesMalformed(#[from] serde_json::Error),
    #[error("Invalid trigger rule for pipeline '{pipeline_id}': {reason}")]
    InvalidRule { pipeline_id: String, reason: String },
    #[error("Duplicate trigger rule for pipeline '{0}'")]
    DuplicateRule(String),
}
