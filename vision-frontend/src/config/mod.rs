use crate::services::service_account::ServiceAccount;
use secrecy::Secret;
use serde::Deserialize;
use service_core::config::load_configuration;

#[derive(Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub vision: VisionSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Annotation service settings.
///
/// Credentials default to empty so the server still starts and answers
/// health probes without them; annotate requests then fail at
/// authentication time.
#[derive(Deserialize, Clone)]
pub struct VisionSettings {
    /// Service account email used as the JWT issuer.
    #[serde(default)]
    pub service_account: String,
    /// PEM-encoded RSA private key of the service account.
    #[serde(default = "empty_secret")]
    pub private_key: Secret<String>,
    /// Custom label model URI queried alongside generic label detection.
    #[serde(default)]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
    /// Cap applied to both feature requests.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for VisionSettings {
    fn default() -> Self {
        Self {
            service_account: String::new(),
            private_key: empty_secret(),
            model: String::new(),
            endpoint: default_endpoint(),
            token_url: default_token_url(),
            scopes: default_scopes(),
            max_results: default_max_results(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl VisionSettings {
    pub fn service_account(&self) -> ServiceAccount {
        ServiceAccount {
            client_email: self.service_account.clone(),
            private_key: self.private_key.clone(),
        }
    }
}

#[derive(Deserialize, Clone)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP collector; traces are only exported when this is set.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

pub fn default_endpoint() -> String {
    "https://alpha-vision.googleapis.com/v1/images:annotate".to_string()
}

pub fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

pub fn default_scopes() -> Vec<String> {
    vec![
        "https://www.googleapis.com/auth/cloud-platform".to_string(),
        "https://www.googleapis.com/auth/cloud-vision".to_string(),
    ]
}

fn default_max_results() -> u32 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    load_configuration("vision-frontend")
}
