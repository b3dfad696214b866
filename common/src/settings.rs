use secrecy::Secret;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL of the backend API, e.g. `http://127.0.0.1:8000/api`.
    pub base_url: String,
    /// Request timeout, in seconds.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialSettings {
    /// A bearer token given directly in the configuration. Never printed.
    #[serde(default, skip_serializing)]
    pub token: Option<Secret<String>>,
    /// Environment variable read at request time when no token is configured.
    pub env_var: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewSettings {
    /// Clean structured content with an allow-list before rendering the preview.
    #[serde(default)]
    pub sanitize: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracingSettings {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub backend: BackendSettings,
    pub credential: CredentialSettings,
    #[serde(default)]
    pub preview: PreviewSettings,
    pub tracing: TracingSettings,
    pub mode: String,
}
