pub mod rules;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// --- Types (wire contract of POST /generate) ---

/// Detail message returned when a request arrives without a credential.
pub const MISSING_KEY_DETAIL: &str = "API Key is missing";

/// Starter diagram shown before anything has been generated.
pub const INITIAL_DIAGRAM: &str = "graph TD\n A[Start] --> B[Your Flowchart]";

/// A process description plus the provider credential it should be generated with.
///
/// Serialized as `{"text": ..., "api_key": ...}`. A missing `api_key` decodes as empty
/// so the service can answer with its own "missing key" error.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationRequest {
    #[serde(rename = "text")]
    pub description: String,
    #[serde(rename = "api_key", default)]
    pub credential: String,
}

impl GenerationRequest {
    pub fn new(description: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            credential: credential.into(),
        }
    }

    pub fn has_credential(&self) -> bool {
        !self.credential.is_empty()
    }
}

// Hand-written so the credential never ends up in logs.
impl fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("description", &self.description)
            .field("credential", &if self.credential.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// Mermaid diagram source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagramSource(String);

impl DiagramSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DiagramSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DiagramSource {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for DiagramSource {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationResponse {
    pub mermaid_code: DiagramSource,
}

/// Error body for every non-200 answer of the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

// --- Export ---

/// Prefix of a mermaid.live editor deep link carrying base64 state in the fragment.
pub const LIVE_EDITOR_URL: &str = "https://mermaid.live/edit#base64:";

/// Build a mermaid.live link that opens `source` with the default theme.
pub fn export_link(source: &DiagramSource) -> String {
    let state = serde_json::json!({
        "code": source.as_str(),
        "mermaid": { "theme": "default" },
    });
    format!("{LIVE_EDITOR_URL}{}", STANDARD.encode(state.to_string()))
}

// --- Settings ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceSettings {
    pub host: String,
    pub port: u16,
    pub model: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            model: "llama-3.1-8b-instant".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientSettings {
    pub base_url: String,
    pub render_base_url: String,
    pub render_height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_path: Option<PathBuf>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            render_base_url: "https://mermaid.ink".to_string(),
            render_height: 400,
            preview_path: None,
        }
    }
}

impl ClientSettings {
    pub fn preview_path(&self) -> PathBuf {
        self.preview_path
            .clone()
            .unwrap_or_else(|| settings_dir().join("preview.svg"))
    }
}

/// Contents of `~/.autograph/settings.json`. Credentials are never stored here.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub service: ServiceSettings,
    pub client: ClientSettings,
}

/// Resolve the settings directory (~/.autograph/).
pub fn settings_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".autograph")
}

pub fn settings_path() -> PathBuf {
    settings_dir().join("settings.json")
}

/// Read settings, falling back to defaults when the file is missing or unreadable.
pub fn read_settings() -> Settings {
    read_settings_from(&settings_path())
}

pub fn read_settings_from(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    fs::read_to_string(path)
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}
