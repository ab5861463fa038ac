//! Application configuration for Tokyon.
//!
//! User config lives at `~/.tokyon/tokyon.toml`.
//! CLI flags override config file values, which override defaults.
//! Secrets never live in the file: it only names the environment
//! variables that hold them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, TokyonError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "tokyon.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".tokyon";

// ---------------------------------------------------------------------------
// Config structs (matching tokyon.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Pipefy (lead pipeline) settings.
    #[serde(default)]
    pub pipefy: PipefyConfig,

    /// Hosted consultant model settings.
    #[serde(default)]
    pub consultant: ConsultantConfig,

    /// Portfolio CMS settings.
    #[serde(default)]
    pub content: ContentConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8787
}

/// `[pipefy]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipefyConfig {
    /// GraphQL endpoint.
    #[serde(default = "default_pipefy_endpoint")]
    pub endpoint: Url,

    /// Name of the env var holding the bearer token.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Name of the env var holding the target pipe id.
    #[serde(default = "default_pipe_id_env")]
    pub pipe_id_env: String,

    /// Per-request timeout for discovery and creation calls.
    #[serde(default = "default_pipefy_timeout")]
    pub timeout_secs: u64,
}

impl Default for PipefyConfig {
    fn default() -> Self {
        Self {
            endpoint: default_pipefy_endpoint(),
            token_env: default_token_env(),
            pipe_id_env: default_pipe_id_env(),
            timeout_secs: default_pipefy_timeout(),
        }
    }
}

fn default_pipefy_endpoint() -> Url {
    Url::parse("https://api.pipefy.com/graphql").expect("static pipefy endpoint")
}
fn default_token_env() -> String {
    "PIPEFY_TOKEN".into()
}
fn default_pipe_id_env() -> String {
    "PIPEFY_PIPE_ID".into()
}
fn default_pipefy_timeout() -> u64 {
    15
}

/// `[consultant]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultantConfig {
    /// Base URL of the generative model API.
    #[serde(default = "default_consultant_endpoint")]
    pub endpoint: Url,

    /// Name of the env var holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Per-request timeout.
    #[serde(default = "default_consultant_timeout")]
    pub timeout_secs: u64,
}

impl Default for ConsultantConfig {
    fn default() -> Self {
        Self {
            endpoint: default_consultant_endpoint(),
            api_key_env: default_api_key_env(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_consultant_timeout(),
        }
    }
}

fn default_consultant_endpoint() -> Url {
    Url::parse("https://generativelanguage.googleapis.com").expect("static consultant endpoint")
}
fn default_api_key_env() -> String {
    "API_KEY".into()
}
fn default_model() -> String {
    "gemini-2.5-flash".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_consultant_timeout() -> u64 {
    30
}

impl ConsultantConfig {
    /// Read the API key from the configured env var. Empty counts as absent.
    pub fn api_key(&self) -> Option<String> {
        non_empty(std::env::var(&self.api_key_env).ok())
    }
}

/// `[content]` section.
///
/// Without a `project_id` the portfolio is served from the bundled cases only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Sanity project id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Sanity dataset.
    #[serde(default = "default_dataset")]
    pub dataset: String,

    /// Query API version, as it appears in the URL path.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Query host override. Defaults to `https://{project_id}.api.sanity.io`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Url>,

    /// Per-request timeout. Kept short: the bundled cases are the fallback.
    #[serde(default = "default_content_timeout")]
    pub timeout_secs: u64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            dataset: default_dataset(),
            api_version: default_api_version(),
            endpoint: None,
            timeout_secs: default_content_timeout(),
        }
    }
}

fn default_dataset() -> String {
    "production".into()
}
fn default_api_version() -> String {
    "v2024-03-01".into()
}
fn default_content_timeout() -> u64 {
    5
}

impl ContentConfig {
    /// Base URL of the query API, if a CMS is configured.
    pub fn cms_endpoint(&self) -> Result<Option<Url>> {
        if let Some(endpoint) = &self.endpoint {
            return Ok(Some(endpoint.clone()));
        }
        let Some(project_id) = non_empty(self.project_id.clone()) else {
            return Ok(None);
        };
        Url::parse(&format!("https://{project_id}.api.sanity.io"))
            .map(Some)
            .map_err(|e| TokyonError::config(format!("invalid content project id: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Pipefy credentials (runtime, resolved from the environment)
// ---------------------------------------------------------------------------

/// Bearer token and target pipe, resolved from the environment.
#[derive(Clone)]
pub struct PipefyCredentials {
    /// API token sent as `Authorization: Bearer`.
    pub token: String,
    /// Pipe (collection) that receives new cards.
    pub pipe_id: String,
}

impl std::fmt::Debug for PipefyCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipefyCredentials")
            .field("token", &"<redacted>")
            .field("pipe_id", &self.pipe_id)
            .finish()
    }
}

impl PipefyCredentials {
    /// Resolve credentials from the process environment.
    pub fn from_env(config: &PipefyConfig) -> Option<Self> {
        Self::from_lookup(config, |name| std::env::var(name).ok())
    }

    /// Resolve credentials through an arbitrary variable lookup.
    /// Returns `None` if either value is missing or empty.
    pub fn from_lookup(
        config: &PipefyConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<Self> {
        let token = non_empty(lookup(&config.token_env));
        let pipe_id = non_empty(lookup(&config.pipe_id_env));

        match (token, pipe_id) {
            (Some(token), Some(pipe_id)) => Some(Self { token, pipe_id }),
            (token, pipe_id) => {
                tracing::warn!(
                    token_env = %config.token_env,
                    token_set = token.is_some(),
                    pipe_id_env = %config.pipe_id_env,
                    pipe_id_set = pipe_id.is_some(),
                    "pipefy credentials incomplete"
                );
                None
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.tokyon/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| TokyonError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.tokyon/tokyon.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| TokyonError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| TokyonError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| TokyonError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| TokyonError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| TokyonError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
