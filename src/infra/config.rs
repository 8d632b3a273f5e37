use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::core::error::GatewayError;

pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// MCP over stdin/stdout.
    Stdio,
    /// HTTP: streamable MCP at `/mcp` plus the REST shim.
    Server,
}

impl FromStr for Mode {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "stdio" => Ok(Mode::Stdio),
            "server" => Ok(Mode::Server),
            other => Err(GatewayError::InvalidConfig(format!(
                "Invalid MODE: {other}. Must be 'server' or 'stdio'"
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Stdio => "stdio",
            Mode::Server => "server",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub connect_timeout_ms: u64,
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            connect_timeout_ms: 5_000,
            timeout_ms: 300_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub port: u16,
    pub api_key: Option<String>,
    pub provider: ProviderConfig,
    pub log_dir: Option<PathBuf>,
    pub debug: bool,
}

/// Optional TOML overlay named by `CONFIG_FILE`. Environment wins over it.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    mode: Option<String>,
    port: Option<u16>,
    log_dir: Option<PathBuf>,
    debug: Option<bool>,
    provider: FileProvider,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileProvider {
    base_url: Option<String>,
    connect_timeout_ms: Option<u64>,
    timeout_ms: Option<u64>,
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn truthy(v: &str) -> bool {
    !matches!(v.trim().to_ascii_lowercase().as_str(), "" | "0" | "false" | "no" | "off")
}

impl Config {
    pub fn from_env() -> Result<Self, GatewayError> {
        let file = match env_nonempty("CONFIG_FILE") {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .map_err(|source| GatewayError::ConfigRead { path: path.clone(), source })?;
                Some(text)
            }
            None => None,
        };
        Self::from_env_and_toml(file.as_deref())
    }

    pub fn from_env_and_toml(toml_text: Option<&str>) -> Result<Self, GatewayError> {
        let file: FileConfig = match toml_text {
            Some(text) => toml::from_str(text).map_err(|e| GatewayError::InvalidConfig(e.to_string()))?,
            None => FileConfig::default(),
        };

        let mode = env_nonempty("MODE")
            .or(file.mode)
            .map(|m| m.parse::<Mode>())
            .transpose()?
            .unwrap_or(Mode::Stdio);
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .or(file.port)
            .unwrap_or(8080);
        let debug = std::env::var("DEBUG")
            .ok()
            .map(|v| truthy(&v))
            .or(file.debug)
            .unwrap_or(false);

        let defaults = ProviderConfig::default();
        let provider = ProviderConfig {
            base_url: env_nonempty("OPENROUTER_BASE_URL")
                .or(file.provider.base_url)
                .unwrap_or(defaults.base_url),
            connect_timeout_ms: file.provider.connect_timeout_ms.unwrap_or(defaults.connect_timeout_ms),
            timeout_ms: file.provider.timeout_ms.unwrap_or(defaults.timeout_ms),
        };

        Ok(Self {
            mode,
            port,
            api_key: env_nonempty(API_KEY_ENV),
            provider,
            log_dir: env_nonempty("LOG_DIR").map(PathBuf::from).or(file.log_dir),
            debug,
        })
    }

    /// The outbound API key; its absence is fatal for serving.
    pub fn require_api_key(&self) -> Result<&str, GatewayError> {
        self.api_key.as_deref().ok_or(GatewayError::MissingApiKey(API_KEY_ENV))
    }

    /// Per-user log directory: `LOG_DIR` or `~/.pair-mcp-gateway/logs`.
    pub fn resolved_log_dir(&self) -> Option<PathBuf> {
        self.log_dir
            .clone()
            .or_else(|| dirs::home_dir().map(|h| h.join(".pair-mcp-gateway").join("logs")))
    }
}
