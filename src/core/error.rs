use thiserror::Error;

/// Per-invocation failures. Every expected failure mode of a tool call ends up
/// here and travels back to the caller as data, never as a transport fault.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvocationError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    #[error("Invalid type for argument '{name}': expected {expected}")]
    InvalidArgumentType { name: String, expected: &'static str },

    #[error("Unknown model '{requested}'. Valid models: {valid}")]
    UnknownModel { requested: String, valid: String },

    #[error("{provider} API error: {message}")]
    Provider { provider: String, message: String },
}

impl InvocationError {
    /// Stable kind label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            InvocationError::UnknownTool(_) => "unknown_tool",
            InvocationError::MissingArgument(_) => "missing_argument",
            InvocationError::InvalidArgumentType { .. } => "invalid_argument_type",
            InvocationError::UnknownModel { .. } => "unknown_model",
            InvocationError::Provider { .. } => "provider",
        }
    }
}

/// Startup and configuration failures. These are fatal: the gateway exits
/// without serving a single request.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("missing API key: set {0} in the environment")]
    MissingApiKey(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
