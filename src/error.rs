//! Error types for the paneer game client

use thiserror::Error;
use std::collections::HashMap;

use crate::game::GamePhase;

/// Main error type for the paneer game client
#[derive(Debug, Error)]
pub enum GameClientError {
    #[error("Network error: {source}")]
    Network {
        source: NetworkError,
        context: String,
    },

    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: String,
    },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("No bearer token available")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Amusement not found: {0}")]
    AmusementNotFound(String),

    #[error("Invalid game transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: GamePhase,
        to: GamePhase,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Network-specific error types
#[derive(Debug, Clone, Error)]
pub enum NetworkError {
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Request timeout: {duration_ms}ms")]
    RequestTimeout { duration_ms: u64 },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Backend error ({status}): {message}")]
    BackendError { status: u16, message: String },
}

// Manual From implementations for external error types
impl From<NetworkError> for GameClientError {
    fn from(err: NetworkError) -> Self {
        GameClientError::Network {
            source: err,
            context: String::new(),
        }
    }
}

impl From<reqwest::Error> for GameClientError {
    fn from(err: reqwest::Error) -> Self {
        let source = if err.is_timeout() {
            NetworkError::RequestTimeout { duration_ms: 0 }
        } else {
            NetworkError::ConnectionFailed {
                message: err.to_string(),
            }
        };
        GameClientError::Network {
            source,
            context: String::new(),
        }
    }
}

impl From<serde_json::Error> for GameClientError {
    fn from(err: serde_json::Error) -> Self {
        GameClientError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<base64::DecodeError> for GameClientError {
    fn from(err: base64::DecodeError) -> Self {
        GameClientError::InvalidToken(format!("payload segment is not base64url: {}", err))
    }
}

/// Error context for tracking errors through the session flow
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub correlation_id: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub component: String,
    pub operation: String,
    pub metadata: HashMap<String, String>,
}

impl ErrorContext {
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            correlation_id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now(),
            component: component.to_string(),
            operation: operation.to_string(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }
}

/// Type alias for the main result type used throughout the library
pub type ClientResult<T> = Result<T, GameClientError>;

/// Logging configuration and initialization
pub mod logging {
    use tracing::Level;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};
    use std::env;

    /// Logging output format
    #[derive(Debug, Clone)]
    pub enum LogFormat {
        Human,
        Json,
    }

    /// Logging output destination
    #[derive(Debug, Clone)]
    pub enum LogOutput {
        Stdout,
        Stderr,
    }

    /// Logging configuration
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        pub level: Level,
        pub format: LogFormat,
        pub output: LogOutput,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::INFO,
                format: LogFormat::Human,
                output: LogOutput::Stdout,
            }
        }
    }

    /// Initialize structured logging with the given configuration
    pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let env_filter = EnvFilter::builder()
            .with_default_directive(config.level.into())
            .from_env_lossy()
            .add_directive("paneer=trace".parse()?)
            .add_directive("tokio=info".parse()?)
            .add_directive("hyper=info".parse()?);

        let registry = tracing_subscriber::registry()
            .with(env_filter);

        match config.format {
            LogFormat::Human => {
                let fmt_layer = fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true);

                match config.output {
                    LogOutput::Stdout => registry.with(fmt_layer.with_writer(std::io::stdout)).init(),
                    LogOutput::Stderr => registry.with(fmt_layer.with_writer(std::io::stderr)).init(),
                }
            }
            LogFormat::Json => {
                let fmt_layer = fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_span_events(fmt::format::FmtSpan::CLOSE);

                match config.output {
                    LogOutput::Stdout => registry.with(fmt_layer.with_writer(std::io::stdout)).init(),
                    LogOutput::Stderr => registry.with(fmt_layer.with_writer(std::io::stderr)).init(),
                }
            }
        }

        Ok(())
    }

    /// Initialize logging with environment-based configuration
    pub fn init_from_env() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let level = env::var("PANEER_LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_string())
            .parse::<Level>()
            .unwrap_or(Level::INFO);

        let format = match env::var("PANEER_LOG_FORMAT").as_ref().map(|s| s.as_str()) {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Human,
        };

        let output = match env::var("PANEER_LOG_OUTPUT").as_ref().map(|s| s.as_str()) {
            Ok("stderr") => LogOutput::Stderr,
            _ => LogOutput::Stdout,
        };

        let config = LoggingConfig { level, format, output };
        init_logging(config)
    }
}
