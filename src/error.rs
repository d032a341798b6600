use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for configuration problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "config.base_url")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected format, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "client_config", "keyring")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the Clarity Gemini client.
///
/// Every variant is terminal for the interaction that produced it: nothing in
/// this crate retries. Panels turn errors into text with [`Error::user_message`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("No usable credential: {message}")]
    NoCredential { message: String },

    #[error("Remote error: HTTP {status} ({class}): {message}")]
    Remote {
        status: u16,
        class: String,
        message: String,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Malformed analysis response: {message}")]
    Parse { message: String, raw: String },

    #[error("no image data returned")]
    NoImageData,

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Image decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A 2xx response whose body is not a `generateContent` response.
    #[error("Response decode error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration file error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn no_credential(msg: impl Into<String>) -> Self {
        Error::NoCredential {
            message: msg.into(),
        }
    }

    pub fn parse(msg: impl Into<String>, raw: impl Into<String>) -> Self {
        Error::Parse {
            message: msg.into(),
            raw: raw.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }

    /// True for failures of the network call itself (transport or non-2xx status).
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Remote { .. } | Error::Transport(_))
    }

    /// Short message suitable for showing next to the control that failed.
    pub fn user_message(&self) -> String {
        match self {
            Error::NoCredential { .. } => {
                "An API key is required. Please select one and try again.".to_string()
            }
            Error::Remote { class, .. } if class == "authentication" => {
                "The API key was rejected. Please select a different key.".to_string()
            }
            Error::Remote { message, .. } => format!("The AI service returned an error: {message}"),
            Error::Transport(_) => {
                "Could not reach the AI service. Please check your connection.".to_string()
            }
            Error::Parse { .. } => "The analysis response could not be understood.".to_string(),
            Error::NoImageData => "No image data returned".to_string(),
            other => other.to_string(),
        }
    }
}
