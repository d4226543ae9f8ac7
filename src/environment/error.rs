use thiserror::Error;

/// Everything that can go wrong talking to the comments API.
///
/// Errors travel inside actions, so they are `Clone` and only carry owned,
/// printable data instead of the underlying `reqwest::Error`.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ApiError {
    /// Connection problems and timeouts
    #[error("Network Error: {message}")]
    Network {
        message: String,
        status: Option<u16>,
    },
    /// The server answered with a non-2xx status and a structured error body
    #[error("API Error {status}: {message}")]
    Protocol {
        status: u16,
        code: Option<String>,
        message: String,
    },
    /// The body could not be understood: a non-2xx answer that isn't a JSON
    /// error, or a success body that doesn't have the expected shape.
    /// The raw text is kept.
    #[error("Invalid Response {status}: {body}")]
    Parse { status: u16, body: String },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network { status, .. } => *status,
            ApiError::Protocol { status, .. } => Some(*status),
            ApiError::Parse { status, .. } => Some(*status),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Network { message, .. } => message,
            ApiError::Protocol { message, .. } => message,
            ApiError::Parse { body, .. } => body,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        ApiError::Network {
            message: value.to_string(),
            status: value.status().map(|s| s.as_u16()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not parse {path}: {source}")]
    Format {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("No configuration directory available on this platform")]
    NoConfigDirectory,
}
