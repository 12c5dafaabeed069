use thiserror::Error;

/// The only message shown for failures whose detail is not meaningful to the
/// user: transport errors, non-2xx statuses and malformed bodies.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("prediction request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("prediction endpoint answered with HTTP {0}")]
    Status(u16),
    #[error("prediction endpoint returned a non-JSON body: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum ResponseError {
    /// The service rejected the request; the message is shown verbatim.
    #[error("{0}")]
    Application(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("response does not match the expected shape: {0}")]
    Malformed(String),
}

impl ResponseError {
    /// Text for the error region.
    pub fn user_message(&self) -> &str {
        match self {
            ResponseError::Application(message) => message,
            ResponseError::Transport(_) | ResponseError::Malformed(_) => GENERIC_FAILURE_MESSAGE,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("renderer for {expected} cannot display a {actual} result")]
    ShapeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid server url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unknown form encoding '{0}', expected 'multipart' or 'urlencoded'")]
    UnknownEncoding(String),
}
