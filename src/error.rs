use thiserror::Error;

/// Failure talking to the Bot API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("telegram API returned status {status}: {body}")]
    Status { status: u16, body: String },
    /// Holds the error with its URL removed: request URLs embed the bot token.
    #[error("failed to call telegram API: {0}")]
    Transport(reqwest::Error),
    #[error(transparent)]
    Bot(#[from] teloxide::RequestError),
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.without_url())
    }
}

/// Every way a score submission can fail. The `Display` text is what the
/// caller sees, so it never carries secrets.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Server configuration error")]
    Configuration(&'static str),
    #[error("Invalid request body")]
    InvalidBody(#[source] serde_json::Error),
    #[error("Missing required fields")]
    MissingFields,
    #[error("Failed to update score: {0}")]
    Upstream(#[from] ApiError),
}

impl RelayError {
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::InvalidBody(_) | RelayError::MissingFields => 400,
            RelayError::Configuration(_) | RelayError::Upstream(_) => 500,
        }
    }
}
