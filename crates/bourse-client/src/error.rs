use bourse_types::ApiFailure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered 401. A redirect, if any, has already been issued.
    #[error("unauthorized")]
    Unauthorized,

    #[error("backend returned {status}: {}", failure.message)]
    Api { status: u16, failure: ApiFailure },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid backend url: {0}")]
    BaseUrl(String),
}

impl From<ClientError> for ApiFailure {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Unauthorized => ApiFailure::unauthorized(),
            ClientError::Api { failure, .. } => failure,
            ClientError::Transport(_) => ApiFailure::general("Could not reach the backend"),
            ClientError::Decode(_) => ApiFailure::general("Unexpected response from the backend"),
            ClientError::BaseUrl(url) => ApiFailure::general(format!("Invalid backend url {url}")),
        }
    }
}
