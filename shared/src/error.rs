use thiserror::Error;

/// Failure of a single REST call.
///
/// Every variant maps to a fixed, user-facing message via [`ApiError::user_message`].
/// Nothing is retried; the caller shows the message and keeps its previous state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never reached the server (reported by browsers as status 0)
    #[error("connection failed: {0}")]
    Connection(String),
    /// 4xx response
    #[error("client error {status}: {detail}")]
    Client { status: u16, detail: String },
    /// 5xx response
    #[error("server error {status}")]
    Server { status: u16 },
    /// The response body could not be parsed or the request could not be encoded
    #[error("invalid payload: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-successful HTTP status.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        match status {
            0 => ApiError::Connection(body.into()),
            400..=499 => ApiError::Client {
                status,
                detail: body.into(),
            },
            _ => ApiError::Server { status },
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            ApiError::Connection(_) | ApiError::Decode(_) => 0,
            ApiError::Client { status, .. } | ApiError::Server { status } => *status,
        }
    }

    /// Message shown to the user in the notice toast
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::Connection(_) => {
                "Could not connect to the server. Check your connection and try again."
            }
            ApiError::Client { status: 400, .. } => {
                "The server rejected the data. Review the form and try again."
            }
            ApiError::Client { status: 401, .. } => {
                "Your session is not authorized for this action."
            }
            ApiError::Client { status: 403, .. } => {
                "You do not have permission to perform this action."
            }
            ApiError::Client { status: 404, .. } => "The record no longer exists.",
            ApiError::Client { status: 409, .. } => {
                "The record conflicts with existing data or is still referenced."
            }
            ApiError::Client { .. } => "The request could not be processed.",
            ApiError::Server { .. } => "The server encountered an error. Please try again later.",
            ApiError::Decode(_) => "The server sent an unexpected response.",
        }
    }
}
