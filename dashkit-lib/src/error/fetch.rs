//! Data-source transport errors

use std::time::Duration;

/// Why a [`DataSource`](crate::DataSource) could not produce chart data.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The server answered with something other than 2xx.
    #[error("server replied {code}: {body}")]
    Status { code: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("no response within {0:?}")]
    TimedOut(Duration),

    /// The source locator did not resolve to a URL.
    #[error("bad source URL {0}")]
    BadUrl(String),

    /// The body was not a JSON object of label to number.
    #[error("undecodable chart data: {reason}")]
    Decode {
        reason: String,
        /// Kept for diagnostics when the body was read.
        body: Option<String>,
    },
}

impl FetchError {
    pub fn status(code: u16, body: impl Into<String>) -> Self {
        Self::Status {
            code,
            body: body.into(),
        }
    }

    pub fn decode(reason: impl ToString, body: Option<String>) -> Self {
        Self::Decode {
            reason: reason.to_string(),
            body,
        }
    }

    /// Status code of a [`FetchError::Status`].
    pub fn code(&self) -> Option<u16> {
        if let Self::Status { code, .. } = self {
            Some(*code)
        } else {
            None
        }
    }

    /// Whether an identical request later might succeed.
    ///
    /// Components never retry on their own; this is for callers that do.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Status { code, .. } => *code == 429 || (500..=504).contains(code) && *code != 501,
            Self::Transport(_) | Self::TimedOut(_) => true,
            Self::BadUrl(_) | Self::Decode { .. } => false,
        }
    }
}
