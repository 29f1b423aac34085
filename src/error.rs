use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// The request itself failed, or the service answered with no matching
    /// addresses. `source` is set when a transport error was mapped here.
    NotFound {
        message: String,
        source: Option<reqwest::Error>,
    },
    /// The body was missing, not a JSON object, carried an explicit `error`
    /// field, or lacked a usable `features` key.
    InvalidResponse { message: String },
}

impl Error {
    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound { message, .. } => f.write_str(message),
            Error::InvalidResponse { message } => f.write_str(message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NotFound {
                source: Some(source),
                ..
            } => Some(source),
            _ => None,
        }
    }
}
