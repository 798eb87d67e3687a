use thiserror::Error;

/// Failures raised while reading or parsing an env file.
///
/// The resolver absorbs these into an empty result; they surface only through
/// [`ParseSource`](crate::ParseSource) implementations and debug logging.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[source] dotenvy::Error),
    #[error("invalid UTF-8 input: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

impl From<dotenvy::Error> for Error {
    fn from(value: dotenvy::Error) -> Self {
        match value {
            dotenvy::Error::Io(err) => Self::Io(err),
            other => Self::Parse(other),
        }
    }
}
