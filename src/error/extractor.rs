use std::error::Error as StdError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The page could not be fetched: connection, timeout, or a non-2xx status.
    Fetch,
    Unexpected,
}

#[derive(Debug)]
pub struct ExtractError {
    pub message: String,
    pub kind: ErrorKind,
}

impl ExtractError {
    /// Text placed in the `error` field of a failed extraction result.
    pub fn user_message(&self) -> String {
        match self.kind {
            ErrorKind::Fetch => format!("Failed to fetch URL: {}", self.message),
            ErrorKind::Unexpected => format!("Unexpected error: {}", self.message),
        }
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExtractError: {}", self.message)
    }
}

fn is_fetch_error(err: &(dyn StdError + 'static)) -> bool {
    err.is::<reqwest::Error>() || err.is::<reqwest_middleware::Error>() || err.is::<url::ParseError>()
}

// Every std error converts; network-layer errors are classified as fetch failures.
impl<E: StdError + Send + Sync + 'static> From<E> for ExtractError {
    fn from(err: E) -> Self {
        let kind = if is_fetch_error(&err) {
            ErrorKind::Fetch
        } else {
            ErrorKind::Unexpected
        };
        ExtractError {
            message: err.to_string(),
            kind,
        }
    }
}
