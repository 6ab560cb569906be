use std::fmt;

/// Why a conversion request did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    /// The server answered with a non-2xx status.
    Status { code: u16, body: String },
    /// The request never got an answer (connect, read, local file).
    Network(String),
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::Status { code, body } if body.trim().is_empty() => {
                write!(f, "HTTP status {code}")
            }
            TransportFailure::Status { code, body } => {
                write!(f, "HTTP status {code}: {}", body.trim())
            }
            TransportFailure::Network(message) => write!(f, "{message}"),
        }
    }
}

/// The server reports the converted file name either bare or as a JSON-style
/// quoted string; strip exactly one pair of wrapping quotes.
pub fn unquote_converted_name(body: &str) -> &str {
    body.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(body)
}
