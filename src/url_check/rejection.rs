use thiserror::Error;

/// Why a candidate was not accepted as a URL
///
/// Only the first failing check is reported. The boolean entry points
/// discard this value; `check_url` hands it back for callers that want to
/// explain the decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("input is not a string")]
    NotAString,

    #[error("input is empty")]
    Empty,

    #[error("input is {length} UTF-16 units long, the limit is {}", super::MAX_URL_LENGTH)]
    TooLong { length: usize },

    #[error("input contains whitespace")]
    ContainsWhitespace,

    #[error("input does not start with scheme://")]
    MissingScheme,

    #[error("malformed URL: {0}")]
    Malformed(#[from] url::ParseError),

    #[error("protocol {0:?} is not allowed")]
    ProtocolNotAllowed(String),

    #[error("URL has no hostname")]
    MissingHostname,

    #[error("hostname {0:?} starts or ends with '.' or '-'")]
    MalformedHostname(String),

    #[error("hostname {0:?} is a local address")]
    LocalAddress(String),

    #[error("hostname {0:?} has no top-level domain")]
    MissingDot(String),

    #[error("hostname {0:?} has an invalid label")]
    InvalidLabel(String),

    #[error("hostname {0:?} has a top-level domain shorter than 2 characters")]
    ShortTld(String),
}
