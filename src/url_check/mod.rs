//! Strict URL classification.
//!
//! A candidate string goes through a fixed sequence of checks: cheap shape
//! rejects, scheme handling, a WHATWG parse via the `url` crate, then protocol,
//! hostname, locality and domain-structure policy. The first failing check
//! decides the outcome. Nothing here keeps state between calls.
//!
//! ```
//! use swift_url_check::{is_url, is_url_with, ValidationOptions};
//!
//! assert!(is_url("https://example.com"));
//! assert!(!is_url("example.com"));
//! assert!(is_url_with("example.com", &ValidationOptions::new().with_lenient(true)));
//! ```

pub mod hostname;
pub mod options;
pub mod parser;
pub mod rejection;
pub mod scheme;
pub mod url_validator;


/// Longest accepted candidate, in UTF-16 code units, after trimming
pub const MAX_URL_LENGTH: usize = 2048;

pub use options::{load_options, ValidationOptions};
pub use rejection::Rejection;
pub use url_validator::{check_url, check_value, is_url, is_url_value, is_url_with};
