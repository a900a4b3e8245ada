//! Fast, strict URL validation.
//!
//! `is_url` answers one question: is this string a well-formed `http(s)` URL
//! with a sensible hostname? [`ValidationOptions`] widens or narrows that
//! policy (scheme-less input, local hosts, other protocols), and `check_url`
//! reports which check failed.

pub mod cli;
pub mod url_check;
pub mod utils;

pub use url_check::{
    check_url, check_value, is_url, is_url_value, is_url_with, load_options, Rejection,
    ValidationOptions, MAX_URL_LENGTH,
};
