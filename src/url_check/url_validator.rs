use std::borrow::Cow;

use serde_json::Value;
use tracing::{debug, trace};

use super::hostname::{check_domain, has_clean_edges, is_bracketed_ipv6, is_dotted_quad, is_local};
use super::options::ValidationOptions;
use super::parser::ParsedUrl;
use super::rejection::Rejection;
use super::scheme::{has_authority_scheme, has_scheme, DEFAULT_SCHEME_PREFIX};
use super::MAX_URL_LENGTH;

/// Whitespace as far as URL candidates are concerned: ASCII controls TAB
/// through CR, space, the Unicode space separators, the two line/paragraph
/// separators and the byte-order mark.
pub fn is_url_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Returns true if `candidate` is a valid URL under the default options
/// (`http:`/`https:` only, scheme required, local hosts allowed).
pub fn is_url(candidate: &str) -> bool {
    is_url_with(candidate, &ValidationOptions::default())
}

/// Returns true if `candidate` is a valid URL under `options`.
pub fn is_url_with(candidate: &str, options: &ValidationOptions) -> bool {
    check_url(candidate, options).is_ok()
}

/// Boolean form of [`check_value`].
pub fn is_url_value(candidate: &Value, options: &ValidationOptions) -> bool {
    check_value(candidate, options).is_ok()
}

/// Validates a dynamically typed value; anything but a JSON string is rejected.
pub fn check_value(candidate: &Value, options: &ValidationOptions) -> Result<(), Rejection> {
    match candidate {
        Value::String(s) => check_url(s, options),
        other => {
            debug!("Rejected non-string candidate: {}", other);
            Err(Rejection::NotAString)
        }
    }
}

/// Runs every check in order and reports the first one that fails
///
/// The stages are:
/// 1. Trim, then reject empty, over-long, or whitespace-containing input
/// 2. Prefix `https://` in lenient mode, or demand `scheme://` in strict mode
/// 3. Parse with the WHATWG parser
/// 4. Match the scheme against the allowed protocols
/// 5. Require a hostname without leading/trailing `.` or `-`
/// 6. Reject local hosts when they are not allowed
/// 7. Check label shape and TLD length for non-IP hosts
///
/// # Arguments
/// * `candidate` - The text to classify
/// * `options` - Validation policy for this call
///
/// # Returns
/// * `Result<(), Rejection>` - `Ok` when the candidate is accepted
pub fn check_url(candidate: &str, options: &ValidationOptions) -> Result<(), Rejection> {
    let result = run_checks(candidate, options);
    match &result {
        Ok(()) => trace!("Accepted URL: {}", candidate),
        Err(rejection) => debug!("Rejected URL {:?}: {}", candidate, rejection),
    }
    result
}

fn run_checks(candidate: &str, options: &ValidationOptions) -> Result<(), Rejection> {
    let trimmed = check_shape(candidate)?;
    let input = with_scheme(trimmed, options)?;

    let parsed = ParsedUrl::parse(&input)?;

    if !options.allows_scheme(parsed.scheme()) {
        return Err(Rejection::ProtocolNotAllowed(parsed.protocol()));
    }

    let hostname = parsed.hostname();
    if hostname.is_empty() {
        return Err(Rejection::MissingHostname);
    }
    if !has_clean_edges(hostname) {
        return Err(Rejection::MalformedHostname(hostname.to_string()));
    }

    if !options.allow_local && is_local(hostname) {
        return Err(Rejection::LocalAddress(hostname.to_string()));
    }

    if !is_dotted_quad(hostname) && !is_bracketed_ipv6(hostname) {
        check_domain(hostname)?;
    }

    // Credentials are allowed; they are only noted.
    if parsed.has_credentials() {
        trace!("URL for host {} carries credentials", hostname);
    }

    Ok(())
}

/// Stage 1: trims and applies the length and whitespace limits.
fn check_shape(candidate: &str) -> Result<&str, Rejection> {
    let trimmed = candidate.trim_matches(is_url_whitespace);
    if trimmed.is_empty() {
        return Err(Rejection::Empty);
    }

    // UTF-8 length bounds the UTF-16 length, so only count when it could matter.
    if trimmed.len() > MAX_URL_LENGTH {
        let length = trimmed.encode_utf16().count();
        if length > MAX_URL_LENGTH {
            return Err(Rejection::TooLong { length });
        }
    }

    if trimmed.contains(is_url_whitespace) {
        return Err(Rejection::ContainsWhitespace);
    }

    Ok(trimmed)
}

/// Stage 2: the string handed to the parser.
fn with_scheme<'a>(trimmed: &'a str, options: &ValidationOptions) -> Result<Cow<'a, str>, Rejection> {
    if options.lenient {
        if has_scheme(trimmed) {
            Ok(Cow::Borrowed(trimmed))
        } else {
            trace!("No scheme on {:?}, assuming {}", trimmed, DEFAULT_SCHEME_PREFIX);
            Ok(Cow::Owned(format!("{DEFAULT_SCHEME_PREFIX}{trimmed}")))
        }
    } else if has_authority_scheme(trimmed) {
        Ok(Cow::Borrowed(trimmed))
    } else {
        Err(Rejection::MissingScheme)
    }
}
