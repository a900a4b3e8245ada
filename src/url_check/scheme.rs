//! Scheme-prefix scanning done before the parser sees the input.

/// Prefix added to scheme-less input in lenient mode
pub const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Byte offset of the colon ending a leading `scheme:`, if there is one.
///
/// A scheme is an ASCII letter followed by any number of ASCII letters,
/// digits, `+`, `.` or `-`. Case does not matter.
fn scheme_end(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    if !bytes.first()?.is_ascii_alphabetic() {
        return None;
    }

    for (i, &b) in bytes.iter().enumerate().skip(1) {
        match b {
            b':' => return Some(i),
            b'+' | b'.' | b'-' => {}
            _ if b.is_ascii_alphanumeric() => {}
            _ => return None,
        }
    }
    None
}

/// `true` when the input starts with `scheme:`.
pub fn has_scheme(input: &str) -> bool {
    scheme_end(input).is_some()
}

/// `true` when the input starts with `scheme://`.
pub fn has_authority_scheme(input: &str) -> bool {
    scheme_end(input).is_some_and(|colon| input[colon + 1..].starts_with("//"))
}
