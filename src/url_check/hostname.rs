//! Hostname policy checks applied after the parser has done its work.
//!
//! The parser hands back hosts already lower-cased and punycode-encoded for
//! the special schemes, with IPv6 literals kept in brackets. Everything here
//! works on that serialized form with plain byte scans.

use super::rejection::Rejection;

/// Maximum length of a single dot-separated label
pub const MAX_LABEL_LENGTH: usize = 63;

/// Minimum length of the final label unless the host is `localhost`
pub const MIN_TLD_LENGTH: usize = 2;

const LOCALHOST: &str = "localhost";

/// Hostname must not begin or end with `.` or `-`.
pub fn has_clean_edges(hostname: &str) -> bool {
    let edge = |b: &u8| *b == b'.' || *b == b'-';
    let bytes = hostname.as_bytes();
    !(bytes.first().is_some_and(edge) || bytes.last().is_some_and(edge))
}

/// Four groups of one to three ASCII digits separated by dots.
///
/// The digits are not range-checked, `999.1.1.1` still counts.
pub fn is_dotted_quad(hostname: &str) -> bool {
    let mut groups = 0;
    for group in hostname.split('.') {
        groups += 1;
        if groups > 4 || group.is_empty() || group.len() > 3 {
            return false;
        }
        if !group.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }
    groups == 4
}

/// A bracketed literal made only of hex digits and colons, e.g. `[2001:db8::1]`.
pub fn is_bracketed_ipv6(hostname: &str) -> bool {
    match hostname
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        Some(inner) => {
            !inner.is_empty() && inner.bytes().all(|b| b == b':' || b.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Loopback and private-range detection used when local hosts are denied.
///
/// Private ranges match on the leading octets alone, so any host that merely
/// starts with `10.` or `192.168.` is treated as local. Bracketed IPv6 hosts
/// are not inspected; only the bare `::1` and `::` spellings match.
pub fn is_local(hostname: &str) -> bool {
    hostname == LOCALHOST
        || hostname == "::1"
        || hostname == "::"
        || (hostname.starts_with("127.") && is_dotted_quad(hostname))
        || hostname.starts_with("10.")
        || hostname.starts_with("192.168.")
        || is_private_172(hostname)
}

// 172.16.0.0/12: "172." followed by exactly two digits in 16..=31 and a dot.
fn is_private_172(hostname: &str) -> bool {
    let Some(rest) = hostname.strip_prefix("172.") else {
        return false;
    };
    match rest.as_bytes() {
        [tens @ b'0'..=b'9', ones @ b'0'..=b'9', b'.', ..] => {
            let octet = (tens - b'0') * 10 + (ones - b'0');
            (16..=31).contains(&octet)
        }
        _ => false,
    }
}

/// One DNS-style label: `[a-z0-9]([a-z0-9-]*[a-z0-9])?`, case-insensitive,
/// at most 63 characters.
pub fn is_valid_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_LABEL_LENGTH {
        return false;
    }
    let first = bytes[0];
    let last = bytes[bytes.len() - 1];
    first.is_ascii_alphanumeric()
        && last.is_ascii_alphanumeric()
        && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
}

/// Domain-structure checks for hosts that are not IP literals.
pub fn check_domain(hostname: &str) -> Result<(), Rejection> {
    if hostname != LOCALHOST && !hostname.contains('.') {
        return Err(Rejection::MissingDot(hostname.to_string()));
    }

    if !hostname.split('.').all(is_valid_label) {
        return Err(Rejection::InvalidLabel(hostname.to_string()));
    }

    let tld = hostname.rsplit('.').next().unwrap_or_default();
    if hostname != LOCALHOST && tld.len() < MIN_TLD_LENGTH {
        return Err(Rejection::ShortTld(hostname.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges() {
        assert!(has_clean_edges("example.com"));
        assert!(!has_clean_edges(".example.com"));
        assert!(!has_clean_edges("example.com."));
        assert!(!has_clean_edges("-example.com"));
        assert!(!has_clean_edges("example.com-"));
        assert!(has_clean_edges("[::1]"));
    }

    #[test]
    fn dotted_quad_shape_only() {
        assert!(is_dotted_quad("8.8.8.8"));
        assert!(is_dotted_quad("999.999.999.999"));
        assert!(!is_dotted_quad("1.2.3"));
        assert!(!is_dotted_quad("1.2.3.4.5"));
        assert!(!is_dotted_quad("1.2.3.4444"));
        assert!(!is_dotted_quad("1..3.4"));
        assert!(!is_dotted_quad("a.b.c.d"));
    }

    #[test]
    fn bracketed_ipv6() {
        assert!(is_bracketed_ipv6("[::1]"));
        assert!(is_bracketed_ipv6("[2001:DB8::1]"));
        assert!(!is_bracketed_ipv6("[]"));
        assert!(!is_bracketed_ipv6("::1"));
        assert!(!is_bracketed_ipv6("[::ffff:1.2.3.4]"));
    }

    #[test]
    fn local_ranges() {
        for host in [
            "localhost",
            "::1",
            "::",
            "127.0.0.1",
            "127.255.255.255",
            "10.0.0.1",
            "192.168.0.1",
            "172.16.0.1",
            "172.31.255.255",
        ] {
            assert!(is_local(host), "{host} should be local");
        }

        for host in [
            "8.8.8.8",
            "172.15.0.1",
            "172.32.0.1",
            "172.1.0.1",
            "127.example.com",
            "[::1]",
            "[::]",
            "example.com",
        ] {
            assert!(!is_local(host), "{host} should not be local");
        }
    }

    #[test]
    fn private_prefixes_match_domains_too() {
        assert!(is_local("10.example.com"));
        assert!(is_local("192.168.example.com"));
        assert!(is_local("172.20.example.com"));
    }

    #[test]
    fn labels() {
        assert!(is_valid_label("a"));
        assert!(is_valid_label("xn--n3h"));
        assert!(is_valid_label("Example"));
        assert!(is_valid_label(&"a".repeat(63)));
        assert!(!is_valid_label(&"a".repeat(64)));
        assert!(!is_valid_label(""));
        assert!(!is_valid_label("-a"));
        assert!(!is_valid_label("a-"));
        assert!(!is_valid_label("a_b"));
    }

    #[test]
    fn domain_structure() {
        assert!(check_domain("example.com").is_ok());
        assert!(check_domain("localhost").is_ok());
        assert_eq!(
            check_domain("example"),
            Err(Rejection::MissingDot("example".into()))
        );
        assert_eq!(
            check_domain("example..com"),
            Err(Rejection::InvalidLabel("example..com".into()))
        );
        assert_eq!(
            check_domain("example.c"),
            Err(Rejection::ShortTld("example.c".into()))
        );
    }
}
