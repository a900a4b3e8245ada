use url::Url;

/// The parts of a parsed URL the validator looks at
///
/// Wraps `url::Url` for the duration of one validation call. Parsing failure
/// comes back as `url::ParseError` and is turned into a rejection by the
/// caller, never a panic.
#[derive(Debug)]
pub struct ParsedUrl {
    url: Url,
}

impl ParsedUrl {
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        Url::parse(input).map(|url| Self { url })
    }

    /// Lower-cased scheme without the trailing colon
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Scheme with its trailing colon, e.g. `"https:"`
    pub fn protocol(&self) -> String {
        format!("{}:", self.url.scheme())
    }

    /// Serialized host, bracketed for IPv6 and empty when the URL has none
    pub fn hostname(&self) -> &str {
        self.url.host_str().unwrap_or("")
    }

    pub fn username(&self) -> &str {
        self.url.username()
    }

    pub fn password(&self) -> Option<&str> {
        self.url.password()
    }

    pub fn has_credentials(&self) -> bool {
        !self.username().is_empty() || self.password().is_some()
    }
}
