use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prefix for environment overrides, e.g. `URL_CHECK_ALLOW_LOCAL=false`
pub const ENV_PREFIX: &str = "URL_CHECK";

/// Schemes accepted when the caller does not supply a protocol list
pub const DEFAULT_PROTOCOLS: [&str; 2] = ["http:", "https:"];

/// Policy knobs for a single validation call
///
/// Every field has a default, so a partially filled config file or an empty
/// `ValidationOptions::default()` behaves like the plain `is_url` entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Accept inputs without a scheme by assuming `https://`
    pub lenient: bool,

    /// Accept loopback and private-range hosts
    #[serde(alias = "allowLocal", alias = "allowlocal")]
    pub allow_local: bool,

    /// Accepted schemes, each with its trailing colon (`"https:"`)
    pub protocols: BTreeSet<String>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            lenient: false,
            allow_local: true,
            protocols: DEFAULT_PROTOCOLS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    pub fn with_allow_local(mut self, allow_local: bool) -> Self {
        self.allow_local = allow_local;
        self
    }

    /// Replaces the accepted protocol set. Entries are taken verbatim.
    pub fn with_protocols<I, S>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protocols = protocols.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a parsed scheme (no colon, as `url::Url::scheme` returns it)
    /// appears in the protocol set as `"<scheme>:"`.
    pub fn allows_scheme(&self, scheme: &str) -> bool {
        self.protocols
            .iter()
            .any(|p| p.strip_suffix(':') == Some(scheme))
    }

    fn normalized(mut self) -> Self {
        self.protocols = self
            .protocols
            .iter()
            .filter_map(|p| normalize_protocol(p))
            .collect();
        self
    }
}

/// Lower-cases a configured protocol and makes sure it ends in `:`.
///
/// Returns `None` for blank entries so a trailing comma in an environment
/// variable does not produce a bogus `":"` protocol.
pub fn normalize_protocol(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == ":" {
        return None;
    }
    let mut protocol = trimmed.to_ascii_lowercase();
    if !protocol.ends_with(':') {
        protocol.push(':');
    }
    Some(protocol)
}

/// Loads options from defaults, an optional config file, then `URL_CHECK_*`
/// environment variables, in that order of precedence (last wins).
///
/// # Arguments
/// * `path` - Optional TOML/JSON/YAML file; the format is inferred from the extension
///
/// # Returns
/// * `Result<ValidationOptions>` - The merged options with protocols normalized
pub fn load_options(path: Option<&Path>) -> Result<ValidationOptions> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        debug!("Loading validation options from {}", path.display());
        builder = builder.add_source(File::from(path));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("protocols"),
    );

    let settings = builder
        .build()
        .context("Failed to read validation options")?;

    let options: ValidationOptions = settings
        .try_deserialize()
        .context("Invalid validation options")?;

    let options = options.normalized();
    debug!("Validation options loaded: {:?}", options);
    Ok(options)
}
