use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::{debug, info};

use crate::url_check::options::normalize_protocol;
use crate::url_check::{check_url, check_value, load_options, Rejection, ValidationOptions};

/// Check whether strings are well-formed URLs
#[derive(Debug, Parser)]
#[command(name = "swift-url-check", version, about)]
pub struct Cli {
    /// URLs to check; one per line on stdin when none are given
    pub urls: Vec<String>,

    /// Accept URLs without a scheme by assuming https://
    #[arg(short, long)]
    pub lenient: bool,

    /// Reject localhost, loopback and private-range hosts
    #[arg(long)]
    pub deny_local: bool,

    /// Accepted protocol, e.g. "ftp:" (repeatable, replaces the defaults)
    #[arg(short = 'p', long = "protocol", value_name = "PROTOCOL")]
    pub protocols: Vec<String>,

    /// Options file (TOML, JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the reason an input was rejected
    #[arg(long)]
    pub explain: bool,

    /// Treat every input as a JSON value instead of raw text
    #[arg(long)]
    pub json: bool,

    /// Print the effective options as JSON and exit
    #[arg(long)]
    pub show_options: bool,

    /// Write logs to a timestamped file in this directory instead of stderr
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<String>,
}

/// Counts for one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub checked: usize,
    pub valid: usize,
}

impl Summary {
    pub fn all_valid(&self) -> bool {
        self.valid == self.checked
    }
}

impl Cli {
    /// Options from the config file and environment, with flags applied on top.
    pub fn options(&self) -> Result<ValidationOptions> {
        let mut options = load_options(self.config.as_deref())?;

        if self.lenient {
            options.lenient = true;
        }
        if self.deny_local {
            options.allow_local = false;
        }
        if !self.protocols.is_empty() {
            options.protocols = self
                .protocols
                .iter()
                .filter_map(|p| normalize_protocol(p))
                .collect();
        }

        debug!("Effective options: {:?}", options);
        Ok(options)
    }

    /// Runs against the process's stdin and stdout.
    pub fn run(&self) -> Result<Summary> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with(stdin.lock(), &mut out)
    }

    /// Checks the positional URLs, or every line of `input` when there are none.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn run_with<R: BufRead, W: Write>(&self, input: R, out: &mut W) -> Result<Summary> {
        let options = self.options()?;
        let mut summary = Summary::default();

        if self.show_options {
            let rendered =
                serde_json::to_string(&options).context("Failed to serialize options")?;
            writeln!(out, "{}", rendered)?;
            return Ok(summary);
        }

        if !self.urls.is_empty() {
            for url in &self.urls {
                self.report(url, &options, out, &mut summary)?;
            }
        } else {
            for line in input.lines() {
                let line = line.context("Failed to read input")?;
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    continue;
                }
                self.report(&line, &options, out, &mut summary)?;
            }
        }

        info!("Checked {} inputs, {} valid", summary.checked, summary.valid);
        Ok(summary)
    }

    fn check(&self, input: &str, options: &ValidationOptions) -> Result<Result<(), Rejection>> {
        if self.json {
            let value: Value = serde_json::from_str(input)
                .with_context(|| format!("Input is not valid JSON: {}", input))?;
            Ok(check_value(&value, options))
        } else {
            Ok(check_url(input, options))
        }
    }

    fn report<W: Write>(
        &self,
        input: &str,
        options: &ValidationOptions,
        out: &mut W,
        summary: &mut Summary,
    ) -> Result<()> {
        let outcome = self.check(input, options)?;
        summary.checked += 1;

        match outcome {
            Ok(()) => {
                summary.valid += 1;
                writeln!(out, "valid\t{}", input)?;
            }
            Err(rejection) if self.explain => writeln!(out, "invalid\t{}\t{}", input, rejection)?,
            Err(_) => writeln!(out, "invalid\t{}", input)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str], stdin: &str) -> (Summary, String) {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        let summary = cli.run_with(stdin.as_bytes(), &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "swift-url-check",
            "--lenient",
            "--deny-local",
            "-p",
            "FTP",
            "--protocol",
            "ssh:",
            "example.com",
        ])
        .unwrap();

        assert!(cli.lenient);
        assert!(cli.deny_local);
        assert_eq!(cli.urls, vec!["example.com"]);

        let options = cli.options().unwrap();
        assert!(options.lenient);
        assert!(!options.allow_local);
        assert!(options.allows_scheme("ftp"));
        assert!(options.allows_scheme("ssh"));
        assert!(!options.allows_scheme("https"));
    }

    #[test]
    fn positional_urls() {
        let (summary, out) = run(
            &["swift-url-check", "https://example.com", "example.com"],
            "",
        );
        assert_eq!(summary, Summary { checked: 2, valid: 1 });
        assert!(!summary.all_valid());
        assert_eq!(out, "valid\thttps://example.com\ninvalid\texample.com\n");
    }

    #[test]
    fn reads_stdin_and_skips_comments() {
        let stdin = "# header\nhttps://example.com\n\nhttp://localhost:3000\n";
        let (summary, out) = run(&["swift-url-check", "--deny-local", "--explain"], stdin);

        assert_eq!(summary, Summary { checked: 2, valid: 1 });
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "valid\thttps://example.com");
        assert_eq!(
            lines[1],
            "invalid\thttp://localhost:3000\thostname \"localhost\" is a local address"
        );
    }

    #[test]
    fn json_mode_rejects_non_strings() {
        let stdin = "\"https://example.com\"\n123\nnull\n";
        let (summary, out) = run(&["swift-url-check", "--json", "--explain"], stdin);

        assert_eq!(summary, Summary { checked: 3, valid: 1 });
        assert!(out.contains("invalid\t123\tinput is not a string"));
    }

    #[test]
    fn show_options_prints_merged_options() {
        let (summary, out) = run(
            &["swift-url-check", "--show-options", "--deny-local", "-p", "FTP"],
            "",
        );
        assert_eq!(summary, Summary::default());

        let printed: Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(printed["allow_local"], Value::Bool(false));
        assert_eq!(printed["protocols"], serde_json::json!(["ftp:"]));

        let reparsed: ValidationOptions = serde_json::from_str(out.trim()).unwrap();
        assert!(!reparsed.allow_local);
        assert!(reparsed.allows_scheme("ftp"));
    }

    #[test]
    fn json_mode_fails_on_bad_json() {
        let cli = Cli::try_parse_from(["swift-url-check", "--json", "not json"]).unwrap();
        let mut out = Vec::new();
        assert!(cli.run_with(io::empty(), &mut out).is_err());
    }
}
