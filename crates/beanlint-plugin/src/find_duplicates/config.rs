//! Configuration parsing for the duplicate detector.
//!
//! The configuration arrives as a flat string of whitespace-separated
//! `key=value` tokens; values may be shell-quoted to include spaces.
//! Legacy short key names are aliased onto the canonical long names before
//! type coercion. Malformed numeric values abort the run: a broken config
//! must not silently degrade detection.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// A configuration parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An integer-typed key received a non-integer value.
    #[error("invalid integer for '{key}': '{value}'")]
    InvalidInt {
        /// Canonical key name.
        key: &'static str,
        /// The offending value.
        value: String,
    },
    /// A decimal-typed key received a non-decimal value.
    #[error("invalid decimal for '{key}': '{value}'")]
    InvalidDecimal {
        /// Canonical key name.
        key: &'static str,
        /// The offending value.
        value: String,
    },
    /// A float-typed key received a non-numeric value.
    #[error("invalid number for '{key}': '{value}'")]
    InvalidFloat {
        /// Key name as given.
        key: String,
        /// The offending value.
        value: String,
    },
    /// A quoted value was never closed.
    #[error("unterminated quote in configuration string")]
    UnterminatedQuote,
}

/// Duplicate-detector configuration, immutable per run.
///
/// Unknown keys are accepted permissively and stored in [`extra`] as
/// floats, matching the historical behavior: a typo'd key never changes a
/// recognized setting, but a non-numeric value still fails fast.
///
/// [`extra`]: DedupConfig::extra
#[derive(Debug, Clone, PartialEq)]
pub struct DedupConfig {
    /// Score at or above which a pair is an error-level finding.
    pub error_score_threshold: f64,
    /// Score at or above which a pair is a warning.
    pub warn_score_threshold: f64,
    /// Date window in days; 0 disables date-based matching.
    pub date_window_days: i64,
    /// Maximum absolute amount difference still counted as matching.
    /// Exact decimal, not floating point, to avoid rounding artifacts.
    pub amount_tolerance: Decimal,
    /// Restrict amount/currency derivation to `Assets:` postings.
    pub cash_accounts_only: bool,
    /// Require both transactions to share a property token.
    pub require_property_match: bool,
    /// Unrecognized keys, coerced to floats.
    pub extra: HashMap<String, f64>,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            error_score_threshold: 0.95,
            warn_score_threshold: 0.80,
            date_window_days: 3,
            amount_tolerance: Decimal::new(3, 2),
            cash_accounts_only: false,
            require_property_match: false,
            extra: HashMap::new(),
        }
    }
}

impl DedupConfig {
    /// Parse a configuration string, starting from the built-in defaults.
    ///
    /// Tokens without an `=` are ignored. See [`ConfigError`] for the
    /// failure conditions.
    pub fn parse(config_str: &str) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        for token in split_tokens(config_str)? {
            let Some((key, value)) = token.split_once('=') else {
                continue;
            };
            match canonical_key(key) {
                "date_window_days" => {
                    cfg.date_window_days =
                        value.parse().map_err(|_| ConfigError::InvalidInt {
                            key: "date_window_days",
                            value: value.to_string(),
                        })?;
                }
                "amount_tolerance" => {
                    cfg.amount_tolerance =
                        Decimal::from_str(value).map_err(|_| ConfigError::InvalidDecimal {
                            key: "amount_tolerance",
                            value: value.to_string(),
                        })?;
                }
                "cash_accounts_only" => cfg.cash_accounts_only = parse_bool(value),
                "require_property_match" => cfg.require_property_match = parse_bool(value),
                "error_score_threshold" => {
                    cfg.error_score_threshold = parse_float("error_score_threshold", value)?;
                }
                "warn_score_threshold" => {
                    cfg.warn_score_threshold = parse_float("warn_score_threshold", value)?;
                }
                other => {
                    let parsed = parse_float(other, value)?;
                    cfg.extra.insert(other.to_string(), parsed);
                }
            }
        }
        Ok(cfg)
    }
}

/// Resolve legacy short key names to the canonical long names.
fn canonical_key(key: &str) -> &str {
    match key {
        "warn_threshold" => "warn_score_threshold",
        "error_threshold" => "error_score_threshold",
        "window" => "date_window_days",
        "tolerance" => "amount_tolerance",
        "cash_only" => "cash_accounts_only",
        "property_match" => "require_property_match",
        other => other,
    }
}

/// Booleans are true iff the lowercased value is one of "1", "true", "yes".
fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes")
}

fn parse_float(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidFloat {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Split a configuration string into tokens with shell-style quoting.
///
/// Whitespace separates tokens; single or double quotes group characters
/// (including whitespace) within a token and are stripped from the result.
fn split_tokens(input: &str) -> Result<Vec<String>, ConfigError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in input.chars() {
        match quote {
            Some(q) => {
                if ch == q {
                    quote = None;
                } else {
                    current.push(ch);
                }
            }
            None => {
                if ch == '\'' || ch == '"' {
                    quote = Some(ch);
                    in_token = true;
                } else if ch.is_whitespace() {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                } else {
                    current.push(ch);
                    in_token = true;
                }
            }
        }
    }
    if quote.is_some() {
        return Err(ConfigError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
