//! Diagnostic types shared by all plugins.
//!
//! A [`Diagnostic`] is a validation finding, not a software error: it names
//! the offending transaction, carries a human-readable message, and attaches
//! source metadata for reporting. Software errors (a malformed plugin
//! configuration) are [`PluginError`] and abort the run instead.

use beanlint_core::{MetaValue, Metadata, Transaction};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::find_duplicates::ConfigError;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Validation failure, returned to the caller.
    Error,
    /// Suspicious but non-blocking; logged only at the plugin boundary.
    Warning,
}

impl Severity {
    /// Check if this severity blocks downstream processing.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

/// A validation finding about a single transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity of the finding.
    pub severity: Severity,
    /// Source metadata: the flagged transaction's own metadata, or a
    /// synthetic placeholder naming the plugin (line 0) when it has none.
    pub source: Metadata,
    /// Human-readable message.
    pub message: String,
    /// The flagged transaction.
    pub entry: Transaction,
}

impl Diagnostic {
    /// Create a diagnostic attributed to `entry`.
    ///
    /// The source location is the entry's own metadata when present,
    /// otherwise a placeholder tagged with the plugin name.
    #[must_use]
    pub fn new(
        severity: Severity,
        plugin: &str,
        message: impl Into<String>,
        entry: &Transaction,
    ) -> Self {
        let source = if entry.meta.is_empty() {
            placeholder_meta(plugin)
        } else {
            entry.meta.clone()
        };
        Self {
            severity,
            source,
            message: message.into(),
            entry: entry.clone(),
        }
    }

    /// Create an error-level diagnostic.
    #[must_use]
    pub fn error(plugin: &str, message: impl Into<String>, entry: &Transaction) -> Self {
        Self::new(Severity::Error, plugin, message, entry)
    }

    /// Create a warning-level diagnostic.
    #[must_use]
    pub fn warning(plugin: &str, message: impl Into<String>, entry: &Transaction) -> Self {
        Self::new(Severity::Warning, plugin, message, entry)
    }
}

/// Synthetic source metadata for transactions that carry none.
#[must_use]
pub fn placeholder_meta(plugin: &str) -> Metadata {
    let mut meta = Metadata::new();
    meta.insert(
        "filename".to_string(),
        MetaValue::String(format!("<{plugin}>")),
    );
    meta.insert("lineno".to_string(), MetaValue::Number(Decimal::ZERO));
    meta
}

/// A fatal plugin failure.
///
/// Any parse failure in configuration aborts the whole run: a broken
/// config must not silently degrade detection.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The plugin configuration string could not be parsed.
    #[error("invalid plugin configuration: {0}")]
    Config(#[from] ConfigError),
}
