//! Duplicate-transaction detection with confidence scoring.
//!
//! The detector compares transactions within a small date window and
//! classifies likely-duplicate pairs by a weighted confidence score:
//! at or above the error threshold the later transaction is flagged as
//! an error-level finding; at or above the warn threshold it is logged
//! as a warning; below both it is ignored.
//!
//! The pipeline is a single stateless pass: bucket by currency (and
//! amount, when the tolerance is zero), generate date-windowed candidate
//! pairs per bucket, score each pair, and classify. See the submodules
//! for each stage.
//!
//! # Configuration
//!
//! ```
//! use beanlint_plugin::find_duplicates::DedupConfig;
//!
//! let cfg = DedupConfig::parse(
//!     "warn_threshold=0.80 error_threshold=0.95 window=3 tolerance=0.03",
//! )
//! .unwrap();
//! assert_eq!(cfg.date_window_days, 3);
//! ```

mod config;
mod index;
mod score;

pub use config::{ConfigError, DedupConfig};
pub use score::ScoreParts;

use beanlint_core::Transaction;
use tracing::warn;

use crate::diagnostic::{Diagnostic, PluginError, Severity};
use crate::registry::{LedgerPlugin, PluginRun};

use index::{candidate_pairs, index_transactions};
use score::confidence_score;

/// Plugin name, also used as the synthetic source filename.
pub const PLUGIN_NAME: &str = "find_duplicates";

/// The duplicate-detection plugin.
///
/// At the plugin boundary, warning-level findings are logged and only
/// error-level diagnostics are returned; use [`detect`] directly to
/// observe both severities.
pub struct FindDuplicatesPlugin;

impl LedgerPlugin for FindDuplicatesPlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn run(
        &self,
        transactions: Vec<Transaction>,
        config: Option<&str>,
    ) -> Result<PluginRun, PluginError> {
        let cfg = DedupConfig::parse(config.unwrap_or_default())?;
        let mut diagnostics = Vec::new();
        for diag in detect(&transactions, &cfg) {
            match diag.severity {
                Severity::Error => diagnostics.push(diag),
                Severity::Warning => warn!(target: "beanlint::find_duplicates", "{}", diag.message),
            }
        }
        Ok(PluginRun {
            transactions,
            diagnostics,
        })
    }
}

/// Scan a transaction sequence for likely duplicates.
///
/// Returns diagnostics of both severities, in a deterministic order for
/// fixed inputs. The input sequence is never mutated.
#[must_use]
pub fn detect(transactions: &[Transaction], cfg: &DedupConfig) -> Vec<Diagnostic> {
    let index = index_transactions(transactions, cfg);

    // Bucket iteration order must not depend on hasher state.
    let mut keys: Vec<_> = index.keys().collect();
    keys.sort();

    let mut diagnostics = Vec::new();
    for key in keys {
        for (earlier, later) in candidate_pairs(&index[key], cfg.date_window_days) {
            let (confidence, parts) = confidence_score(earlier, later, cfg);
            if confidence >= cfg.error_score_threshold {
                diagnostics.push(Diagnostic::error(
                    PLUGIN_NAME,
                    message(earlier, later, confidence, &parts),
                    later,
                ));
            } else if confidence >= cfg.warn_score_threshold {
                diagnostics.push(Diagnostic::warning(
                    PLUGIN_NAME,
                    message(earlier, later, confidence, &parts),
                    later,
                ));
            }
        }
    }
    diagnostics
}

/// Score a single candidate pair.
///
/// Exposed for embedders that want the raw confidence and component
/// breakdown without running the full detector.
#[must_use]
pub fn score_pair(a: &Transaction, b: &Transaction, cfg: &DedupConfig) -> (f64, ScoreParts) {
    confidence_score(a, b, cfg)
}

/// Build the diagnostic message for a duplicate candidate.
///
/// Reports the rounded score, the component breakdown, and which
/// transaction likely duplicates which.
fn message(earlier: &Transaction, later: &Transaction, score: f64, parts: &ScoreParts) -> String {
    let mut detail = format!(
        "amount={:.2}, date={:.2}, account={:.2}",
        parts.amount, parts.date, parts.account
    );
    if let Some(property) = parts.property {
        detail.push_str(&format!(", property={property:.2}"));
    }
    format!(
        "Duplicate confidence {score:.2} ({detail}): {} likely duplicates {}",
        later.date, earlier.date
    )
}
