//! Require `comments` metadata on transactions.
//!
//! Every transaction must document itself: a `comments` metadata key ties
//! the entry back to a statement line or a note. Transactions without one
//! are error-level findings.

use beanlint_core::Transaction;

use crate::diagnostic::{Diagnostic, PluginError};
use crate::registry::{LedgerPlugin, PluginRun};

/// Plugin name, also used as the synthetic source filename.
pub const PLUGIN_NAME: &str = "comments_required";

/// The comments-required plugin. Takes no configuration.
pub struct CommentsRequiredPlugin;

impl LedgerPlugin for CommentsRequiredPlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn run(
        &self,
        transactions: Vec<Transaction>,
        _config: Option<&str>,
    ) -> Result<PluginRun, PluginError> {
        let diagnostics = transactions
            .iter()
            .filter(|txn| !txn.meta.contains_key("comments"))
            .map(|txn| {
                Diagnostic::error(
                    PLUGIN_NAME,
                    "Missing 'comments' metadata on transaction",
                    txn,
                )
            })
            .collect();
        Ok(PluginRun {
            transactions,
            diagnostics,
        })
    }
}
