//! Plugin trait and built-in plugin registry.

use beanlint_core::Transaction;

use crate::comments_required::CommentsRequiredPlugin;
use crate::diagnostic::{Diagnostic, PluginError};
use crate::find_duplicates::FindDuplicatesPlugin;

/// Result of a plugin pass.
#[derive(Debug)]
pub struct PluginRun {
    /// The input transactions, unmodified.
    pub transactions: Vec<Transaction>,
    /// Error-level findings. Warning-level findings are logged by the
    /// plugin and do not appear here.
    pub diagnostics: Vec<Diagnostic>,
}

/// Trait for ledger validation plugins.
///
/// A plugin is a single-pass, stateless function of (transactions,
/// configuration) to diagnostics. Plugins never mutate the transaction
/// sequence; it is handed back unchanged in the [`PluginRun`].
pub trait LedgerPlugin: Send + Sync {
    /// Plugin name.
    fn name(&self) -> &str;

    /// Run the plugin over a transaction sequence.
    ///
    /// `config` is the plugin's raw configuration string, if any.
    fn run(
        &self,
        transactions: Vec<Transaction>,
        config: Option<&str>,
    ) -> Result<PluginRun, PluginError>;
}

/// Registry of built-in plugins.
pub struct PluginRegistry {
    plugins: Vec<Box<dyn LedgerPlugin>>,
}

impl PluginRegistry {
    /// Create a new registry with all built-in plugins.
    #[must_use]
    pub fn new() -> Self {
        Self {
            plugins: vec![
                Box::new(FindDuplicatesPlugin),
                Box::new(CommentsRequiredPlugin),
            ],
        }
    }

    /// Find a plugin by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&dyn LedgerPlugin> {
        // Accept the fully qualified form used in ledger files.
        let name = name.strip_prefix("beanlint.plugins.").unwrap_or(name);

        self.plugins
            .iter()
            .find(|p| p.name() == name)
            .map(std::convert::AsRef::as_ref)
    }

    /// Check if a name refers to a built-in plugin.
    #[must_use]
    pub fn is_builtin(name: &str) -> bool {
        let name = name.strip_prefix("beanlint.plugins.").unwrap_or(name);

        matches!(name, "find_duplicates" | "comments_required")
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
