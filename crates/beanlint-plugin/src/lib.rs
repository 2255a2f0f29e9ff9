//! Validation plugins for beanlint.
//!
//! Plugins are single-pass, stateless checks over a transaction sequence.
//! Each returns the sequence unchanged along with its findings; a plugin
//! never performs I/O of its own.
//!
//! # Built-in plugins
//!
//! - `find_duplicates`: fuzzy duplicate-transaction detection with a
//!   weighted confidence score and configurable warn/error thresholds
//! - `comments_required`: errors on transactions missing `comments`
//!   metadata
//!
//! # Example
//!
//! ```
//! use beanlint_plugin::PluginRegistry;
//! use beanlint_core::{Amount, Posting, Transaction};
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let txn = |day| {
//!     Transaction::new(NaiveDate::from_ymd_opt(2025, 1, day).unwrap(), "Rent")
//!         .with_posting(Posting::new(
//!             "Assets:Cash:Checking",
//!             Amount::new(dec!(100.00), "USD"),
//!         ))
//!         .with_posting(Posting::auto("Income:Rent"))
//! };
//!
//! let registry = PluginRegistry::new();
//! let plugin = registry.find("find_duplicates").unwrap();
//! let run = plugin
//!     .run(vec![txn(12), txn(12)], Some("window=3 tolerance=0.03"))
//!     .unwrap();
//! assert_eq!(run.diagnostics.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod comments_required;
pub mod diagnostic;
pub mod find_duplicates;
pub mod registry;

pub use comments_required::CommentsRequiredPlugin;
pub use diagnostic::{placeholder_meta, Diagnostic, PluginError, Severity};
pub use find_duplicates::{
    detect, score_pair, ConfigError, DedupConfig, FindDuplicatesPlugin, ScoreParts,
};
pub use registry::{LedgerPlugin, PluginRegistry, PluginRun};
