//! Core types for beanlint
//!
//! This crate provides the minimal ledger data model shared by the beanlint
//! validation plugins:
//!
//! - [`Amount`] - A decimal number with a currency
//! - [`Posting`] - One leg of a transaction (account plus optional amount)
//! - [`Transaction`] - A dated set of postings with tags and metadata
//! - [`Metadata`] / [`MetaValue`] - Key-value annotations on transactions
//!
//! # Example
//!
//! ```
//! use beanlint_core::{Amount, Posting, Transaction};
//! use rust_decimal_macros::dec;
//! use chrono::NaiveDate;
//!
//! let txn = Transaction::new(
//!     NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
//!     "Rent payment",
//! )
//! .with_payee("Tenant")
//! .with_tag("206-hoover-ave")
//! .with_posting(Posting::new(
//!     "Assets:Cash:Checking",
//!     Amount::new(dec!(100.00), "USD"),
//! ))
//! .with_posting(Posting::auto("Income:Rent:206-Hoover-Ave"));
//!
//! assert_eq!(txn.postings.len(), 2);
//! assert!(txn.postings[1].units.is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod account;
pub mod amount;
pub mod transaction;

pub use account::{is_cash_account, parent, segments, CASH_ACCOUNT_PREFIX};
pub use amount::Amount;
pub use transaction::{sort_by_date, MetaValue, Metadata, Posting, Transaction};

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
