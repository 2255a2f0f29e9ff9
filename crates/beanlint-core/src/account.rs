//! Helpers for colon-delimited hierarchical account names.

/// Root prefix of cash-like accounts.
pub const CASH_ACCOUNT_PREFIX: &str = "Assets:";

/// Check whether an account is cash-like (rooted under `Assets:`).
#[must_use]
pub fn is_cash_account(account: &str) -> bool {
    account.starts_with(CASH_ACCOUNT_PREFIX)
}

/// Iterate over the colon-delimited segments of an account name.
pub fn segments(account: &str) -> impl Iterator<Item = &str> {
    account.split(':')
}

/// Get the parent account, if any.
///
/// `Assets:Cash:Checking` has parent `Assets:Cash`; a root account like
/// `Assets` has none.
#[must_use]
pub fn parent(account: &str) -> Option<&str> {
    account.rfind(':').map(|idx| &account[..idx])
}
