//! Amount type representing a decimal number with a currency.
//!
//! An [`Amount`] combines a decimal quantity with a currency code. Decimal
//! arithmetic keeps money comparisons exact; tolerance-based comparison is
//! provided for checks that accept small differences.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// An amount is a quantity paired with a currency.
///
/// # Examples
///
/// ```
/// use beanlint_core::Amount;
/// use rust_decimal_macros::dec;
///
/// let amount = Amount::new(dec!(100.00), "USD");
/// assert_eq!(amount.number, dec!(100.00));
/// assert_eq!(amount.currency, "USD");
///
/// let other = Amount::new(dec!(50.00), "USD");
/// let sum = &amount + &other;
/// assert_eq!(sum.number, dec!(150.00));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    /// The decimal quantity
    pub number: Decimal,
    /// The currency code (e.g., "USD", "EUR")
    pub currency: String,
}

impl Amount {
    /// Create a new amount.
    #[must_use]
    pub fn new(number: Decimal, currency: impl Into<String>) -> Self {
        Self {
            number,
            currency: currency.into(),
        }
    }

    /// Create a zero amount with the given currency.
    #[must_use]
    pub fn zero(currency: impl Into<String>) -> Self {
        Self {
            number: Decimal::ZERO,
            currency: currency.into(),
        }
    }

    /// Check if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.number.is_zero()
    }

    /// Check if the amount is negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.number.is_sign_negative()
    }

    /// Get the absolute value of this amount.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            number: self.number.abs(),
            currency: self.currency.clone(),
        }
    }

    /// Check if this amount is near another amount within tolerance.
    ///
    /// Returns `false` if currencies don't match.
    #[must_use]
    pub fn is_near(&self, other: &Self, tolerance: Decimal) -> bool {
        self.currency == other.currency && (self.number - other.number).abs() <= tolerance
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.currency)
    }
}

impl Add for &Amount {
    type Output = Amount;

    /// Add two amounts.
    ///
    /// # Panics
    ///
    /// Panics if currencies don't match.
    fn add(self, other: Self) -> Amount {
        assert_eq!(
            self.currency, other.currency,
            "cannot add amounts with different currencies: {} and {}",
            self.currency, other.currency
        );
        Amount {
            number: self.number + other.number,
            currency: self.currency.clone(),
        }
    }
}

impl AddAssign<&Self> for Amount {
    fn add_assign(&mut self, other: &Self) {
        assert_eq!(
            self.currency, other.currency,
            "cannot add amounts with different currencies: {} and {}",
            self.currency, other.currency
        );
        self.number += other.number;
    }
}

impl Sub for &Amount {
    type Output = Amount;

    /// Subtract two amounts.
    ///
    /// # Panics
    ///
    /// Panics if currencies don't match.
    fn sub(self, other: Self) -> Amount {
        assert_eq!(
            self.currency, other.currency,
            "cannot subtract amounts with different currencies: {} and {}",
            self.currency, other.currency
        );
        Amount {
            number: self.number - other.number,
            currency: self.currency.clone(),
        }
    }
}

impl SubAssign<&Self> for Amount {
    fn sub_assign(&mut self, other: &Self) {
        assert_eq!(
            self.currency, other.currency,
            "cannot subtract amounts with different currencies: {} and {}",
            self.currency, other.currency
        );
        self.number -= other.number;
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            number: -self.number,
            currency: self.currency,
        }
    }
}

impl Neg for &Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount {
            number: -self.number,
            currency: self.currency.clone(),
        }
    }
}
