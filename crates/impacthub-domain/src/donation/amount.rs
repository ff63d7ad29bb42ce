use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

pub const CURRENCY: &str = "INR";
pub const CURRENCY_SYMBOL: &str = "₹";
pub const MINOR_UNITS_PER_MAJOR: u64 = 100;
/// 2 units
pub const MIN_DONATION_MINOR_UNITS: u64 = 2 * MINOR_UNITS_PER_MAJOR;
/// 100 units, pre-filled when the donation dialog opens
pub const DEFAULT_DONATION_MINOR_UNITS: u64 = 100 * MINOR_UNITS_PER_MAJOR;

/// A donation amount held in minor currency units (paise).
///
/// Any non-negative amount can be entered; the minimum is only enforced by
/// [`DonationAmount::validate`] when the user submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DonationAmount(u64);

impl DonationAmount {
    pub fn from_minor_units(minor: u64) -> Self {
        Self(minor)
    }

    pub fn from_major_units(major: u64) -> Self {
        Self(major.saturating_mul(MINOR_UNITS_PER_MAJOR))
    }

    pub fn minimum() -> Self {
        Self(MIN_DONATION_MINOR_UNITS)
    }

    /// Parse user input such as `100`, `12.5` or `₹12.50`.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let raw = input.trim().trim_start_matches(CURRENCY_SYMBOL).trim();
        let invalid = || DomainError::Validation(format!("Invalid donation amount: {}", input.trim()));

        if raw.is_empty() {
            return Err(invalid());
        }

        let (whole, fraction) = match raw.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (raw, ""),
        };

        if fraction.len() > 2
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
            || (whole.is_empty() && fraction.is_empty())
        {
            return Err(invalid());
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(MINOR_UNITS_PER_MAJOR)
            .and_then(|minor| minor.checked_add(fraction))
            .map(Self)
            .ok_or_else(invalid)
    }

    /// Reject amounts below the platform minimum
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.0 < MIN_DONATION_MINOR_UNITS {
            return Err(DomainError::Validation(format!(
                "Minimum donation is {}",
                Self::minimum()
            )));
        }
        Ok(())
    }

    pub fn minor_units(&self) -> u64 {
        self.0
    }

    /// The amount as the backend expects it: a number in major units.
    pub fn to_wire_value(&self) -> serde_json::Value {
        if self.0 % MINOR_UNITS_PER_MAJOR == 0 {
            serde_json::Value::from(self.0 / MINOR_UNITS_PER_MAJOR)
        } else {
            serde_json::Value::from(self.0 as f64 / MINOR_UNITS_PER_MAJOR as f64)
        }
    }
}

impl Default for DonationAmount {
    fn default() -> Self {
        Self(DEFAULT_DONATION_MINOR_UNITS)
    }
}

impl std::fmt::Display for DonationAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / MINOR_UNITS_PER_MAJOR;
        let fraction = self.0 % MINOR_UNITS_PER_MAJOR;
        if fraction == 0 {
            write!(f, "{}{}", CURRENCY_SYMBOL, whole)
        } else {
            write!(f, "{}{}.{:02}", CURRENCY_SYMBOL, whole, fraction)
        }
    }
}
