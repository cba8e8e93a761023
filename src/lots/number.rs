// SPDX-License-Identifier: MPL-2.0
//! Lot number newtype.
//!
//! A lot number is a positive integer with no upper bound beyond `u64`.
//! Several images normally share one number; uniqueness is not required.

use crate::error::LotError;
use std::fmt;
use std::num::NonZeroU64;

/// A positive lot number, guaranteed to be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LotNumber(NonZeroU64);

impl LotNumber {
    /// Lot 1, the counter's starting point.
    pub const FIRST: Self = Self(NonZeroU64::MIN);

    /// Creates a lot number, returning `None` for zero.
    #[must_use]
    pub fn new(value: u64) -> Option<Self> {
        NonZeroU64::new(value).map(Self)
    }

    /// Parses operator input as a decimal lot number.
    ///
    /// Surrounding whitespace is ignored. Empty input, non-digits, fractions,
    /// zero, negatives and values beyond `u64` are all rejected with
    /// [`LotError::InvalidLotNumber`] carrying the original input.
    pub fn parse(input: &str) -> Result<Self, LotError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LotError::InvalidLotNumber(input.to_string()));
        }
        trimmed
            .parse::<u64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| LotError::InvalidLotNumber(input.to_string()))
    }

    /// Returns the raw value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// The following lot number, saturating at `u64::MAX`.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The preceding lot number, or `None` from lot 1.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        Self::new(self.get() - 1)
    }
}

impl Default for LotNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<i64> for LotNumber {
    type Error = LotError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| LotError::InvalidLotNumber(value.to_string()))
    }
}

impl From<LotNumber> for u64 {
    fn from(lot: LotNumber) -> Self {
        lot.get()
    }
}

impl fmt::Display for LotNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
