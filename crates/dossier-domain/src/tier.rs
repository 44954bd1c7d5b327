//! Tier module - coarse priority buckets for evidence

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error produced when a tier cannot be built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TierError {
    /// Numeric value outside `0..=7`
    #[error("Invalid tier: {0} (expected 0..=7)")]
    OutOfRange(i64),

    /// Text that is not an integer
    #[error("Invalid tier: '{0}' is not a number")]
    NotANumber(String),
}

/// Priority bucket for an evidence item
///
/// Tier 0 is the single foundational item of a run (the CSV summary);
/// higher numbers are progressively less authoritative:
/// - 0: foundational population summary
/// - 1-2: industry and strategic knowledge packs
/// - 3-4: supplier/competitor profiles and coverage
/// - 5-7: case studies, site pages, external references
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Tier(pub(crate) u8);

impl Tier {
    /// The foundational tier
    pub const FOUNDATION: Tier = Tier(0);

    /// The least authoritative tier
    pub const LOWEST: Tier = Tier(7);

    /// Create a tier, rejecting values outside `0..=7`
    ///
    /// # Examples
    ///
    /// ```
    /// use dossier_domain::Tier;
    ///
    /// assert_eq!(Tier::new(3).unwrap().value(), 3);
    /// assert!(Tier::new(8).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self, TierError> {
        if value > Self::LOWEST.0 {
            return Err(TierError::OutOfRange(i64::from(value)));
        }
        Ok(Self(value))
    }

    /// Get the raw tier number
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Whether this is the foundational tier
    pub fn is_foundation(&self) -> bool {
        *self == Self::FOUNDATION
    }

    /// Iterate over every tier, most authoritative first
    pub fn all() -> impl Iterator<Item = Tier> {
        (Self::FOUNDATION.0..=Self::LOWEST.0).map(Tier)
    }
}

impl TryFrom<i64> for Tier {
    type Error = TierError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(|v| Tier::new(v).ok())
            .ok_or(TierError::OutOfRange(value))
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.0
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Tier {
    type Err = TierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| TierError::NotANumber(s.to_string()))?;
        Tier::try_from(value)
    }
}
