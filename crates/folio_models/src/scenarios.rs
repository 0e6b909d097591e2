//! Named market regimes.
//!
//! A regime shifts every drift additively and scales every volatility
//! multiplicatively:
//!
//! | regime | drift shift | volatility multiplier |
//! |---|---|---|
//! | bull | +0.05 | 0.8 |
//! | bear | -0.15 | 1.7 |
//! | volatile | 0.0 | 2.0 |
//! | normal (and any unrecognised name) | 0.0 | 1.0 |
//!
//! Name matching is case-insensitive and never fails.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::params::AssetParameters;

/// Market regime applied to drift and volatility before simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MarketScenario {
    /// No adjustment.
    #[default]
    Normal,
    /// Higher drift, calmer markets.
    Bull,
    /// Sharply lower drift, much higher volatility.
    Bear,
    /// Unchanged drift, doubled volatility.
    Volatile,
}

impl MarketScenario {
    /// Resolve a regime name; unknown names fall back to [`MarketScenario::Normal`].
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "bull" => Self::Bull,
            "bear" => Self::Bear,
            "volatile" => Self::Volatile,
            _ => Self::Normal,
        }
    }

    /// All regimes, in display order.
    pub fn all() -> [Self; 4] {
        [Self::Normal, Self::Bull, Self::Bear, Self::Volatile]
    }

    /// Lowercase regime name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bull => "bull",
            Self::Bear => "bear",
            Self::Volatile => "volatile",
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Normal => "Historical drift and volatility",
            Self::Bull => "Drift +5%, volatility x0.8",
            Self::Bear => "Drift -15%, volatility x1.7",
            Self::Volatile => "Volatility x2.0",
        }
    }

    /// Additive drift adjustment.
    pub fn drift_shift(&self) -> f64 {
        match self {
            Self::Bull => 0.05,
            Self::Bear => -0.15,
            Self::Normal | Self::Volatile => 0.0,
        }
    }

    /// Multiplicative volatility adjustment.
    pub fn vol_multiplier(&self) -> f64 {
        match self {
            Self::Bull => 0.8,
            Self::Bear => 1.7,
            Self::Volatile => 2.0,
            Self::Normal => 1.0,
        }
    }

    /// Adjusted copies of `mu` and `sigma`.
    pub fn adjust(&self, mu: &[f64], sigma: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let shift = self.drift_shift();
        let scale = self.vol_multiplier();
        (
            mu.iter().map(|m| m + shift).collect(),
            sigma.iter().map(|s| s * scale).collect(),
        )
    }

    /// Adjusted copy of `params`; the correlation structure is untouched.
    pub fn apply(&self, params: &AssetParameters) -> AssetParameters {
        params.shifted(self.drift_shift(), self.vol_multiplier())
    }
}

/// Adjust `mu` and `sigma` for the regime called `scenario`.
///
/// ```
/// use folio_models::adjust;
///
/// let (mu, sigma) = adjust(&[0.1], &[0.2], "Volatile");
/// assert_eq!(mu, vec![0.1]);
/// assert_eq!(sigma, vec![0.4]);
/// ```
pub fn adjust(mu: &[f64], sigma: &[f64], scenario: &str) -> (Vec<f64>, Vec<f64>) {
    MarketScenario::from_name(scenario).adjust(mu, sigma)
}

impl FromStr for MarketScenario {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<&str> for MarketScenario {
    fn from(s: &str) -> Self {
        Self::from_name(s)
    }
}

impl fmt::Display for MarketScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
