//! # Coin Arithmetic
//!
//! Exact integer coin amounts keyed by denomination.
//!
//! A submitted fee arrives as a raw `Vec<Coin>` and may be malformed
//! (duplicate denominations, zero amounts, bad denoms). `Coins` is the
//! validated form: at most one entry per denom, every amount positive,
//! iteration in denom order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A single `(denom, amount)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Reasons a raw coin list is not a valid coin set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoinsError {
    #[error("invalid denom: {0:?}")]
    InvalidDenom(String),

    #[error("duplicate denom: {0}")]
    DuplicateDenom(String),

    #[error("zero amount for denom {0}")]
    ZeroAmount(String),
}

/// Checks a denomination: a leading letter followed by 2-127 characters of
/// `[A-Za-z0-9/:._-]`.
pub fn validate_denom(denom: &str) -> Result<(), CoinsError> {
    let mut chars = denom.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-'));
    if first_ok && rest_ok && (3..=128).contains(&denom.len()) {
        Ok(())
    } else {
        Err(CoinsError::InvalidDenom(denom.to_string()))
    }
}

/// A validated set of coins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coins(BTreeMap<String, u128>);

impl Coins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a raw coin list.
    pub fn from_coins(coins: &[Coin]) -> Result<Self, CoinsError> {
        let mut set = BTreeMap::new();
        for coin in coins {
            validate_denom(&coin.denom)?;
            if coin.amount == 0 {
                return Err(CoinsError::ZeroAmount(coin.denom.clone()));
            }
            if set.insert(coin.denom.clone(), coin.amount).is_some() {
                return Err(CoinsError::DuplicateDenom(coin.denom.clone()));
            }
        }
        Ok(Self(set))
    }

    /// Builds a set from a single coin, dropping it if the amount is zero.
    pub fn from_coin(coin: Coin) -> Self {
        let mut set = BTreeMap::new();
        if coin.amount > 0 {
            set.insert(coin.denom, coin.amount);
        }
        Self(set)
    }

    /// Amount held in `denom`, zero when absent.
    pub fn amount_of(&self, denom: &str) -> u128 {
        self.0.get(denom).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coin> + '_ {
        self.0.iter().map(|(denom, amount)| Coin::new(denom.clone(), *amount))
    }

    /// Sum of two sets. Amounts saturate at `u128::MAX`.
    pub fn add(&self, other: &Coins) -> Coins {
        let mut set = self.0.clone();
        for (denom, amount) in &other.0 {
            let entry = set.entry(denom.clone()).or_insert(0);
            *entry = entry.saturating_add(*amount);
        }
        Coins(set)
    }

    /// `self - other`, or `None` if any denom would go negative.
    pub fn checked_sub(&self, other: &Coins) -> Option<Coins> {
        let mut set = self.0.clone();
        for (denom, amount) in &other.0 {
            let held = set.get(denom).copied().unwrap_or(0);
            let left = held.checked_sub(*amount)?;
            if left == 0 {
                set.remove(denom);
            } else {
                set.insert(denom.clone(), left);
            }
        }
        Some(Coins(set))
    }

    /// `self - other`, flooring every denom at zero.
    pub fn saturating_sub(&self, other: &Coins) -> Coins {
        let set = self
            .0
            .iter()
            .filter_map(|(denom, amount)| {
                let left = amount.saturating_sub(other.amount_of(denom));
                (left > 0).then(|| (denom.clone(), left))
            })
            .collect();
        Coins(set)
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

/// Formats a raw (possibly malformed) coin list for diagnostics.
pub fn format_coin_list(coins: &[Coin]) -> String {
    coins
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
