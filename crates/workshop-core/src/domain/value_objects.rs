//! Domain value objects: Category, NiceScore, Money, Region, PipelineStep.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality by value, no identity.
//! Their only job is to define the types, their string representations,
//! their `FromStr` parsers and the arithmetic the pipeline needs.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. If it is a pipeline step, add its keys to `catalog.rs`

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

// ── Category ─────────────────────────────────────────────────────────────────

/// What kind of gift a line item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Toy,
    Book,
    Game,
    Clothing,
    Electronics,
    Sweets,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Self::Toy,
        Self::Book,
        Self::Game,
        Self::Clothing,
        Self::Electronics,
        Self::Sweets,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Toy => "toy",
            Self::Book => "book",
            Self::Game => "game",
            Self::Clothing => "clothing",
            Self::Electronics => "electronics",
            Self::Sweets => "sweets",
        }
    }

    /// Fragile items need padding whatever the wrapping style.
    pub const fn is_fragile(self) -> bool {
        matches!(self, Self::Electronics)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "toy" | "toys" => Ok(Self::Toy),
            "book" | "books" => Ok(Self::Book),
            "game" | "games" => Ok(Self::Game),
            "clothing" | "clothes" => Ok(Self::Clothing),
            "electronics" | "gadget" | "tech" => Ok(Self::Electronics),
            "sweets" | "candy" => Ok(Self::Sweets),
            other => Err(DomainError::UnknownValue {
                kind: "category",
                value: other.to_string(),
            }),
        }
    }
}

// ── NiceScore ────────────────────────────────────────────────────────────────

/// How well-behaved the recipient has been, from 0 to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u8")]
pub struct NiceScore(u8);

impl NiceScore {
    pub const MAX: u8 = 100;

    pub fn new(score: u32) -> Result<Self, DomainError> {
        if score > u32::from(Self::MAX) {
            return Err(DomainError::NiceScoreOutOfRange { score });
        }
        Ok(Self(score as u8))
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for NiceScore {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NiceScore> for u8 {
    fn from(score: NiceScore) -> Self {
        score.0
    }
}

impl fmt::Display for NiceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Money ────────────────────────────────────────────────────────────────────

/// A non-negative amount in cents.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// `percent`% of this amount, rounded down to the cent.
    ///
    /// Computed in 128 bits; a result above `u64::MAX` (only possible for
    /// rates above 100%) saturates.
    pub const fn percent(self, percent: u8) -> Self {
        let scaled = self.0 as u128 * percent as u128 / 100;
        if scaled > u64::MAX as u128 {
            Self(u64::MAX)
        } else {
            Self(scaled as u64)
        }
    }

    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    pub const fn checked_sub(self, other: Money) -> Option<Money> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    pub const fn checked_times(self, factor: u64) -> Option<Money> {
        match self.0.checked_mul(factor) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Saturating multiplication. Validated requests stay far below the
    /// ceiling (see `MAX_COST_CENTS`).
    pub const fn times(self, factor: u64) -> Self {
        Self(self.0.saturating_mul(factor))
    }
}

/// Saturating addition, so sums over untrusted amounts never panic.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// ── Region ───────────────────────────────────────────────────────────────────

/// Delivery destination, coarse enough to estimate travel time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    NorthPole,
    NorthAmerica,
    SouthAmerica,
    Europe,
    Africa,
    Asia,
    Oceania,
    Antarctica,
}

impl Region {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NorthPole => "north-pole",
            Self::NorthAmerica => "north-america",
            Self::SouthAmerica => "south-america",
            Self::Europe => "europe",
            Self::Africa => "africa",
            Self::Asia => "asia",
            Self::Oceania => "oceania",
            Self::Antarctica => "antarctica",
        }
    }

    /// Distance from the workshop in bands of 0 (local) to 4 (farthest).
    pub const fn distance_band(self) -> u32 {
        match self {
            Self::NorthPole => 0,
            Self::NorthAmerica | Self::Europe => 1,
            Self::Asia | Self::Africa => 2,
            Self::SouthAmerica => 3,
            Self::Oceania | Self::Antarctica => 4,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north-pole" | "northpole" | "np" => Ok(Self::NorthPole),
            "north-america" | "northamerica" | "na" => Ok(Self::NorthAmerica),
            "south-america" | "southamerica" | "sa" | "latam" => Ok(Self::SouthAmerica),
            "europe" | "eu" => Ok(Self::Europe),
            "africa" | "af" => Ok(Self::Africa),
            "asia" | "apac" => Ok(Self::Asia),
            "oceania" | "australia" | "oc" => Ok(Self::Oceania),
            "antarctica" | "an" => Ok(Self::Antarctica),
            other => Err(DomainError::UnknownValue {
                kind: "region",
                value: other.to_string(),
            }),
        }
    }
}

// ── PipelineStep ─────────────────────────────────────────────────────────────

/// One stage of the processing pipeline. Each step is served by exactly one
/// strategy capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStep {
    Discount,
    Wrapping,
    Delivery,
    Notification,
    Production,
}

impl PipelineStep {
    /// Fixed execution order.
    pub const ORDER: [PipelineStep; 5] = [
        Self::Discount,
        Self::Wrapping,
        Self::Delivery,
        Self::Notification,
        Self::Production,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Discount => "discount",
            Self::Wrapping => "wrapping",
            Self::Delivery => "delivery",
            Self::Notification => "notification",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PipelineStep {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discount" => Ok(Self::Discount),
            "wrapping" | "wrap" => Ok(Self::Wrapping),
            "delivery" | "deliver" => Ok(Self::Delivery),
            "notification" | "notify" => Ok(Self::Notification),
            "production" | "produce" => Ok(Self::Production),
            other => Err(DomainError::UnknownValue {
                kind: "capability",
                value: other.to_string(),
            }),
        }
    }
}
