use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    value_objects::{Category, Money},
};

/// Most a single gift may cost, in cents ($1,000,000.00).
pub const MAX_COST_CENTS: u64 = 100_000_000;

/// Longest a single gift may take to build (one week).
pub const MAX_BUILD_MINUTES: u32 = 7 * 24 * 60;

/// One gift inside a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineItem {
    name: String,
    category: Category,
    cost: Money,
    build_minutes: u32,
}

impl LineItem {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        cost: Money,
        build_minutes: u32,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            cost,
            build_minutes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub const fn category(&self) -> Category {
        self.category
    }
    pub const fn cost(&self) -> Money {
        self.cost
    }
    pub const fn build_minutes(&self) -> u32 {
        self.build_minutes
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidLineItem {
                item: self.name.clone(),
                reason: "name cannot be blank".into(),
            });
        }
        if self.build_minutes == 0 {
            return Err(DomainError::InvalidLineItem {
                item: self.name.clone(),
                reason: "build time must be at least one minute".into(),
            });
        }
        if self.build_minutes > MAX_BUILD_MINUTES {
            return Err(DomainError::InvalidLineItem {
                item: self.name.clone(),
                reason: format!("build time is above {MAX_BUILD_MINUTES} minutes"),
            });
        }
        if self.cost.cents() > MAX_COST_CENTS {
            return Err(DomainError::InvalidLineItem {
                item: self.name.clone(),
                reason: format!(
                    "cost is above the limit of {}",
                    Money::from_cents(MAX_COST_CENTS)
                ),
            });
        }
        Ok(())
    }
}
