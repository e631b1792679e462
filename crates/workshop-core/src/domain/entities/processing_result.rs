//! Per-step outcomes and the aggregate [`ProcessingResult`].
//!
//! Every type here is a plain value: created once, never mutated, compared
//! by value. Strategies return the step outcomes; the orchestrator assembles
//! them into a `ProcessingResult`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::gift_request::{GiftRequest, RequestId},
    error::DomainError,
    value_objects::{Money, PipelineStep},
};

/// What the discount step decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountOutcome {
    /// Name of the policy that produced this outcome.
    pub policy: String,
    pub rate_percent: u8,
    pub amount: Money,
}

impl DiscountOutcome {
    /// Apply `rate_percent` to `subtotal`.
    pub fn at_rate(policy: impl Into<String>, rate_percent: u8, subtotal: Money) -> Self {
        Self {
            policy: policy.into(),
            rate_percent,
            amount: subtotal.percent(rate_percent),
        }
    }

    pub fn none(policy: impl Into<String>) -> Self {
        Self {
            policy: policy.into(),
            rate_percent: 0,
            amount: Money::ZERO,
        }
    }
}

/// One wrapped line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrappedParcel {
    pub item: String,
    pub description: String,
}

/// What the wrapping step produced: one parcel per line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrappingOutcome {
    pub style: String,
    pub parcels: Vec<WrappedParcel>,
    pub surcharge: Money,
}

impl WrappingOutcome {
    pub fn parcel_count(&self) -> usize {
        self.parcels.len()
    }
}

/// When the gifts are expected to arrive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryEstimate {
    pub carrier: String,
    pub days: u32,
    pub arrives_on: NaiveDate,
}

impl DeliveryEstimate {
    /// `days` after `dispatch_date`.
    ///
    /// Fails when the arrival date would fall past the end of the calendar.
    pub fn after(
        carrier: impl Into<String>,
        dispatch_date: NaiveDate,
        days: u32,
    ) -> Result<Self, DomainError> {
        let arrives_on = dispatch_date
            .checked_add_days(chrono::Days::new(u64::from(days)))
            .ok_or(DomainError::ArrivalOutOfRange {
                dispatch: dispatch_date,
                days,
            })?;
        Ok(Self {
            carrier: carrier.into(),
            days,
            arrives_on,
        })
    }
}

/// Input of the notification step, assembled from the earlier steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub request_id: RequestId,
    pub recipient: String,
    pub item_count: usize,
    pub total: Money,
    pub discount: Money,
    pub carrier: String,
    pub arrives_on: NaiveDate,
}

impl Notice {
    /// The text every channel sends.
    pub fn message(&self) -> String {
        format!("Dear {}, {}", self.recipient, self.body())
    }

    /// The message without the salutation, for channels that add their own.
    pub fn body(&self) -> String {
        let mut text = format!(
            "your {} gift{} ({}) will arrive by {} on {}.",
            self.item_count,
            if self.item_count == 1 { "" } else { "s" },
            self.total,
            self.carrier,
            self.arrives_on.format("%Y-%m-%d"),
        );
        if self.discount > Money::ZERO {
            text.push_str(&format!(" You saved {} for being nice!", self.discount));
        }
        text
    }
}

/// Confirmation from the notification step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationReceipt {
    pub channel: String,
    pub message: String,
    /// `false` when the channel deliberately sent nothing.
    pub delivered: bool,
}

/// What the production step booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub station: String,
    pub build_minutes: u64,
    /// Remaining shared capacity after this booking, when the station tracks it.
    pub remaining_capacity: Option<u64>,
}

/// Aggregate output of one complete pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub request_id: RequestId,
    pub recipient: String,
    pub subtotal: Money,
    pub discount: DiscountOutcome,
    pub wrapping: WrappingOutcome,
    pub delivery: DeliveryEstimate,
    pub notification: NotificationReceipt,
    pub production: ProductionRecord,
    /// `subtotal - discount + wrapping surcharge`.
    pub total: Money,
    /// Steps executed, in order.
    pub steps: Vec<PipelineStep>,
}

impl ProcessingResult {
    /// Total charged for a request once discount and wrapping are known.
    ///
    /// Returns `None` when the discount exceeds the subtotal or the total
    /// does not fit in [`Money`].
    pub fn charge(
        request: &GiftRequest,
        discount: &DiscountOutcome,
        wrapping: &WrappingOutcome,
    ) -> Option<Money> {
        request
            .subtotal()
            .checked_sub(discount.amount)
            .and_then(|net| net.checked_add(wrapping.surcharge))
    }
}
