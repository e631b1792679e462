//! The `GiftRequest` aggregate and its typestate builder.
//!
//! A `GiftRequest` is the immutable unit of work handed to the pipeline: who
//! the gifts are for, where they go, how nice the recipient has been and
//! what is on the list. All fields are validated at build time; once a
//! `GiftRequest` exists it is guaranteed consistent.
//!
//! # Typestate builder
//!
//! The builder uses two phantom marker types (`NoRecipient` / `HasRecipient`)
//! to enforce at *compile time* that a recipient is named before anything
//! else. Runtime validation (`validate`) is still called at `build()` to
//! catch the rules the type system cannot express.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and CLI layers, not the domain.

use std::fmt;
use std::marker::PhantomData;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::line_item::{LineItem, MAX_COST_CENTS},
    error::DomainError,
    value_objects::{Money, NiceScore, Region},
};

/// Maximum number of line items in one request.
pub const MAX_ITEMS: usize = 25;

/// Maximum recipient name length, in characters.
pub const MAX_RECIPIENT_LEN: usize = 64;

/// Dispatch dates past this year are rejected, which keeps arrival-date
/// arithmetic far from the end of the calendar.
pub const LATEST_DISPATCH_YEAR: i32 = 9999;

// A full request at the per-item cost limit still leaves room for percentage
// math and wrapping surcharges in a `u64`.
const _: () = assert!(MAX_ITEMS as u64 * MAX_COST_CENTS <= u64::MAX / 100);

// ── Identity ──────────────────────────────────────────────────────────────────

/// Stable identifier of a request.
///
/// Uses `Uuid::new_v4()` (random) by default. `from_uuid` restores an
/// identifier read back from a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Aggregate root ────────────────────────────────────────────────────────────

/// A fully-validated gift request.
///
/// Every field is guaranteed consistent on construction:
/// - `recipient` is non-blank and at most [`MAX_RECIPIENT_LEN`] characters
/// - `items` holds between 1 and [`MAX_ITEMS`] valid line items
/// - `dispatch_date` falls no later than [`LATEST_DISPATCH_YEAR`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftRequest {
    id: RequestId,
    recipient: String,
    region: Region,
    nice_score: NiceScore,
    items: Vec<LineItem>,
    dispatch_date: NaiveDate,
}

impl GiftRequest {
    /// Start building a new `GiftRequest`.
    pub fn builder() -> GiftRequestBuilder<NoRecipient> {
        GiftRequestBuilder::new()
    }

    pub const fn id(&self) -> RequestId {
        self.id
    }
    pub fn recipient(&self) -> &str {
        &self.recipient
    }
    pub const fn region(&self) -> Region {
        self.region
    }
    pub const fn nice_score(&self) -> NiceScore {
        self.nice_score
    }
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }
    pub const fn dispatch_date(&self) -> NaiveDate {
        self.dispatch_date
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all item costs.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::cost).sum()
    }

    /// Sum of all item build times.
    pub fn total_build_minutes(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.build_minutes()))
            .sum()
    }

    /// Validate this request's internal consistency.
    ///
    /// Called automatically by the builder. Available for re-validation after
    /// deserialization.
    pub fn validate(&self) -> Result<(), DomainError> {
        let recipient = self.recipient.trim();
        if recipient.is_empty() {
            return Err(DomainError::InvalidRequest(
                "recipient cannot be blank".into(),
            ));
        }
        if recipient.chars().count() > MAX_RECIPIENT_LEN {
            return Err(DomainError::InvalidRequest(format!(
                "recipient name is longer than {MAX_RECIPIENT_LEN} characters"
            )));
        }

        if self.items.is_empty() {
            return Err(DomainError::InvalidRequest(
                "a request needs at least one item".into(),
            ));
        }
        if self.items.len() > MAX_ITEMS {
            return Err(DomainError::TooManyItems {
                count: self.items.len(),
                max: MAX_ITEMS,
            });
        }

        if self.dispatch_date.year() > LATEST_DISPATCH_YEAR {
            return Err(DomainError::InvalidRequest(format!(
                "dispatch date {} is after the year {LATEST_DISPATCH_YEAR}",
                self.dispatch_date
            )));
        }

        self.items.iter().try_for_each(LineItem::validate)
    }
}

impl fmt::Display for GiftRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, score {}, {} items)",
            self.recipient,
            self.region,
            self.nice_score,
            self.items.len()
        )
    }
}

// ── Typestate markers ─────────────────────────────────────────────────────────

/// Marker: recipient has not yet been set.
pub struct NoRecipient;
/// Marker: recipient has been set; other fields may now be configured.
pub struct HasRecipient;

// ── Builder ───────────────────────────────────────────────────────────────────

/// Typestate builder for [`GiftRequest`].
pub struct GiftRequestBuilder<R> {
    id: Option<RequestId>,
    recipient: Option<String>,
    region: Option<Region>,
    nice_score: Option<NiceScore>,
    items: Vec<LineItem>,
    dispatch_date: Option<NaiveDate>,
    _marker: PhantomData<R>,
}

impl GiftRequestBuilder<NoRecipient> {
    pub fn new() -> Self {
        Self {
            id: None,
            recipient: None,
            region: None,
            nice_score: None,
            items: Vec::new(),
            dispatch_date: None,
            _marker: PhantomData,
        }
    }

    /// Set the recipient (required, must be called first).
    pub fn recipient(self, recipient: impl Into<String>) -> GiftRequestBuilder<HasRecipient> {
        GiftRequestBuilder {
            id: self.id,
            recipient: Some(recipient.into()),
            region: self.region,
            nice_score: self.nice_score,
            items: self.items,
            dispatch_date: self.dispatch_date,
            _marker: PhantomData,
        }
    }
}

impl Default for GiftRequestBuilder<NoRecipient> {
    fn default() -> Self {
        Self::new()
    }
}

impl GiftRequestBuilder<HasRecipient> {
    /// Restore a known identifier instead of generating one.
    pub fn id(mut self, id: RequestId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Set the nice score. Fails fast when outside `0..=100`.
    pub fn nice_score(mut self, score: u32) -> Result<Self, DomainError> {
        self.nice_score = Some(NiceScore::new(score)?);
        Ok(self)
    }

    pub fn item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = LineItem>) -> Self {
        self.items.extend(items);
        self
    }

    /// Defaults to today's local date when not set.
    pub fn dispatch_date(mut self, date: NaiveDate) -> Self {
        self.dispatch_date = Some(date);
        self
    }

    /// Finalise and validate.
    pub fn build(self) -> Result<GiftRequest, DomainError> {
        let request = GiftRequest {
            id: self.id.unwrap_or_default(),
            recipient: self
                .recipient
                .ok_or(DomainError::MissingRequiredField { field: "recipient" })?,
            region: self
                .region
                .ok_or(DomainError::MissingRequiredField { field: "region" })?,
            nice_score: self
                .nice_score
                .ok_or(DomainError::MissingRequiredField { field: "nice_score" })?,
            items: self.items,
            dispatch_date: self
                .dispatch_date
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
        };

        request.validate()?;
        Ok(request)
    }
}
