//! Wrapping strategies. Each yields one parcel per line item.

use workshop_core::{
    application::ports::WrappingStrategy,
    domain::{Category, LineItem, Money, WrappedParcel, WrappingOutcome},
    error::WorkshopResult,
};

const FESTIVE_PER_PARCEL: Money = Money::from_cents(150);
const ECO_PER_PARCEL: Money = Money::from_cents(75);

fn parcel(item: &LineItem, wrap: &str) -> WrappedParcel {
    let description = if item.category().is_fragile() {
        format!("{wrap}, padded")
    } else {
        wrap.to_string()
    };
    WrappedParcel {
        item: item.name().to_string(),
        description,
    }
}

fn outcome(
    style: &str,
    items: &[LineItem],
    per_parcel: Money,
    wrap: impl Fn(&LineItem) -> String,
) -> WrappingOutcome {
    WrappingOutcome {
        style: style.to_string(),
        parcels: items.iter().map(|item| parcel(item, &wrap(item))).collect(),
        surcharge: per_parcel.times(items.len() as u64),
    }
}

/// Brown paper and string.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainWrap;

impl WrappingStrategy for PlainWrap {
    fn wrap(&self, items: &[LineItem]) -> WorkshopResult<WrappingOutcome> {
        Ok(outcome("plain", items, Money::ZERO, |_| {
            "brown paper and string".into()
        }))
    }
}

/// Themed paper per category, with a bow.
#[derive(Debug, Clone, Copy, Default)]
pub struct FestiveWrap;

impl FestiveWrap {
    fn paper(category: Category) -> &'static str {
        match category {
            Category::Toy => "candy-cane paper",
            Category::Book => "starry paper",
            Category::Game => "snowflake paper",
            Category::Clothing => "tartan paper",
            Category::Electronics => "silver foil",
            Category::Sweets => "gingerbread paper",
        }
    }
}

impl WrappingStrategy for FestiveWrap {
    fn wrap(&self, items: &[LineItem]) -> WorkshopResult<WrappingOutcome> {
        Ok(outcome("festive", items, FESTIVE_PER_PARCEL, |item| {
            format!("{} with a red bow", Self::paper(item.category()))
        }))
    }
}

/// Reusable fabric wraps.
#[derive(Debug, Clone, Copy, Default)]
pub struct EcoWrap;

impl WrappingStrategy for EcoWrap {
    fn wrap(&self, items: &[LineItem]) -> WorkshopResult<WrappingOutcome> {
        Ok(outcome("eco", items, ECO_PER_PARCEL, |_| {
            "reusable fabric wrap".into()
        }))
    }
}
