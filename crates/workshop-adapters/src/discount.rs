//! Discount policies.

use workshop_core::{
    application::ports::DiscountPolicy,
    domain::{DiscountOutcome, GiftRequest},
    error::WorkshopResult,
};

/// Full price, always.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiscount;

impl DiscountPolicy for NoDiscount {
    fn discount(&self, _request: &GiftRequest) -> WorkshopResult<DiscountOutcome> {
        Ok(DiscountOutcome::none("none"))
    }
}

/// Tiered discount by nice score.
///
/// | score   | rate |
/// |---------|------|
/// | ≥ 90    | 20%  |
/// | ≥ 75    | 10%  |
/// | ≥ 50    | 5%   |
/// | below   | 0%   |
#[derive(Debug, Clone, Copy, Default)]
pub struct NiceListDiscount;

impl NiceListDiscount {
    const TIERS: [(u8, u8); 3] = [(90, 20), (75, 10), (50, 5)];

    pub fn rate_for(score: u8) -> u8 {
        Self::TIERS
            .iter()
            .find(|(threshold, _)| score >= *threshold)
            .map_or(0, |(_, rate)| *rate)
    }
}

impl DiscountPolicy for NiceListDiscount {
    fn discount(&self, request: &GiftRequest) -> WorkshopResult<DiscountOutcome> {
        let rate = Self::rate_for(request.nice_score().value());
        Ok(DiscountOutcome::at_rate("nice-list", rate, request.subtotal()))
    }
}

/// Percentage off once a request carries at least `min_items` items.
#[derive(Debug, Clone, Copy)]
pub struct BulkDiscount {
    min_items: usize,
    percent: u8,
}

impl BulkDiscount {
    pub const DEFAULT_MIN_ITEMS: usize = 5;
    pub const DEFAULT_PERCENT: u8 = 10;

    /// `percent` is clamped to 100.
    pub fn new(min_items: usize, percent: u8) -> Self {
        Self {
            min_items,
            percent: percent.min(100),
        }
    }
}

impl Default for BulkDiscount {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_ITEMS, Self::DEFAULT_PERCENT)
    }
}

impl DiscountPolicy for BulkDiscount {
    fn discount(&self, request: &GiftRequest) -> WorkshopResult<DiscountOutcome> {
        let rate = if request.item_count() >= self.min_items {
            self.percent
        } else {
            0
        };
        Ok(DiscountOutcome::at_rate("bulk", rate, request.subtotal()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workshop_core::domain::{Category, LineItem, MAX_COST_CENTS, MAX_ITEMS, Money, Region};

    fn request(score: u32, items: usize) -> GiftRequest {
        GiftRequest::builder()
            .recipient("Ada")
            .region(Region::Europe)
            .nice_score(score)
            .unwrap()
            .items(std::iter::repeat_n(
                LineItem::new("Top", Category::Toy, Money::from_cents(1000), 10),
                items,
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn nice_list_tiers() {
        assert_eq!(NiceListDiscount::rate_for(100), 20);
        assert_eq!(NiceListDiscount::rate_for(90), 20);
        assert_eq!(NiceListDiscount::rate_for(89), 10);
        assert_eq!(NiceListDiscount::rate_for(75), 10);
        assert_eq!(NiceListDiscount::rate_for(74), 5);
        assert_eq!(NiceListDiscount::rate_for(50), 5);
        assert_eq!(NiceListDiscount::rate_for(49), 0);
        assert_eq!(NiceListDiscount::rate_for(0), 0);
    }

    #[test]
    fn nice_list_is_monotonic_and_bounded() {
        let rates: Vec<u8> = (0..=100).map(NiceListDiscount::rate_for).collect();
        assert!(rates.windows(2).all(|w| w[0] <= w[1]));
        assert!(rates.iter().all(|r| *r <= 100));
    }

    #[test]
    fn nice_list_score_95_takes_twenty_percent() {
        let outcome = NiceListDiscount.discount(&request(95, 5)).unwrap();
        assert_eq!(outcome.rate_percent, 20);
        assert_eq!(outcome.amount, Money::from_cents(1000));
    }

    #[test]
    fn no_discount_is_zero() {
        let outcome = NoDiscount.discount(&request(100, 3)).unwrap();
        assert_eq!(outcome.amount, Money::ZERO);
        assert_eq!(outcome.policy, "none");
    }

    #[test]
    fn bulk_applies_at_threshold() {
        let policy = BulkDiscount::default();
        assert_eq!(policy.discount(&request(0, 4)).unwrap().rate_percent, 0);

        let outcome = policy.discount(&request(0, 5)).unwrap();
        assert_eq!(outcome.rate_percent, 10);
        assert_eq!(outcome.amount, Money::from_cents(500));
    }

    #[test]
    fn bulk_percent_is_clamped() {
        let outcome = BulkDiscount::new(1, 250).discount(&request(0, 1)).unwrap();
        assert_eq!(outcome.rate_percent, 100);
        assert_eq!(outcome.amount, Money::from_cents(1000));
    }

    #[test]
    fn discounts_stay_within_the_largest_valid_subtotal() {
        let request = GiftRequest::builder()
            .recipient("Ada")
            .region(Region::Europe)
            .nice_score(100)
            .unwrap()
            .items(std::iter::repeat_n(
                LineItem::new("Gold", Category::Toy, Money::from_cents(MAX_COST_CENTS), 1),
                MAX_ITEMS,
            ))
            .build()
            .unwrap();
        let subtotal = request.subtotal();

        let nice = NiceListDiscount.discount(&request).unwrap();
        assert_eq!(nice.amount.cents(), subtotal.cents() / 5);

        let all = BulkDiscount::new(1, 100).discount(&request).unwrap();
        assert_eq!(all.amount, subtotal);
    }
}
