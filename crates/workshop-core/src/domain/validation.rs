use crate::domain::{
    entities::{DiscountOutcome, GiftRequest, WrappingOutcome},
    error::DomainError,
};

/// Centralized domain validation.
///
/// Request rules and the post-conditions every strategy must honour live
/// here, not scattered across the orchestrator.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_request(request: &GiftRequest) -> Result<(), DomainError> {
        request.validate()
    }

    /// A discount can never push the subtotal below zero.
    pub fn validate_discount(
        request: &GiftRequest,
        discount: &DiscountOutcome,
    ) -> Result<(), DomainError> {
        if discount.rate_percent > 100 {
            return Err(DomainError::DiscountRateTooHigh {
                rate: discount.rate_percent,
            });
        }
        let subtotal = request.subtotal();
        if discount.amount > subtotal {
            return Err(DomainError::DiscountExceedsSubtotal {
                discount: discount.amount.to_string(),
                subtotal: subtotal.to_string(),
            });
        }
        Ok(())
    }

    /// Wrapping yields exactly one parcel per line item.
    pub fn validate_wrapping(
        request: &GiftRequest,
        wrapping: &WrappingOutcome,
    ) -> Result<(), DomainError> {
        if wrapping.parcel_count() != request.item_count() {
            return Err(DomainError::ParcelCountMismatch {
                parcels: wrapping.parcel_count(),
                items: request.item_count(),
            });
        }
        Ok(())
    }
}
