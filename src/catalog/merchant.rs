//! Merchant types.

use crate::ids::MerchantId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Daily operating hours, shown on the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperatingHours {
    /// Opening time, "HH:MM".
    pub open: String,
    /// Closing time, "HH:MM".
    pub close: String,
}

impl OperatingHours {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

impl Default for OperatingHours {
    fn default() -> Self {
        Self::new("09:00", "21:00")
    }
}

/// Delivery terms a merchant offers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryConfig {
    /// Flat fee charged on delivery orders.
    pub fee: Money,
    /// Minimum subtotal for delivery orders.
    pub min_order: Money,
    /// Display estimate, e.g. "25-35 min".
    pub estimate: String,
    /// Whether the merchant delivers at all.
    pub supports_delivery: bool,
}

impl DeliveryConfig {
    /// Delivery with the given fee and minimum.
    pub fn new(fee: Money, min_order: Money, estimate: impl Into<String>) -> Self {
        Self {
            fee,
            min_order,
            estimate: estimate.into(),
            supports_delivery: true,
        }
    }

    /// Pickup-only merchant.
    pub fn pickup_only() -> Self {
        Self {
            fee: Money::ZERO,
            min_order: Money::ZERO,
            estimate: String::new(),
            supports_delivery: false,
        }
    }
}

/// A merchant (restaurant or shop) in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Merchant {
    pub id: MerchantId,
    pub name: String,
    pub description: String,
    /// Admin-defined category, e.g. "Pizza" or "Grocery".
    pub category: String,
    pub hours: OperatingHours,
    /// Average rating across reviews.
    pub rating: f64,
    pub review_count: i64,
    pub delivery: DeliveryConfig,
    /// Soft-disable flag; inactive merchants are hidden from queries.
    pub is_active: bool,
    /// Whether the merchant is currently accepting orders.
    pub is_open: bool,
    pub created_at: DateTime<Utc>,
}

impl Merchant {
    /// Create an active, open merchant with default hours.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        delivery: DeliveryConfig,
    ) -> Self {
        Self {
            id: MerchantId::generate(),
            name: name.into(),
            description: String::new(),
            category: category.into(),
            hours: OperatingHours::default(),
            rating: 0.0,
            review_count: 0,
            delivery,
            is_active: true,
            is_open: true,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_hours(mut self, hours: OperatingHours) -> Self {
        self.hours = hours;
        self
    }

    pub fn with_rating(mut self, rating: f64, review_count: i64) -> Self {
        self.rating = rating;
        self.review_count = review_count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_merchant_is_active_and_open() {
        let merchant = Merchant::new(
            "Luigi's",
            "Pizza",
            DeliveryConfig::new(Money::from_cents(399), Money::from_cents(1500), "25-35 min"),
        );
        assert!(merchant.is_active);
        assert!(merchant.is_open);
        assert_eq!(merchant.category, "Pizza");
    }

    #[test]
    fn test_pickup_only_config() {
        let config = DeliveryConfig::pickup_only();
        assert!(!config.supports_delivery);
        assert!(config.fee.is_zero());
    }
}
