//! Demonstration catalog bootstrap.

use chrono::{Duration, Utc};
use tracing::info;

use crate::catalog::{Choice, DeliveryConfig, Merchant, MerchantItem, OperatingHours, OptionGroup};
use crate::discount::Discount;
use crate::money::Money;
use crate::store::MarketStore;

impl MarketStore {
    /// Populate demonstration merchants, items, and discounts.
    ///
    /// Guarded to run once: a catalog that already has merchants is left
    /// untouched. Returns whether seeding happened.
    pub fn seed_sample_data(&mut self) -> bool {
        if self.merchant_count() > 0 {
            return false;
        }

        let luigis = self.add_merchant(
            Merchant::new(
                "Luigi's Trattoria",
                "Pizza",
                DeliveryConfig::new(Money::from_cents(399), Money::from_cents(1500), "25-35 min"),
            )
            .with_description("Wood-fired Neapolitan pies and classic pastas.")
            .with_hours(OperatingHours::new("11:00", "22:00"))
            .with_rating(4.7, 312),
        );

        let margherita =
            MerchantItem::new(luigis.clone(), "Margherita", Money::from_cents(1299))
                .with_description("San Marzano tomatoes, fior di latte, basil.")
                .with_category("Pizze")
                .featured()
                .with_option_group(
                    OptionGroup::single("Size")
                        .with_required()
                        .with_choice(Choice::default_choice("Regular 12\"", Money::ZERO))
                        .with_choice(Choice::new("Large 16\"", Money::from_cents(600))),
                )
                .with_option_group(
                    OptionGroup::multiple("Extras")
                        .with_max_select(3)
                        .with_choice(Choice::new("Extra basil", Money::from_cents(150)))
                        .with_choice(Choice::new("Olives", Money::from_cents(175)))
                        .with_choice(Choice::new("Prosciutto", Money::from_cents(350))),
                );
        self.add_item(margherita);

        let tiramisu = MerchantItem::new(luigis.clone(), "Tiramisu", Money::from_cents(750))
            .with_description("Espresso-soaked ladyfingers, mascarpone.")
            .with_category("Dolci");
        self.add_item(tiramisu);

        let rosa = self.add_merchant(
            Merchant::new(
                "Taqueria Rosa",
                "Mexican",
                DeliveryConfig::new(Money::from_cents(299), Money::from_cents(1200), "20-30 min"),
            )
            .with_description("Street tacos, burritos, and fresh aguas frescas.")
            .with_hours(OperatingHours::new("10:00", "23:00"))
            .with_rating(4.5, 204),
        );

        let tacos = MerchantItem::new(rosa.clone(), "Street tacos", Money::from_cents(1050))
            .with_description("Three tacos on handmade tortillas.")
            .with_category("Tacos")
            .featured()
            .with_option_group(
                OptionGroup::single("Protein")
                    .with_required()
                    .with_choice(Choice::default_choice("Al pastor", Money::ZERO))
                    .with_choice(Choice::new("Carne asada", Money::from_cents(100)))
                    .with_choice(Choice::new("Mushroom", Money::from_cents(-50))),
            )
            .with_option_group(
                OptionGroup::multiple("Salsas")
                    .with_max_select(2)
                    .with_choice(Choice::new("Verde", Money::ZERO))
                    .with_choice(Choice::new("Roja", Money::ZERO))
                    .with_choice(Choice::new("Habanero", Money::ZERO)),
            );
        self.add_item(tacos);

        let horchata = MerchantItem::new(rosa, "Horchata", Money::from_cents(400))
            .with_category("Drinks");
        self.add_item(horchata);

        let beacon = self.add_merchant(
            Merchant::new("Beacon Coffee", "Cafe", DeliveryConfig::pickup_only())
                .with_description("Single-origin espresso and pastries, pickup only.")
                .with_hours(OperatingHours::new("07:00", "15:00"))
                .with_rating(4.8, 98),
        );
        let latte = MerchantItem::new(beacon, "Latte", Money::from_cents(475))
            .with_category("Espresso")
            .with_option_group(
                OptionGroup::multiple("Add-ons")
                    .with_max_select(1)
                    .with_choice(Choice::new("Oat milk", Money::from_cents(75)))
                    .with_choice(Choice::new("Extra shot", Money::from_cents(100))),
            );
        self.add_item(latte);

        self.add_discount(
            Discount::percentage("Welcome offer", "WELCOME20", 20.0)
                .with_max_discount(Money::from_cents(1500))
                .with_usage_limit(500),
        );
        self.add_discount(
            Discount::fixed("Five off lunch", "FIVEOFF", Money::from_cents(500))
                .with_min_order(Money::from_cents(2500))
                .with_window(None, Some(Utc::now() + Duration::days(90))),
        );

        info!(
            merchants = self.merchant_count(),
            "seeded sample marketplace data"
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemFilter, MerchantFilter};

    #[test]
    fn test_seed_populates_catalog() {
        let mut store = MarketStore::new();
        assert!(store.seed_sample_data());

        assert_eq!(store.merchant_count(), 3);
        assert!(!store.items(&ItemFilter::default()).is_empty());
        assert!(store
            .apply_discount("WELCOME20", Money::from_cents(10000))
            .valid);
    }

    #[test]
    fn test_seed_is_idempotent() {
        let mut store = MarketStore::new();
        assert!(store.seed_sample_data());
        let merchants_before = store.merchant_count();

        assert!(!store.seed_sample_data());
        assert_eq!(store.merchant_count(), merchants_before);
    }

    #[test]
    fn test_seed_respects_existing_catalog() {
        let mut store = MarketStore::new();
        store.add_merchant(Merchant::new("Existing", "Deli", DeliveryConfig::pickup_only()));

        assert!(!store.seed_sample_data());
        assert_eq!(store.merchants(&MerchantFilter::default()).len(), 1);
    }
}
