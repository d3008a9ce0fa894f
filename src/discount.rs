//! Promotional discount rules and evaluation.

use crate::ids::DiscountId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The value a discount grants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum DiscountValue {
    /// Percentage off the subtotal (0-100).
    Percentage(f64),
    /// Flat amount off.
    Fixed(Money),
}

/// A promotional rule, optionally code-gated, dated, and usage-limited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Discount {
    pub id: DiscountId,
    pub name: String,
    /// Redemption code, e.g. "WELCOME20".
    pub code: Option<String>,
    pub value: DiscountValue,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    /// Maximum number of successful applications.
    pub usage_limit: Option<i64>,
    /// Successful applications so far; increments exactly once per
    /// application and never resets.
    pub usage_count: i64,
    /// Minimum order subtotal required to qualify.
    pub min_order: Option<Money>,
    /// Cap on the computed amount; percentage discounts only.
    pub max_discount: Option<Money>,
    pub active: bool,
}

impl Discount {
    /// A percentage-off discount.
    pub fn percentage(name: impl Into<String>, code: impl Into<String>, percent: f64) -> Self {
        Self {
            id: DiscountId::generate(),
            name: name.into(),
            code: Some(code.into()),
            value: DiscountValue::Percentage(percent),
            starts_at: None,
            ends_at: None,
            usage_limit: None,
            usage_count: 0,
            min_order: None,
            max_discount: None,
            active: true,
        }
    }

    /// A flat-amount discount.
    pub fn fixed(name: impl Into<String>, code: impl Into<String>, amount: Money) -> Self {
        Self {
            id: DiscountId::generate(),
            name: name.into(),
            code: Some(code.into()),
            value: DiscountValue::Fixed(amount),
            starts_at: None,
            ends_at: None,
            usage_limit: None,
            usage_count: 0,
            min_order: None,
            max_discount: None,
            active: true,
        }
    }

    pub fn with_window(
        mut self,
        starts_at: Option<DateTime<Utc>>,
        ends_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.starts_at = starts_at;
        self.ends_at = ends_at;
        self
    }

    pub fn with_usage_limit(mut self, limit: i64) -> Self {
        self.usage_limit = Some(limit);
        self
    }

    pub fn with_min_order(mut self, amount: Money) -> Self {
        self.min_order = Some(amount);
        self
    }

    pub fn with_max_discount(mut self, cap: Money) -> Self {
        self.max_discount = Some(cap);
        self
    }

    /// Whether the usage limit has been reached.
    pub fn is_exhausted(&self) -> bool {
        self.usage_limit
            .map(|limit| self.usage_count >= limit)
            .unwrap_or(false)
    }

    /// Evaluate this discount against a subtotal without touching the
    /// usage counter.
    ///
    /// Checks run in order and short-circuit: active, date window, usage
    /// limit, minimum order. Rejections are expected outcomes and come
    /// back as `valid: false`, never as errors.
    pub fn evaluate(&self, subtotal: Money, now: DateTime<Utc>) -> DiscountOutcome {
        if !self.active {
            return DiscountOutcome::rejected("This code is no longer active");
        }
        if let Some(starts_at) = self.starts_at {
            if now < starts_at {
                return DiscountOutcome::rejected("This code is not active yet");
            }
        }
        if let Some(ends_at) = self.ends_at {
            if now > ends_at {
                return DiscountOutcome::rejected("This code has expired");
            }
        }
        if self.is_exhausted() {
            return DiscountOutcome::rejected("This code has reached its usage limit");
        }
        if let Some(min_order) = self.min_order {
            if subtotal < min_order {
                return DiscountOutcome::rejected(format!(
                    "Requires a minimum order of {min_order}"
                ));
            }
        }

        let amount = match self.value {
            DiscountValue::Percentage(percent) => {
                let raw = subtotal.percent(percent);
                match self.max_discount {
                    Some(cap) => raw.min(cap),
                    None => raw,
                }
            }
            // A flat discount never exceeds the subtotal.
            DiscountValue::Fixed(flat) => flat.min(subtotal),
        };

        DiscountOutcome::granted(amount, format!("{} applied: -{amount}", self.name))
    }

    pub(crate) fn record_usage(&mut self) {
        self.usage_count += 1;
    }
}

/// Result of evaluating a discount code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscountOutcome {
    pub valid: bool,
    /// Amount off; zero when invalid.
    pub amount: Money,
    /// Human-readable explanation for display.
    pub message: String,
}

impl DiscountOutcome {
    pub(crate) fn rejected(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            amount: Money::ZERO,
            message: message.into(),
        }
    }

    pub(crate) fn granted(amount: Money, message: impl Into<String>) -> Self {
        Self {
            valid: true,
            amount,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_percentage_capped_at_max_discount() {
        // WELCOME20: 20% off, capped at $15, on a $100 subtotal -> $15.
        let discount = Discount::percentage("Welcome offer", "WELCOME20", 20.0)
            .with_max_discount(Money::from_cents(1500));
        let outcome = discount.evaluate(Money::from_cents(10000), Utc::now());

        assert!(outcome.valid);
        assert_eq!(outcome.amount.cents(), 1500);
    }

    #[test]
    fn test_percentage_under_cap_is_uncapped() {
        let discount = Discount::percentage("Welcome offer", "WELCOME20", 20.0)
            .with_max_discount(Money::from_cents(1500));
        let outcome = discount.evaluate(Money::from_cents(5000), Utc::now());
        assert_eq!(outcome.amount.cents(), 1000);
    }

    #[test]
    fn test_fixed_never_exceeds_subtotal() {
        let discount = Discount::fixed("Five off", "FIVEOFF", Money::from_cents(500));
        let outcome = discount.evaluate(Money::from_cents(300), Utc::now());
        assert!(outcome.valid);
        assert_eq!(outcome.amount.cents(), 300);
    }

    #[test]
    fn test_inactive_is_rejected() {
        let mut discount = Discount::percentage("Welcome offer", "WELCOME20", 20.0);
        discount.active = false;
        let outcome = discount.evaluate(Money::from_cents(10000), Utc::now());
        assert!(!outcome.valid);
        assert!(outcome.amount.is_zero());
    }

    #[test]
    fn test_window_checks() {
        let now = Utc::now();
        let upcoming = Discount::percentage("Launch", "LAUNCH", 10.0)
            .with_window(Some(now + Duration::days(1)), None);
        assert!(!upcoming.evaluate(Money::from_cents(1000), now).valid);

        let expired = Discount::percentage("Launch", "LAUNCH", 10.0)
            .with_window(None, Some(now - Duration::days(1)));
        let outcome = expired.evaluate(Money::from_cents(1000), now);
        assert!(!outcome.valid);
        assert_eq!(outcome.message, "This code has expired");
    }

    #[test]
    fn test_usage_limit() {
        let mut discount = Discount::percentage("Welcome offer", "WELCOME20", 20.0)
            .with_usage_limit(2);
        discount.usage_count = 2;
        assert!(discount.is_exhausted());
        assert!(!discount.evaluate(Money::from_cents(1000), Utc::now()).valid);
    }

    #[test]
    fn test_minimum_order() {
        let discount = Discount::fixed("Five off", "FIVEOFF", Money::from_cents(500))
            .with_min_order(Money::from_cents(2500));
        let outcome = discount.evaluate(Money::from_cents(2000), Utc::now());
        assert!(!outcome.valid);
        assert!(outcome.message.contains("$25.00"));

        assert!(discount.evaluate(Money::from_cents(2500), Utc::now()).valid);
    }

    #[test]
    fn test_evaluate_does_not_touch_usage_count() {
        let discount = Discount::percentage("Welcome offer", "WELCOME20", 20.0);
        let _ = discount.evaluate(Money::from_cents(10000), Utc::now());
        assert_eq!(discount.usage_count, 0);
    }
}
