//! Read-side dashboard statistics.
//!
//! Everything here scans orders and catalog state; nothing mutates, so
//! these queries are safe to run at any frequency.

use crate::catalog::MerchantItem;
use crate::ids::{ItemId, MerchantId};
use crate::money::Money;
use crate::order::Order;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Revenue attributed to one merchant inside the window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MerchantRevenue {
    pub merchant_id: MerchantId,
    pub name: String,
    pub revenue: Money,
    pub order_count: i64,
}

/// A best-selling item, ranked by lifetime units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopItem {
    pub item_id: ItemId,
    pub name: String,
    pub units_sold: i64,
    pub revenue: Money,
}

/// Revenue bucketed by calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: Money,
    pub order_count: i64,
}

/// Dashboard aggregates over a trailing window of paid orders.
///
/// `top_items` ranks by the catalog's lifetime sales counters rather than
/// the window (the dashboard shows all-time best sellers next to windowed
/// revenue).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    pub window_days: i64,
    /// Gross merchandise value: Σ total of paid orders in the window.
    pub gmv: Money,
    /// Σ (subtotal − discount) of paid orders in the window.
    pub net_sales: Money,
    pub order_count: i64,
    pub average_order_value: Money,
    pub top_merchants: Vec<MerchantRevenue>,
    pub top_items: Vec<TopItem>,
    /// Ascending by date.
    pub daily_revenue: Vec<DailyRevenue>,
}

pub(crate) fn compute_dashboard(
    orders: &[Order],
    items: &HashMap<ItemId, MerchantItem>,
    now: DateTime<Utc>,
    window_days: i64,
    top_n: usize,
) -> DashboardStats {
    let cutoff = now - Duration::days(window_days);
    let paid: Vec<&Order> = orders
        .iter()
        .filter(|order| order.is_paid() && order.placed_at >= cutoff && order.placed_at <= now)
        .collect();

    let gmv: Money = paid.iter().map(|order| order.total).sum();
    let net_sales: Money = paid
        .iter()
        .map(|order| order.subtotal - order.discount)
        .sum();
    let order_count = paid.len() as i64;
    let average_order_value = if order_count > 0 {
        Money::from_cents(gmv.cents() / order_count)
    } else {
        Money::ZERO
    };

    let mut by_merchant: HashMap<&MerchantId, MerchantRevenue> = HashMap::new();
    for order in &paid {
        let entry = by_merchant
            .entry(&order.merchant_id)
            .or_insert_with(|| MerchantRevenue {
                merchant_id: order.merchant_id.clone(),
                name: order.merchant_name.clone(),
                revenue: Money::ZERO,
                order_count: 0,
            });
        entry.revenue += order.total;
        entry.order_count += 1;
    }
    let mut top_merchants: Vec<MerchantRevenue> = by_merchant.into_values().collect();
    top_merchants.sort_by(|a, b| b.revenue.cmp(&a.revenue).then_with(|| a.name.cmp(&b.name)));
    top_merchants.truncate(top_n);

    let mut top_items: Vec<TopItem> = items
        .values()
        .filter(|item| item.units_sold > 0)
        .map(|item| TopItem {
            item_id: item.id.clone(),
            name: item.name.clone(),
            units_sold: item.units_sold,
            revenue: item.revenue,
        })
        .collect();
    top_items.sort_by(|a, b| b.units_sold.cmp(&a.units_sold).then_with(|| a.name.cmp(&b.name)));
    top_items.truncate(top_n);

    let mut by_day: HashMap<NaiveDate, DailyRevenue> = HashMap::new();
    for order in &paid {
        let date = order.placed_at.date_naive();
        let entry = by_day.entry(date).or_insert_with(|| DailyRevenue {
            date,
            revenue: Money::ZERO,
            order_count: 0,
        });
        entry.revenue += order.total;
        entry.order_count += 1;
    }
    let mut daily_revenue: Vec<DailyRevenue> = by_day.into_values().collect();
    daily_revenue.sort_by_key(|bucket| bucket.date);

    DashboardStats {
        window_days,
        gmv,
        net_sales,
        order_count,
        average_order_value,
        top_merchants,
        top_items,
        daily_revenue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{DeliveryType, OrderStatus, PaymentStatus};
    use crate::ids::OrderId;

    fn paid_order(
        merchant: &str,
        total_cents: i64,
        placed_at: DateTime<Utc>,
        paid: bool,
    ) -> Order {
        Order {
            id: OrderId::generate(),
            order_number: "ORD-1001".to_string(),
            merchant_id: MerchantId::new(merchant),
            merchant_name: merchant.to_string(),
            items: Vec::new(),
            status: OrderStatus::Confirmed,
            payment_status: if paid {
                PaymentStatus::Paid
            } else {
                PaymentStatus::Pending
            },
            delivery_type: DeliveryType::Pickup,
            address: None,
            subtotal: Money::from_cents(total_cents),
            tax: Money::ZERO,
            delivery_fee: Money::ZERO,
            tip: Money::ZERO,
            discount: Money::ZERO,
            discount_code: None,
            total: Money::from_cents(total_cents),
            placed_at,
            confirmed_at: None,
            completed_at: None,
            cancelled_at: None,
            cancel_reason: None,
        }
    }

    #[test]
    fn test_window_excludes_old_and_unpaid_orders() {
        let now = Utc::now();
        let orders = vec![
            paid_order("luigi", 1000, now - Duration::days(2), true),
            paid_order("luigi", 9999, now - Duration::days(45), true),
            paid_order("luigi", 5000, now - Duration::days(1), false),
        ];
        let stats = compute_dashboard(&orders, &HashMap::new(), now, 30, 5);

        assert_eq!(stats.order_count, 1);
        assert_eq!(stats.gmv.cents(), 1000);
        assert_eq!(stats.net_sales.cents(), 1000);
    }

    #[test]
    fn test_top_merchants_sorted_by_revenue() {
        let now = Utc::now();
        let orders = vec![
            paid_order("luigi", 1000, now - Duration::days(1), true),
            paid_order("sakura", 3000, now - Duration::days(1), true),
            paid_order("luigi", 1500, now - Duration::days(2), true),
        ];
        let stats = compute_dashboard(&orders, &HashMap::new(), now, 30, 5);

        assert_eq!(stats.top_merchants.len(), 2);
        assert_eq!(stats.top_merchants[0].name, "sakura");
        assert_eq!(stats.top_merchants[0].revenue.cents(), 3000);
        assert_eq!(stats.top_merchants[1].order_count, 2);
    }

    #[test]
    fn test_top_items_use_lifetime_counters() {
        let now = Utc::now();
        let merchant_id = MerchantId::new("luigi");
        let mut items = HashMap::new();
        let mut pizza =
            MerchantItem::new(merchant_id.clone(), "Margherita", Money::from_cents(1299));
        pizza.record_sale(12, Money::from_cents(15588));
        let mut soda = MerchantItem::new(merchant_id, "Soda", Money::from_cents(250));
        soda.record_sale(3, Money::from_cents(750));
        items.insert(pizza.id.clone(), pizza);
        items.insert(soda.id.clone(), soda);

        // No orders in the window; lifetime best sellers still rank.
        let stats = compute_dashboard(&[], &items, now, 30, 1);
        assert_eq!(stats.top_items.len(), 1);
        assert_eq!(stats.top_items[0].name, "Margherita");
        assert_eq!(stats.top_items[0].units_sold, 12);
    }

    #[test]
    fn test_daily_buckets_ascend() {
        let now = Utc::now();
        let orders = vec![
            paid_order("luigi", 1000, now - Duration::days(1), true),
            paid_order("luigi", 2000, now - Duration::days(3), true),
            paid_order("luigi", 500, now - Duration::days(1), true),
        ];
        let stats = compute_dashboard(&orders, &HashMap::new(), now, 30, 5);

        assert_eq!(stats.daily_revenue.len(), 2);
        assert!(stats.daily_revenue[0].date < stats.daily_revenue[1].date);
        assert_eq!(stats.daily_revenue[1].revenue.cents(), 1500);
        assert_eq!(stats.daily_revenue[1].order_count, 2);
    }

    #[test]
    fn test_average_order_value() {
        let now = Utc::now();
        let orders = vec![
            paid_order("luigi", 1000, now - Duration::days(1), true),
            paid_order("luigi", 2000, now - Duration::days(1), true),
        ];
        let stats = compute_dashboard(&orders, &HashMap::new(), now, 30, 5);
        assert_eq!(stats.average_order_value.cents(), 1500);

        let empty = compute_dashboard(&[], &HashMap::new(), now, 30, 5);
        assert!(empty.average_order_value.is_zero());
    }
}
