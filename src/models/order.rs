//! Order DTOs
//!
//! Orders are created by the backend when a phone, SMS or web order is placed
//! and are only ever mutated through status/payment PATCH calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(OrderStatus::Pending),
            "preparing" => Some(OrderStatus::Preparing),
            "ready" => Some(OrderStatus::Ready),
            "completed" => Some(OrderStatus::Completed),
            "cancelled" | "canceled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Statuses staff can move an order to from this one.
    ///
    /// The backend enforces the real lifecycle; this only drives which
    /// buttons the dashboard offers.
    pub fn next_actions(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Preparing, OrderStatus::Cancelled],
            OrderStatus::Preparing => &[OrderStatus::Ready, OrderStatus::Cancelled],
            OrderStatus::Ready => &[OrderStatus::Completed],
            OrderStatus::Completed | OrderStatus::Cancelled => &[],
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Preparing | OrderStatus::Ready
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment state reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Refunded,
    Failed,
    #[default]
    #[serde(other)]
    Unpaid,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Unpaid,
        PaymentStatus::Paid,
        PaymentStatus::Refunded,
        PaymentStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "Unpaid",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Refunded => "Refunded",
            PaymentStatus::Failed => "Failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unpaid" => Some(PaymentStatus::Unpaid),
            "paid" => Some(PaymentStatus::Paid),
            "refunded" => Some(PaymentStatus::Refunded),
            "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Delivery,
    #[default]
    #[serde(other)]
    Pickup,
}

/// Channel the order came in through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderSource {
    Phone,
    Sms,
    #[default]
    #[serde(other)]
    Web,
}

/// Modifier applied to a line item (e.g. "extra cheese")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemModifier {
    pub name: String,
    /// Price in cents
    #[serde(default)]
    pub price: i64,
}

/// One line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Unit price in cents
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub modifiers: Vec<OrderItemModifier>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

impl OrderItem {
    /// Unit price plus modifiers, times quantity
    pub fn line_total(&self) -> i64 {
        let unit = self.price + self.modifiers.iter().map(|m| m.price).sum::<i64>();
        unit * self.quantity as i64
    }
}

/// Line items as delivered by the backend.
///
/// Some endpoints return the items as a JSON-encoded string rather than an
/// array. Decoding happens once during deserialization: a string that decodes
/// to an item array becomes `Parsed`; anything else is kept verbatim as `Raw`
/// and is treated as having no items.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderItems {
    Raw(String),
    Parsed(Vec<OrderItem>),
}

impl Default for OrderItems {
    fn default() -> Self {
        OrderItems::Parsed(Vec::new())
    }
}

impl OrderItems {
    /// Resolve a JSON-encoded item list
    pub fn from_encoded(text: &str) -> Self {
        match serde_json::from_str::<Vec<OrderItem>>(text) {
            Ok(items) => OrderItems::Parsed(items),
            Err(e) => {
                tracing::debug!("order items not decodable, keeping raw text: {}", e);
                OrderItems::Raw(text.to_string())
            }
        }
    }

    /// Decoded items; empty when the payload could not be decoded
    pub fn as_slice(&self) -> &[OrderItem] {
        match self {
            OrderItems::Parsed(items) => items,
            OrderItems::Raw(_) => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn total_quantity(&self) -> u32 {
        self.as_slice().iter().map(|i| i.quantity).sum()
    }

    /// Short one-line summary, e.g. "2× Burger, 1× Fries"
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "No items".to_string();
        }
        self.as_slice()
            .iter()
            .map(|i| format!("{}× {}", i.quantity, i.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireItems {
    List(Vec<OrderItem>),
    Encoded(String),
    Other(serde_json::Value),
}

impl<'de> Deserialize<'de> for OrderItems {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WireItems::deserialize(deserializer)? {
            WireItems::List(items) => OrderItems::Parsed(items),
            WireItems::Encoded(text) => OrderItems::from_encoded(&text),
            WireItems::Other(serde_json::Value::Null) => OrderItems::default(),
            WireItems::Other(value) => OrderItems::Raw(value.to_string()),
        })
    }
}

impl Serialize for OrderItems {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OrderItems::Parsed(items) => items.serialize(serializer),
            OrderItems::Raw(text) => serializer.serialize_str(text),
        }
    }
}

/// Order as returned by `/restaurant/orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default)]
    pub source: OrderSource,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub items: OrderItems,
    /// Amounts in cents
    #[serde(default)]
    pub subtotal: i64,
    #[serde(default)]
    pub tax: i64,
    #[serde(default)]
    pub delivery_fee: i64,
    #[serde(default)]
    pub total: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

impl Order {
    /// Human-facing reference: order number if present, otherwise a short id
    pub fn display_number(&self) -> String {
        match &self.order_number {
            Some(n) if !n.is_empty() => format!("#{}", n),
            _ => format!("#{}", self.id.chars().take(8).collect::<String>()),
        }
    }

    pub fn customer_label(&self) -> &str {
        self.customer_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Guest")
    }

    /// Case-insensitive match against name, number, id and phone digits
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        let in_text = |s: &Option<String>| {
            s.as_deref()
                .map(|v| v.to_lowercase().contains(&query))
                .unwrap_or(false)
        };

        if in_text(&self.customer_name) || in_text(&self.order_number) {
            return true;
        }
        if self.id.to_lowercase().contains(&query) {
            return true;
        }

        let query_digits: String = query.chars().filter(|c| c.is_ascii_digit()).collect();
        if query_digits.is_empty() {
            return false;
        }
        self.customer_phone
            .as_deref()
            .map(|p| {
                let digits: String = p.chars().filter(|c| c.is_ascii_digit()).collect();
                digits.contains(&query_digits)
            })
            .unwrap_or(false)
    }
}

/// Filter state for the orders list
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    /// Inclusive start date, `YYYY-MM-DD`
    pub date_from: Option<String>,
    /// Inclusive end date, `YYYY-MM-DD`
    pub date_to: Option<String>,
    pub search: Option<String>,
    pub limit: Option<u32>,
}

impl OrderFilter {
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_dates(mut self, from: Option<String>, to: Option<String>) -> Self {
        self.date_from = from.filter(|d| !d.is_empty());
        self.date_to = to.filter(|d| !d.is_empty());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.trim().is_empty() {
            None
        } else {
            Some(search)
        };
        self
    }

    /// Query parameters in a stable order
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(from) = &self.date_from {
            params.push(("date_from", from.clone()));
        }
        if let Some(to) = &self.date_to {
            params.push(("date_to", to.clone()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.trim().to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

/// Aggregate numbers shown on the dashboard cards
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderStats {
    pub total_orders: usize,
    pub pending: usize,
    pub preparing: usize,
    pub ready: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// Sum of `total` over non-cancelled orders, in cents
    pub revenue: i64,
}

impl OrderStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut stats = OrderStats {
            total_orders: orders.len(),
            ..Default::default()
        };
        for order in orders {
            match order.status {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::Preparing => stats.preparing += 1,
                OrderStatus::Ready => stats.ready += 1,
                OrderStatus::Completed => stats.completed += 1,
                OrderStatus::Cancelled => stats.cancelled += 1,
            }
            if order.status != OrderStatus::Cancelled {
                stats.revenue += order.total;
            }
        }
        stats
    }

    pub fn active(&self) -> usize {
        self.pending + self.preparing + self.ready
    }

    /// Average value of non-cancelled orders, in cents
    pub fn average_order_value(&self) -> i64 {
        let counted = self.total_orders - self.cancelled;
        if counted == 0 {
            0
        } else {
            (self.revenue as f64 / counted as f64).round() as i64
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn order(id: &str, status: OrderStatus) -> Order {
        Order {
            id: id.to_string(),
            account_id: Some("acct-1".to_string()),
            order_number: None,
            status,
            payment_status: PaymentStatus::Unpaid,
            order_type: OrderType::Pickup,
            source: OrderSource::Phone,
            customer_name: Some("Ada".to_string()),
            customer_phone: Some("+15551234567".to_string()),
            items: OrderItems::default(),
            subtotal: 1000,
            tax: 80,
            delivery_fee: 0,
            total: 1080,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            updated_at: None,
            delivery_address: None,
            special_instructions: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::order;
    use super::*;

    #[test]
    fn test_items_as_array() {
        let json = r#"{
            "id": "o1",
            "status": "pending",
            "items": [{"name": "Burger", "quantity": 2, "price": 899}],
            "created_at": "2024-01-01T12:00:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.items.as_slice().len(), 1);
        assert_eq!(order.items.as_slice()[0].line_total(), 1798);
    }

    #[test]
    fn test_items_as_encoded_string() {
        let json = r#"{
            "id": "o2",
            "items": "[{\"name\":\"Fries\",\"quantity\":1,\"price\":350,\"modifiers\":[{\"name\":\"Cheese\",\"price\":100}]}]",
            "created_at": "2024-01-01T12:00:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert!(matches!(order.items, OrderItems::Parsed(_)));
        assert_eq!(order.items.as_slice()[0].line_total(), 450);
        assert_eq!(order.items.summary(), "1× Fries");
    }

    #[test]
    fn test_garbage_items_degrade_to_no_items() {
        let json = r#"{"id": "o3", "items": "not json", "created_at": "2024-01-01T12:00:00Z"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.items, OrderItems::Raw("not json".to_string()));
        assert!(order.items.is_empty());
        assert_eq!(order.items.summary(), "No items");
    }

    #[test]
    fn test_missing_and_null_items() {
        let json = r#"{"id": "o4", "items": null, "created_at": "2024-01-01T12:00:00Z"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert!(order.items.is_empty());
        assert!(matches!(order.items, OrderItems::Parsed(_)));
    }

    #[test]
    fn test_unknown_payment_status_defaults_to_unpaid() {
        let json = r#"{"id": "o5", "payment_status": "processing", "created_at": "2024-01-01T12:00:00Z"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.payment_status, PaymentStatus::Unpaid);
    }

    #[test]
    fn test_unknown_order_type_and_source_fall_back() {
        let json = r#"{"id": "o6", "order_type": "dine-in", "source": "kiosk",
            "payment_status": "refunded", "created_at": "2024-01-01T12:00:00Z"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_type, OrderType::Pickup);
        assert_eq!(order.source, OrderSource::Web);
        assert_eq!(order.payment_status, PaymentStatus::Refunded);
        assert_eq!(serde_json::to_string(&PaymentStatus::Unpaid).unwrap(), r#""unpaid""#);
        assert_eq!(serde_json::to_string(&OrderType::Delivery).unwrap(), r#""delivery""#);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(OrderStatus::parse("Canceled"), Some(OrderStatus::Cancelled));
        assert_eq!(OrderStatus::parse(" ready "), Some(OrderStatus::Ready));
        assert_eq!(OrderStatus::parse("lost"), None);
        assert!(OrderStatus::Completed.next_actions().is_empty());
    }

    #[test]
    fn test_matches_search() {
        let mut o = order("abc123", OrderStatus::Pending);
        o.order_number = Some("1042".to_string());
        assert!(o.matches_search("ada"));
        assert!(o.matches_search("1042"));
        assert!(o.matches_search("(555) 123"));
        assert!(o.matches_search("ABC"));
        assert!(!o.matches_search("bob"));
        assert!(o.matches_search("  "));
    }

    #[test]
    fn test_filter_params() {
        let filter = OrderFilter::default()
            .with_status(OrderStatus::Ready)
            .with_dates(Some("2024-01-01".into()), Some(String::new()))
            .with_search("  ");
        assert_eq!(
            filter.to_params(),
            vec![
                ("status", "ready".to_string()),
                ("date_from", "2024-01-01".to_string()),
            ]
        );
    }

    #[test]
    fn test_order_stats() {
        let mut cancelled = order("c", OrderStatus::Cancelled);
        cancelled.total = 5000;
        let orders = vec![
            order("a", OrderStatus::Pending),
            order("b", OrderStatus::Completed),
            cancelled,
        ];
        let stats = OrderStats::from_orders(&orders);
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.revenue, 2160);
        assert_eq!(stats.average_order_value(), 1080);
        assert_eq!(stats.active(), 1);
    }
}
