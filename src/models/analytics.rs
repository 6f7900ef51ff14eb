//! Analytics and platform-admin DTOs

use serde::{Deserialize, Serialize};

/// Reporting window offered by the analytics page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnalyticsRange {
    #[default]
    Week,
    Month,
    Quarter,
}

impl AnalyticsRange {
    pub const ALL: [AnalyticsRange; 3] = [
        AnalyticsRange::Week,
        AnalyticsRange::Month,
        AnalyticsRange::Quarter,
    ];

    pub fn as_param(&self) -> &'static str {
        match self {
            AnalyticsRange::Week => "7d",
            AnalyticsRange::Month => "30d",
            AnalyticsRange::Quarter => "90d",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalyticsRange::Week => "7D",
            AnalyticsRange::Month => "30D",
            AnalyticsRange::Quarter => "90D",
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            AnalyticsRange::Week => 7,
            AnalyticsRange::Month => 30,
            AnalyticsRange::Quarter => 90,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub orders: u32,
    /// Cents
    #[serde(default)]
    pub revenue: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopItem {
    pub name: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub revenue: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default)]
    pub total_revenue: i64,
    #[serde(default)]
    pub average_order_value: i64,
    #[serde(default)]
    pub total_calls: u32,
    #[serde(default)]
    pub total_sms: u32,
    #[serde(default)]
    pub conversion_rate: Option<f64>,
    #[serde(default)]
    pub daily: Vec<DailyPoint>,
    #[serde(default)]
    pub top_items: Vec<TopItem>,
}

impl AnalyticsSummary {
    pub fn peak_day(&self) -> Option<&DailyPoint> {
        self.daily.iter().max_by_key(|p| p.revenue)
    }

    pub fn max_daily_revenue(&self) -> i64 {
        self.daily.iter().map(|p| p.revenue).max().unwrap_or(0)
    }
}

/// Row in the platform admin accounts table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: String,
    pub business_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub twilio_phone_number: Option<String>,
    #[serde(default)]
    pub order_count: u32,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformStats {
    #[serde(default)]
    pub total_accounts: u32,
    #[serde(default)]
    pub active_accounts: u32,
    #[serde(default)]
    pub orders_today: u32,
    #[serde(default)]
    pub revenue_today: i64,
    #[serde(default)]
    pub calls_today: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_defaults_and_peak() {
        let summary: AnalyticsSummary = serde_json::from_str(
            r#"{"total_orders": 12, "daily": [
                {"date": "2024-01-01", "orders": 5, "revenue": 5000},
                {"date": "2024-01-02", "orders": 7, "revenue": 9000}
            ]}"#,
        )
        .unwrap();
        assert_eq!(summary.peak_day().unwrap().date, "2024-01-02");
        assert_eq!(summary.max_daily_revenue(), 9000);
        assert!(summary.top_items.is_empty());
    }

    #[test]
    fn test_range_params() {
        assert_eq!(AnalyticsRange::Month.as_param(), "30d");
        assert_eq!(AnalyticsRange::Quarter.days(), 90);
    }
}
