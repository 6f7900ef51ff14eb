//! Refresh policy per resource

use chrono::Duration;

use crate::config::PollingConfig;

/// Data sets the dashboard caches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Orders,
    Dashboard,
    OrderAlerts,
    Bookings,
    Menu,
    Settings,
    Analytics,
    Transcripts,
    Admin,
}

/// How often a view polls and how long cached data counts as fresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPolicy {
    pub poll_interval: Option<Duration>,
    pub stale_time: Duration,
}

impl Resource {
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Orders => "orders",
            Resource::Dashboard => "dashboard",
            Resource::OrderAlerts => "order-alerts",
            Resource::Bookings => "bookings",
            Resource::Menu => "menu",
            Resource::Settings => "settings",
            Resource::Analytics => "analytics",
            Resource::Transcripts => "transcripts",
            Resource::Admin => "admin",
        }
    }

    pub fn policy(&self, polling: &PollingConfig) -> QueryPolicy {
        let secs = |s: u64| Some(Duration::seconds(s as i64)).filter(|_| s > 0);
        let (poll_interval, stale_time) = match self {
            Resource::Orders => (secs(polling.orders_secs), Duration::zero()),
            Resource::Dashboard => (secs(polling.dashboard_secs), Duration::zero()),
            Resource::OrderAlerts => (secs(polling.order_alerts_secs), Duration::zero()),
            Resource::Bookings => (secs(polling.bookings_secs), Duration::zero()),
            Resource::Menu | Resource::Settings => (None, Duration::minutes(5)),
            Resource::Analytics => (None, Duration::seconds(60)),
            Resource::Transcripts => (None, Duration::seconds(30)),
            Resource::Admin => (None, Duration::seconds(60)),
        };
        QueryPolicy {
            poll_interval,
            stale_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_intervals() {
        let polling = PollingConfig::default();
        assert_eq!(
            Resource::Orders.policy(&polling).poll_interval,
            Some(Duration::seconds(10))
        );
        assert_eq!(
            Resource::Dashboard.policy(&polling).poll_interval,
            Some(Duration::seconds(30))
        );
        assert_eq!(
            Resource::OrderAlerts.policy(&polling).poll_interval,
            Some(Duration::seconds(15))
        );
        assert_eq!(
            Resource::Bookings.policy(&polling).poll_interval,
            Some(Duration::seconds(60))
        );
        assert_eq!(Resource::Menu.policy(&polling).poll_interval, None);
        assert_eq!(
            Resource::Menu.policy(&polling).stale_time,
            Duration::minutes(5)
        );
    }

    #[test]
    fn test_resource_names_are_distinct() {
        let all = [
            Resource::Orders,
            Resource::Dashboard,
            Resource::OrderAlerts,
            Resource::Bookings,
            Resource::Menu,
            Resource::Settings,
            Resource::Analytics,
            Resource::Transcripts,
            Resource::Admin,
        ];
        let names: std::collections::HashSet<_> = all.iter().map(Resource::name).collect();
        assert_eq!(names.len(), all.len());
        assert!(!names.contains("order"));
    }

    #[test]
    fn test_zero_disables_polling() {
        let polling = PollingConfig {
            orders_secs: 0,
            ..PollingConfig::default()
        };
        assert_eq!(Resource::Orders.policy(&polling).poll_interval, None);
    }
}
