//! Data Transfer Objects
//!
//! Records owned by the backend and consumed from the `data` field of API
//! responses.

pub mod account;
pub mod analytics;
pub mod booking;
pub mod menu;
pub mod order;
pub mod transcript;

pub use account::{
    Account, OperatingDays, OperatingHoursUpdate, PhoneNumberUpdate, ProfileUpdate, UserProfile,
    UserRole, WEEKDAY_LABELS,
};
pub use analytics::{
    AdminAccount, AnalyticsRange, AnalyticsSummary, DailyPoint, PlatformStats, TopItem,
};
pub use booking::{expected_covers, Booking, BookingStatus};
pub use menu::{CategoryInput, Menu, MenuCategory, MenuItem, MenuItemInput, Modifier, DIETARY_TAGS};
pub use order::{
    Order, OrderFilter, OrderItem, OrderItemModifier, OrderItems, OrderSource, OrderStats,
    OrderStatus, OrderType, PaymentStatus,
};
pub use transcript::{Transcript, TranscriptKind, TranscriptMessage};
