//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod category_form;
pub mod chart;
pub mod collapsible;
pub mod delete_confirm;
pub mod error_state;
pub mod header;
pub mod hours_settings;
pub mod menu_item_form;
pub mod modal;
pub mod order_detail;
pub mod phone_settings;
pub mod sidebar;
pub mod skeleton;
pub mod stat_card;
pub mod status_badge;
pub mod toast;

pub use category_form::CategoryForm;
pub use chart::RevenueChart;
pub use collapsible::Collapsible;
pub use delete_confirm::DeleteConfirmButton;
pub use error_state::{EmptyState, ErrorState};
pub use header::Header;
pub use hours_settings::HoursSettings;
pub use menu_item_form::MenuItemForm;
pub use modal::Modal;
pub use order_detail::OrderDetail;
pub use phone_settings::PhoneSettings;
pub use sidebar::Sidebar;
pub use skeleton::{
    OrderTableSkeleton, RevenueChartSkeleton, RowsSkeleton, Spinner, StatCardSkeleton,
    StatGridSkeleton, ORDER_COLUMNS,
};
pub use stat_card::StatCard;
pub use status_badge::{BookingStatusBadge, OrderStatusBadge, PaymentBadge};
pub use toast::ToastStack;
