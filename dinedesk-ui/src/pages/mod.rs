//! Application Pages

pub mod admin;
pub mod analytics;
pub mod dashboard;
pub mod login;
pub mod menu;
pub mod orders;
pub mod reservations;
pub mod settings;
pub mod transcripts;

pub use admin::Admin;
pub use analytics::Analytics;
pub use dashboard::Dashboard;
pub use login::Login;
pub use menu::MenuPage;
pub use orders::Orders;
pub use reservations::Reservations;
pub use settings::Settings;
pub use transcripts::Transcripts;
