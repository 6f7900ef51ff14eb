//! Status Badges

use dinedesk::models::{BookingStatus, OrderStatus, PaymentStatus};
use leptos::*;

fn order_class(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "bg-yellow-500/20 text-yellow-300",
        OrderStatus::Preparing => "bg-blue-500/20 text-blue-300",
        OrderStatus::Ready => "bg-green-500/20 text-green-300",
        OrderStatus::Completed => "bg-gray-500/20 text-gray-300",
        OrderStatus::Cancelled => "bg-red-500/20 text-red-300",
    }
}

fn payment_class(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Paid => "bg-green-500/20 text-green-300",
        PaymentStatus::Unpaid => "bg-yellow-500/20 text-yellow-300",
        PaymentStatus::Refunded => "bg-purple-500/20 text-purple-300",
        PaymentStatus::Failed => "bg-red-500/20 text-red-300",
    }
}

fn booking_class(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Pending => "bg-yellow-500/20 text-yellow-300",
        BookingStatus::Confirmed => "bg-blue-500/20 text-blue-300",
        BookingStatus::Seated => "bg-green-500/20 text-green-300",
        BookingStatus::Completed => "bg-gray-500/20 text-gray-300",
        BookingStatus::Cancelled | BookingStatus::NoShow => "bg-red-500/20 text-red-300",
    }
}

#[component]
fn Badge(label: &'static str, class: &'static str) -> impl IntoView {
    view! {
        <span class=format!("px-2 py-1 rounded-full text-xs font-medium {}", class)>{label}</span>
    }
}

#[component]
pub fn OrderStatusBadge(status: OrderStatus) -> impl IntoView {
    view! { <Badge label=status.label() class=order_class(status) /> }
}

#[component]
pub fn PaymentBadge(status: PaymentStatus) -> impl IntoView {
    view! { <Badge label=status.label() class=payment_class(status) /> }
}

#[component]
pub fn BookingStatusBadge(status: BookingStatus) -> impl IntoView {
    view! { <Badge label=status.label() class=booking_class(status) /> }
}
