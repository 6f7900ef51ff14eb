//! Order Detail
//!
//! Modal body for one order: line items, totals, status transitions and the
//! payment status selector.

use chrono::Utc;
use dinedesk::cache::Resource;
use dinedesk::format::{format_cents, format_phone, format_relative};
use dinedesk::models::{Order, OrderItems, OrderStatus, OrderType, PaymentStatus};
use leptos::*;
use wasm_bindgen::JsCast;

use crate::components::modal::Modal;
use crate::components::status_badge::{OrderStatusBadge, PaymentBadge};
use crate::state::global::GlobalState;

/// Queries that change when an order's status moves
const ORDER_RESOURCES: [Resource; 3] = [Resource::Orders, Resource::Dashboard, Resource::OrderAlerts];

#[component]
pub fn OrderDetail(order: Order, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let title = format!("Order {}", order.display_number());
    let order = create_rw_signal(order);
    let (saving, set_saving) = create_signal(false);

    let state_for_status = state.clone();
    let change_status = move |next: OrderStatus| {
        let state = state_for_status.clone();
        let id = order.with_untracked(|o| o.id.clone());
        set_saving.set(true);
        spawn_local(async move {
            match state.api.update_order_status(&id, next).await {
                Ok(updated) => {
                    order.try_set(updated);
                    for resource in ORDER_RESOURCES {
                        state.cache.invalidate_resource(resource.name());
                    }
                    state.show_success(&format!("Order marked {}", next.label()));
                }
                Err(e) => state.show_error(&e.user_message()),
            }
            set_saving.try_set(false);
        });
    };

    let state_for_payment = state.clone();
    let change_payment = move |ev: web_sys::Event| {
        let Some(next) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
            .and_then(|s| PaymentStatus::parse(&s.value()))
        else {
            return;
        };
        let state = state_for_payment.clone();
        let id = order.with_untracked(|o| o.id.clone());
        spawn_local(async move {
            match state.api.update_payment_status(&id, next).await {
                Ok(updated) => {
                    order.try_set(updated);
                    state.cache.invalidate_resource(Resource::Orders.name());
                    state.show_success(&format!("Payment marked {}", next.label()));
                }
                Err(e) => state.show_error(&e.user_message()),
            }
        });
    };

    view! {
        <Modal title=title on_close=on_close width="max-w-2xl">
            {move || {
                let o = order.get();
                let change_status = change_status.clone();
                let change_payment = change_payment.clone();
                let now = Utc::now();
                view! {
                    <div class="space-y-6">
                        <div class="flex flex-wrap items-center gap-3">
                            <OrderStatusBadge status=o.status />
                            <PaymentBadge status=o.payment_status />
                            <span class="text-sm text-gray-400">
                                {match o.order_type {
                                    OrderType::Pickup => "Pickup",
                                    OrderType::Delivery => "Delivery",
                                }}
                            </span>
                            <span class="text-sm text-gray-500">{format_relative(o.created_at, now)}</span>
                        </div>

                        <div class="grid grid-cols-2 gap-4 text-sm">
                            <div>
                                <div class="text-gray-400">"Customer"</div>
                                <div class="font-medium">{o.customer_label().to_string()}</div>
                                <div class="text-gray-400">
                                    {o.customer_phone.as_deref().map(format_phone).unwrap_or_default()}
                                </div>
                            </div>
                            {o.delivery_address.clone().map(|addr| view! {
                                <div>
                                    <div class="text-gray-400">"Deliver to"</div>
                                    <div>{addr}</div>
                                </div>
                            })}
                        </div>

                        <ItemsTable items=o.items.clone() />

                        {o.special_instructions.clone().filter(|s| !s.is_empty()).map(|note| view! {
                            <div class="p-3 bg-yellow-500/10 border border-yellow-500/30 rounded-lg text-sm">
                                <span class="font-medium text-yellow-300">"Note: "</span>{note}
                            </div>
                        })}

                        <div class="space-y-1 text-sm border-t border-gray-700 pt-4">
                            <TotalRow label="Subtotal" cents=o.subtotal />
                            <TotalRow label="Tax" cents=o.tax />
                            {(o.delivery_fee > 0).then(|| view! { <TotalRow label="Delivery" cents=o.delivery_fee /> })}
                            <div class="flex justify-between font-semibold text-base pt-1">
                                <span>"Total"</span>
                                <span>{format_cents(o.total)}</span>
                            </div>
                        </div>

                        <div class="flex flex-wrap items-center justify-between gap-3 border-t border-gray-700 pt-4">
                            <div class="flex gap-2">
                                {o.status
                                    .next_actions()
                                    .iter()
                                    .map(|&next| {
                                        let change_status = change_status.clone();
                                        let class = if next == OrderStatus::Cancelled {
                                            "px-4 py-2 bg-red-600 hover:bg-red-700 rounded-lg disabled:opacity-50"
                                        } else {
                                            "px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg disabled:opacity-50"
                                        };
                                        view! {
                                            <button
                                                class=class
                                                disabled=move || saving.get()
                                                on:click=move |_| change_status(next)
                                            >
                                                {action_label(next)}
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                            <label class="flex items-center gap-2 text-sm">
                                <span class="text-gray-400">"Payment"</span>
                                <select
                                    class="bg-gray-700 border border-gray-600 rounded px-2 py-1"
                                    on:change=change_payment
                                >
                                    {PaymentStatus::ALL
                                        .iter()
                                        .map(|p| view! {
                                            <option value=p.as_str() selected=*p == o.payment_status>
                                                {p.label()}
                                            </option>
                                        })
                                        .collect_view()}
                                </select>
                            </label>
                        </div>
                    </div>
                }
            }}
        </Modal>
    }
}

fn action_label(next: OrderStatus) -> &'static str {
    match next {
        OrderStatus::Preparing => "Start preparing",
        OrderStatus::Ready => "Mark ready",
        OrderStatus::Completed => "Complete",
        OrderStatus::Cancelled => "Cancel order",
        OrderStatus::Pending => "Reopen",
    }
}

#[component]
fn ItemsTable(items: OrderItems) -> impl IntoView {
    match items {
        OrderItems::Parsed(list) if !list.is_empty() => view! {
            <table class="w-full text-sm">
                <tbody>
                    {list
                        .into_iter()
                        .map(|item| {
                            let total = item.line_total();
                            view! {
                                <tr class="border-b border-gray-700/50 align-top">
                                    <td class="py-2 pr-2 text-gray-400">{format!("{}×", item.quantity)}</td>
                                    <td class="py-2">
                                        <div>{item.name}</div>
                                        {item.modifiers.into_iter().map(|m| view! {
                                            <div class="text-xs text-gray-400">{format!("+ {}", m.name)}</div>
                                        }).collect_view()}
                                        {item.notes.map(|n| view! {
                                            <div class="text-xs text-yellow-300/80">{n}</div>
                                        })}
                                    </td>
                                    <td class="py-2 text-right">{format_cents(total)}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        }
        .into_view(),
        _ => view! { <p class="text-gray-400 text-sm">"No items"</p> }.into_view(),
    }
}

#[component]
fn TotalRow(label: &'static str, cents: i64) -> impl IntoView {
    view! {
        <div class="flex justify-between text-gray-300">
            <span>{label}</span>
            <span>{format_cents(cents)}</span>
        </div>
    }
}
