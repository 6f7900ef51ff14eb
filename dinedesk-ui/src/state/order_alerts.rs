//! New-Order Alerts
//!
//! Polls the order list on its own cadence and plays the chime when a new
//! pending order appears. Lives as long as the view that calls it.

use std::cell::RefCell;
use std::rc::Rc;

use dinedesk::cache::{QueryKey, Resource};
use dinedesk::models::{Order, OrderFilter};
use dinedesk::notify::OrderAlert;
use leptos::*;

use crate::audio::WebAudioChime;
use crate::state::global::GlobalState;
use crate::state::query::{use_query, QueryState};

/// Run order alerts for the current account while the caller is mounted
pub fn use_order_alerts() -> QueryState<Vec<Order>> {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let account_id = state.account_id;

    let orders = use_query(
        Resource::OrderAlerts,
        move || {
            account_id
                .get()
                .map(|id| QueryKey::new(Resource::OrderAlerts.name()).param("account_id", id))
        },
        move |api| {
            let id = account_id.get_untracked().unwrap_or_default();
            async move { api.list_orders(&id, &OrderFilter::default()).await }
        },
    );

    let alert = Rc::new(RefCell::new(OrderAlert::new(WebAudioChime::new())));

    let sound_enabled = state.sound_enabled;
    {
        let alert = alert.clone();
        create_effect(move |_| alert.borrow_mut().set_enabled(sound_enabled.get()));
    }

    let data = orders.data;
    {
        let alert = alert.clone();
        create_effect(move |_| {
            data.with(|list| {
                if let Some(list) = list {
                    alert.borrow_mut().check(list);
                }
            })
        });
    }

    on_cleanup(move || alert.borrow_mut().close());

    orders
}
