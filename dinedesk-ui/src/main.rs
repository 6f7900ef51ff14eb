//! DineDesk Dashboard
//!
//! Restaurant operations dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Live order board with a chime for new orders
//! - Menu editing and item availability
//! - Reservations, call and SMS transcripts
//! - Sales analytics
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Data access goes through the `dinedesk` core crate: its
//! `ApiClient` runs over a `gloo-net` transport and every page reads through
//! one shared `QueryCache`.

use leptos::*;

mod api;
mod app;
mod audio;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
