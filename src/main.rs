//! Spyglass Dashboard
//!
//! Competitive-intelligence dashboard for the EMS sector built with
//! Leptos (WASM).
//!
//! # Features
//!
//! - Interactive global facility map
//! - CapEx, sentiment, and AI-investment analytics
//! - News, alerts, and earnings-calendar tracking
//! - Report exports
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All analytics are pre-computed by the Spyglass API; every
//! page fetches on mount and renders reactively.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
