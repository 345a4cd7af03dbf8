//! Tenant Dashboard UI
//!
//! Browser rendition of the tenant signup screen built with Leptos (WASM).
//!
//! # Features
//!
//! - Summary cards for total and recent tenants
//! - Signup bar chart by day or month
//! - Latest tenants table
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Aggregation, card values and the one-shot loader come from the
//! `tenant-dashboard` library core; this crate only supplies the browser
//! fetch and the views.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
