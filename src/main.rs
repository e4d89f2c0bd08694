//! CoinChat
//!
//! Messaging and rewards client built with Leptos (WASM).
//!
//! # Features
//!
//! - Account registration and token-based sign-in
//! - Friends list with direct message threads
//! - Coin balance earned by messaging
//! - Prize catalog with coin redemption
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the CoinChat REST API over HTTP and follows an
//! invalidate-and-refetch policy: after any mutating call the affected state
//! (friends list, message thread, current user) is re-fetched rather than
//! patched locally.

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
