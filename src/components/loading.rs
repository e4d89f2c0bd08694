//! Loading Component
//!
//! Spinners for page and inline waits.

use leptos::*;

/// Centered spinner for a section that has not fetched yet
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-16">
            <div class="loading-spinner w-10 h-10" />
        </div>
    }
}

/// Small spinner for use next to text
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" />
    }
}
