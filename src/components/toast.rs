//! Toast Notification Component
//!
//! The shared transient banner for success and error messages. The state
//! layer clears whichever message is showing after a fixed timeout.

use leptos::*;

use crate::state::session::SessionState;

/// Banner container, centered under the top edge
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<SessionState>().expect("SessionState not found");
    let success = state.success;
    let error = state.error;

    view! {
        <div class="fixed top-4 left-1/2 -translate-x-1/2 z-50 space-y-2">
            {move || success.get().map(|msg| view! {
                <Banner message=msg icon="✓" bg_class="bg-green-600" />
            })}

            {move || error.get().map(|msg| view! {
                <Banner message=msg icon="✕" bg_class="bg-red-600" />
            })}
        </div>
    }
}

#[component]
fn Banner(
    #[prop(into)]
    message: String,
    icon: &'static str,
    bg_class: &'static str,
) -> impl IntoView {
    view! {
        <div class=format!(
            "flex items-center space-x-2 {} text-white px-4 py-3 rounded-lg shadow-lg animate-slide-in",
            bg_class
        )>
            <span>{icon}</span>
            <span class="text-sm font-medium">{message}</span>
        </div>
    }
}
