//! App Root Component
//!
//! Root component with the auth gate, page switching and global providers.

use leptos::*;

use crate::components::{Nav, Toast};
use crate::pages::{AuthScreen, Chat, Friends, Prizes, Profile};
use crate::state::session::{provide_session_state, Page, SessionState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide session state to all components; restores any stored session.
    provide_session_state();

    let state = use_context::<SessionState>().expect("SessionState not found");
    let token = state.token;

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            {move || {
                if token.get().is_some() {
                    view! { <MainApp /> }.into_view()
                } else {
                    view! { <AuthScreen /> }.into_view()
                }
            }}

            // Toast notifications
            <Toast />
        </div>
    }
}

/// Everything behind the auth gate: navigation plus the active page.
#[component]
fn MainApp() -> impl IntoView {
    let state = use_context::<SessionState>().expect("SessionState not found");
    let page = state.page;

    view! {
        <Nav />

        <main class="flex-1 container mx-auto px-4 py-8">
            {move || match page.get() {
                Page::Friends => view! { <Friends /> }.into_view(),
                Page::Profile => view! { <Profile /> }.into_view(),
                Page::Prizes => view! { <Prizes /> }.into_view(),
                Page::Chat => view! { <Chat /> }.into_view(),
            }}
        </main>
    }
}
