//! Navigation Component
//!
//! Header bar with page links, the coin balance and logout.

use leptos::*;

use crate::state::session::{Page, SessionState};

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<SessionState>().expect("SessionState not found");
    let active_chat = state.active_chat;
    let current_user = state.current_user;

    let logout_state = state.clone();
    let on_logout = move |_| {
        logout_state.logout();
    };

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <div class="flex items-center space-x-3">
                        <span class="text-2xl">"💬"</span>
                        <span class="text-xl font-bold text-white">"CoinChat"</span>
                    </div>

                    // Page links
                    <div class="flex items-center space-x-1">
                        <NavButton page=Page::Friends label="Friends" />
                        <NavButton page=Page::Profile label="Profile" />
                        <NavButton page=Page::Prizes label="Prizes" />

                        // Chat is only reachable while a conversation is open
                        {move || {
                            active_chat.get().map(|_| view! {
                                <NavButton page=Page::Chat label="Chat" />
                            })
                        }}
                    </div>

                    // Coin balance and logout
                    <div class="flex items-center space-x-4">
                        <span class="text-yellow-400 font-medium">
                            {move || {
                                current_user
                                    .get()
                                    .map(|u| format!("Coins: {}", u.coins))
                                    .unwrap_or_default()
                            }}
                        </span>
                        <button
                            on:click=on_logout
                            class="px-3 py-2 rounded-lg text-gray-300 hover:text-white
                                   hover:bg-gray-700 transition-colors"
                        >
                            "Log out"
                        </button>
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual page link
#[component]
fn NavButton(page: Page, label: &'static str) -> impl IntoView {
    let state = use_context::<SessionState>().expect("SessionState not found");
    let current = state.page;

    view! {
        <button
            on:click=move |_| current.set(page)
            class=move || {
                let base = "px-4 py-2 rounded-lg transition-colors";
                if current.get() == page {
                    format!("{} bg-gray-700 text-white", base)
                } else {
                    format!("{} text-gray-300 hover:text-white hover:bg-gray-700", base)
                }
            }
        >
            {label}
        </button>
    }
}
