//! Chat Page
//!
//! The message thread with the currently open friend. Sending re-fetches the
//! whole thread; whichever reload resolves last paints the final state.

use leptos::*;

use crate::api;
use crate::api::client::Message;
use crate::components::loading::InlineLoading;
use crate::state::session::{Page, SessionState};

use super::required;

/// CSS class for a message bubble, chosen by who sent it.
fn bubble_class(sender_id: i64, own_id: i64) -> &'static str {
    if sender_id == own_id {
        "sent"
    } else {
        "received"
    }
}

/// Chat page component
#[component]
pub fn Chat() -> impl IntoView {
    let state = use_context::<SessionState>().expect("SessionState not found");

    let (messages, set_messages) = create_signal(Vec::<Message>::new());
    let (loaded, set_loaded) = create_signal(false);
    let (draft, set_draft) = create_signal(String::new());

    let thread_ref = create_node_ref::<html::Div>();

    let reload_state = state.clone();
    let reload = move || {
        let state = reload_state.clone();
        spawn_local(async move {
            let Some(token) = state.token.get_untracked() else {
                return;
            };
            let Some(peer) = state.active_chat.get_untracked() else {
                return;
            };

            match api::messages(&token, peer.id).await {
                Ok(thread) => {
                    set_messages.set(thread);
                    scroll_to_latest(thread_ref);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to load messages: {}", e).into());
                    state.show_error("Could not load the conversation");
                }
            }
            set_loaded.set(true);
        });
    };

    // Fetch on mount and whenever the open conversation changes
    let active_chat = state.active_chat;
    let initial = reload.clone();
    create_effect(move |_| {
        let _ = active_chat.get();
        set_loaded.set(false);
        initial();
    });

    let send_state = state.clone();
    let send_reload = reload.clone();
    let send = move || {
        let Some(content) = required(&draft.get_untracked()) else {
            // Blank input is ignored locally, no banner.
            return;
        };

        let state = send_state.clone();
        let reload = send_reload.clone();
        spawn_local(async move {
            let Some(token) = state.token.get_untracked() else {
                return;
            };
            let Some(me) = state.current_user.get_untracked() else {
                return;
            };
            let Some(peer) = state.active_chat.get_untracked() else {
                return;
            };

            match api::send_message(&token, me.id, peer.id, &content).await {
                Ok(_message) => {
                    set_draft.set(String::new());
                    // Sending earns a coin; re-fetch the thread and the user.
                    reload();
                    state.refresh_user().await;
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    let send_for_click = send.clone();
    let send_for_key = send;
    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" {
            send_for_key();
        }
    };

    let back_page = state.page;
    let peer_name = move || {
        active_chat
            .get()
            .map(|p| p.username)
            .unwrap_or_default()
    };
    let current_user = state.current_user;

    view! {
        <div class="flex flex-col h-[70vh] bg-gray-800 rounded-xl">
            // Header
            <div class="flex items-center justify-between px-4 py-3 border-b border-gray-700">
                <button
                    on:click=move |_| back_page.set(Page::Friends)
                    class="px-3 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                >
                    "← Friends"
                </button>
                <h2 class="font-semibold">{peer_name}</h2>
                <div class="w-20" />
            </div>

            // Thread
            <div node_ref=thread_ref class="flex-1 flex flex-col overflow-y-auto px-4 py-3 space-y-2">
                {move || {
                    if !loaded.get() {
                        return view! {
                            <div class="flex items-center justify-center py-12 text-gray-400">
                                <InlineLoading />
                                <span class="ml-2">"Loading conversation..."</span>
                            </div>
                        }.into_view();
                    }

                    let thread = messages.get();
                    if thread.is_empty() {
                        view! {
                            <div class="text-center py-12 text-gray-400">
                                <p>"No messages yet"</p>
                                <p class="text-sm mt-1">"Send the first one to start the conversation!"</p>
                            </div>
                        }.into_view()
                    } else {
                        let me = current_user.get().map(|u| u.id).unwrap_or_default();
                        thread.into_iter().map(|message| view! {
                            <MessageBubble message=message own_id=me />
                        }).collect_view()
                    }
                }}
            </div>

            // Composer
            <div class="flex items-center space-x-2 px-4 py-3 border-t border-gray-700">
                <input
                    type="text"
                    placeholder="Type a message"
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                    on:keydown=on_keydown
                    class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
                <button
                    on:click=move |_| send_for_click()
                    class="px-4 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "Send"
                </button>
            </div>
        </div>
    }
}

/// Scroll the thread container to its latest message.
fn scroll_to_latest(thread: NodeRef<html::Div>) {
    if let Some(div) = thread.get_untracked() {
        div.set_scroll_top(div.scroll_height());
    }
}

/// A single message, aligned and colored by direction
#[component]
fn MessageBubble(message: Message, own_id: i64) -> impl IntoView {
    let direction = bubble_class(message.sender_id, own_id);
    let placement = if direction == "sent" {
        "self-end bg-primary-600"
    } else {
        "self-start bg-gray-700"
    };
    let time = message.created_at.format("%H:%M:%S").to_string();

    view! {
        <div class=format!("message-bubble {} {} max-w-[70%] rounded-lg px-3 py-2", direction, placement)>
            <div class="message-content break-words">{message.content.clone()}</div>
            <div class="message-time text-xs text-gray-300 mt-1">{time}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_messages_classify_as_sent() {
        assert_eq!(bubble_class(7, 7), "sent");
    }

    #[test]
    fn peer_messages_classify_as_received() {
        assert_eq!(bubble_class(3, 7), "received");
    }
}
