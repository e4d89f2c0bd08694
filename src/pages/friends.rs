//! Friends Page
//!
//! Friends list with chat/remove actions and the add-friend dialog. The list
//! is re-fetched after every mutation instead of patched in place.

use leptos::*;

use crate::api;
use crate::components::Loading;
use crate::state::session::{ChatPeer, SessionState, User};

use super::required;

/// Decide what to do with a resolved username lookup before any mutation
/// call. Self-friending never reaches the network.
fn resolve_add_target(lookup: Option<User>, own_id: i64) -> Result<User, &'static str> {
    match lookup {
        None => Err("No such user"),
        Some(user) if user.id == own_id => Err("You cannot add yourself as a friend"),
        Some(user) => Ok(user),
    }
}

/// Friends list page
#[component]
pub fn Friends() -> impl IntoView {
    let state = use_context::<SessionState>().expect("SessionState not found");

    let (friends, set_friends) = create_signal(Vec::<User>::new());
    let (loaded, set_loaded) = create_signal(false);
    let (show_add, set_show_add) = create_signal(false);

    let reload_state = state.clone();
    let reload = move || {
        let state = reload_state.clone();
        spawn_local(async move {
            let Some(token) = state.token.get_untracked() else {
                return;
            };

            match api::friends(&token).await {
                Ok(list) => set_friends.set(list),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to load friends: {}", e).into());
                }
            }
            set_loaded.set(true);
        });
    };

    // Fetch on mount
    let initial = reload.clone();
    create_effect(move |_| {
        initial();
    });

    let reload_for_modal = reload.clone();
    let reload_for_cards = reload;

    view! {
        <div class="space-y-8">
            // Header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Friends"</h1>
                    <p class="text-gray-400 mt-1">"People you can message"</p>
                </div>

                <button
                    on:click=move |_| set_show_add.set(true)
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "+ Add Friend"
                </button>
            </div>

            // Add-friend dialog
            {move || {
                if show_add.get() {
                    view! {
                        <AddFriendModal
                            on_close=move || set_show_add.set(false)
                            on_added=reload_for_modal.clone()
                        />
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}

            // Friends list
            {move || {
                if !loaded.get() {
                    return view! { <Loading /> }.into_view();
                }

                let list = friends.get();
                if list.is_empty() {
                    view! {
                        <div class="text-center py-12">
                            <p class="text-gray-400">
                                "No friends yet. Use \"+ Add Friend\" to find someone to chat with."
                            </p>
                        </div>
                    }.into_view()
                } else {
                    view! {
                        <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-4">
                            {list.into_iter().map(|friend| view! {
                                <FriendCard friend=friend on_removed=reload_for_cards.clone() />
                            }).collect_view()}
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}

/// Single friend card with chat and remove actions
#[component]
fn FriendCard(friend: User, on_removed: impl Fn() + Clone + 'static) -> impl IntoView {
    let state = use_context::<SessionState>().expect("SessionState not found");

    let peer = ChatPeer {
        id: friend.id,
        username: friend.username.clone(),
    };
    let chat_state = state.clone();
    let open_chat = move |_| {
        chat_state.open_chat(peer.clone());
    };

    let friend_id = friend.id;
    let remove_state = state.clone();
    let remove = move |_| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message("Remove this friend?").ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let state = remove_state.clone();
        let on_removed = on_removed.clone();
        spawn_local(async move {
            let Some(token) = state.token.get_untracked() else {
                return;
            };

            match api::delete_friend(&token, friend_id).await {
                Ok(()) => {
                    state.show_success("Friend removed");
                    on_removed();
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    view! {
        <div class="bg-gray-800 rounded-xl p-4 border border-gray-700 hover:border-gray-600 transition-colors">
            <h3 class="font-semibold">{friend.username.clone()}</h3>
            <p class="text-gray-400 text-sm mt-1">{friend.email.clone()}</p>

            <div class="flex space-x-2 mt-4">
                <button
                    on:click=open_chat
                    class="px-3 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg text-sm font-medium transition-colors"
                >
                    "Chat"
                </button>
                <button
                    on:click=remove
                    class="px-3 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm font-medium transition-colors"
                >
                    "Remove"
                </button>
            </div>
        </div>
    }
}

/// Add-friend dialog: resolves a username, rejects self and unknown users
/// locally, then links and reloads.
#[component]
fn AddFriendModal(
    on_close: impl Fn() + 'static + Clone,
    on_added: impl Fn() + 'static + Clone,
) -> impl IntoView {
    let state = use_context::<SessionState>().expect("SessionState not found");

    let (username, set_username) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_close_for_x = on_close.clone();
    let on_close_for_cancel = on_close.clone();
    let on_close_for_submit = on_close;

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let Some(username) = required(&username.get()) else {
            state.show_error("Please enter a username");
            return;
        };

        set_submitting.set(true);

        let state_clone = state.clone();
        let on_added = on_added.clone();
        let on_close = on_close_for_submit.clone();
        spawn_local(async move {
            let Some(token) = state_clone.token.get_untracked() else {
                set_submitting.set(false);
                return;
            };
            let Some(me) = state_clone.current_user.get_untracked() else {
                set_submitting.set(false);
                return;
            };

            match api::user_by_username(&token, &username).await {
                Ok(lookup) => match resolve_add_target(lookup, me.id) {
                    Ok(friend) => match api::add_friend(&token, me.id, friend.id).await {
                        Ok(_friendship) => {
                            state_clone.show_success("Friend added");
                            on_added();
                            on_close();
                        }
                        Err(e) => state_clone.show_error(&e),
                    },
                    Err(reason) => state_clone.show_error(reason),
                },
                Err(e) => state_clone.show_error(&e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-50">
            <div class="bg-gray-800 rounded-xl p-6 w-full max-w-md mx-4">
                <div class="flex items-center justify-between mb-6">
                    <h2 class="text-xl font-semibold">"Add Friend"</h2>
                    <button
                        on:click=move |_| on_close_for_x()
                        class="text-gray-400 hover:text-white"
                    >
                        "✕"
                    </button>
                </div>

                <form on:submit=on_submit class="space-y-4">
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Username"</label>
                        <input
                            type="text"
                            placeholder="Who do you want to chat with?"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            class="w-full bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                    </div>

                    <div class="flex space-x-3 pt-4">
                        <button
                            type="button"
                            on:click=move |_| on_close_for_cancel()
                            class="flex-1 px-4 py-3 bg-gray-700 hover:bg-gray-600 rounded-lg font-medium transition-colors"
                        >
                            "Cancel"
                        </button>
                        <button
                            type="submit"
                            disabled=move || submitting.get()
                            class="flex-1 px-4 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                                   rounded-lg font-medium transition-colors"
                        >
                            {move || if submitting.get() { "Adding..." } else { "Add" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, username: &str) -> User {
        User {
            id,
            username: username.to_string(),
            email: format!("{}@example.com", username),
            coins: 0,
        }
    }

    #[test]
    fn add_target_missing_user_is_rejected() {
        assert_eq!(resolve_add_target(None, 1), Err("No such user"));
    }

    #[test]
    fn add_target_self_is_rejected_before_any_mutation() {
        assert_eq!(
            resolve_add_target(Some(user(1, "alice")), 1),
            Err("You cannot add yourself as a friend")
        );
    }

    #[test]
    fn add_target_other_user_passes_through() {
        let resolved = resolve_add_target(Some(user(2, "bob")), 1);
        assert_eq!(resolved.map(|u| u.id), Ok(2));
    }
}
