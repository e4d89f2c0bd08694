//! Profile Page
//!
//! The cached user's details plus their coin history. The user card renders
//! straight from the cache; only the coin records are fetched.

use leptos::*;

use crate::api;
use crate::api::client::CoinRecord;
use crate::components::Loading;
use crate::state::session::SessionState;

/// Sign-prefixed rendering of a coin amount.
fn signed_amount(amount: i64) -> String {
    if amount > 0 {
        format!("+{}", amount)
    } else {
        amount.to_string()
    }
}

/// Profile page component
#[component]
pub fn Profile() -> impl IntoView {
    let state = use_context::<SessionState>().expect("SessionState not found");

    let (records, set_records) = create_signal(Vec::<CoinRecord>::new());
    let (loaded, set_loaded) = create_signal(false);

    // Fetch the coin history on mount
    let effect_state = state.clone();
    create_effect(move |_| {
        let state = effect_state.clone();
        spawn_local(async move {
            let Some(token) = state.token.get_untracked() else {
                return;
            };

            match api::coin_records(&token).await {
                Ok(list) => set_records.set(list),
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Failed to load coin records: {}", e).into(),
                    );
                }
            }
            set_loaded.set(true);
        });
    });

    let current_user = state.current_user;

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Profile"</h1>
                <p class="text-gray-400 mt-1">"Your account and coin history"</p>
            </div>

            // Account card, straight from the cached user
            <section class="bg-gray-800 rounded-xl p-6">
                {move || {
                    current_user.get().map(|user| view! {
                        <div class="space-y-2">
                            <h2 class="text-xl font-semibold">{user.username.clone()}</h2>
                            <p class="text-gray-400">{user.email.clone()}</p>
                            <p class="text-yellow-400 font-medium">{format!("{} coins", user.coins)}</p>
                        </div>
                    })
                }}
            </section>

            // Coin history
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Coin History"</h2>

                {move || {
                    if !loaded.get() {
                        return view! { <Loading /> }.into_view();
                    }

                    let list = records.get();
                    if list.is_empty() {
                        view! {
                            <p class="text-gray-400">"No coin activity yet"</p>
                        }.into_view()
                    } else {
                        list.into_iter().map(|record| view! {
                            <CoinRecordRow record=record />
                        }).collect_view()
                    }
                }}
            </section>
        </div>
    }
}

/// One audit-log entry, styled by sign
#[component]
fn CoinRecordRow(record: CoinRecord) -> impl IntoView {
    let amount_class = if record.amount > 0 {
        "text-green-400"
    } else {
        "text-red-400"
    };
    let time = record.created_at.format("%b %d, %H:%M").to_string();

    view! {
        <div class="flex items-center justify-between py-2 border-b border-gray-700 last:border-0">
            <div>
                <span>{record.reason.clone()}</span>
                <span class="text-gray-400 text-sm ml-2">{time}</span>
            </div>
            <span class=format!("font-semibold {}", amount_class)>
                {signed_amount(record.amount)}
            </span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_amounts_get_a_plus_prefix() {
        assert_eq!(signed_amount(3), "+3");
    }

    #[test]
    fn negative_and_zero_amounts_render_as_is() {
        assert_eq!(signed_amount(-20), "-20");
        assert_eq!(signed_amount(0), "0");
    }
}
