//! Prizes Page
//!
//! Prize catalog with coin-gated redemption. Affordability is judged against
//! the cached balance; the backend re-checks on redeem either way.

use leptos::*;

use crate::api;
use crate::api::client::Prize;
use crate::components::Loading;
use crate::state::session::SessionState;

/// Placeholder shown when a prize has no image of its own.
const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200?text=Prize";

/// Whether the cached balance covers a prize.
fn affordable(coins: i64, cost: i64) -> bool {
    coins >= cost
}

/// Prize catalog page
#[component]
pub fn Prizes() -> impl IntoView {
    let state = use_context::<SessionState>().expect("SessionState not found");

    let (prizes, set_prizes) = create_signal(Vec::<Prize>::new());
    let (loaded, set_loaded) = create_signal(false);

    let reload_state = state.clone();
    let reload = move || {
        let state = reload_state.clone();
        spawn_local(async move {
            let Some(token) = state.token.get_untracked() else {
                return;
            };

            match api::prizes(&token).await {
                Ok(list) => set_prizes.set(list),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to load prizes: {}", e).into());
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

    let reload_for_cards = reload;

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Prizes"</h1>
                <p class="text-gray-400 mt-1">"Spend the coins you earned by chatting"</p>
            </div>

            {move || {
                if !loaded.get() {
                    return view! { <Loading /> }.into_view();
                }

                let list = prizes.get();
                if list.is_empty() {
                    view! {
                        <div class="text-center py-12">
                            <p class="text-gray-400">"No prizes available right now"</p>
                        </div>
                    }.into_view()
                } else {
                    view! {
                        <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-4">
                            {list.into_iter().map(|prize| view! {
                                <PrizeCard prize=prize on_redeemed=reload_for_cards.clone() />
                            }).collect_view()}
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}

/// Single catalog card with an affordability-gated redeem action
#[component]
fn PrizeCard(prize: Prize, on_redeemed: impl Fn() + Clone + 'static) -> impl IntoView {
    let state = use_context::<SessionState>().expect("SessionState not found");

    let current_user = state.current_user;
    let coins = move || current_user.get().map(|u| u.coins).unwrap_or_default();

    let (submitting, set_submitting) = create_signal(false);

    let prize_id = prize.id;
    let redeem_state = state.clone();
    let redeem = move |_| {
        set_submitting.set(true);

        let state = redeem_state.clone();
        let on_redeemed = on_redeemed.clone();
        spawn_local(async move {
            let Some(token) = state.token.get_untracked() else {
                set_submitting.set(false);
                return;
            };

            match api::redeem_prize(&token, prize_id).await {
                Ok(()) => {
                    state.show_success("Prize redeemed");
                    // Redemption debits coins server-side; re-fetch both.
                    state.refresh_user().await;
                    on_redeemed();
                }
                Err(e) => state.show_error(&e),
            }
            set_submitting.set(false);
        });
    };

    let image = prize
        .image_url
        .clone()
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
    let description = prize
        .description
        .clone()
        .unwrap_or_else(|| "No description".to_string());
    let cost = prize.cost;

    view! {
        <div class="bg-gray-800 rounded-xl overflow-hidden border border-gray-700">
            <img src=image alt=prize.name.clone() class="w-full h-40 object-cover" />

            <div class="p-4 space-y-2">
                <h3 class="font-semibold">{prize.name.clone()}</h3>
                <p class="text-gray-400 text-sm">{description}</p>
                <p class="text-yellow-400 font-medium">{format!("{} coins", cost)}</p>

                {move || {
                    if affordable(coins(), cost) {
                        view! {
                            <button
                                on:click=redeem.clone()
                                disabled=move || submitting.get()
                                class="w-full px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                                       rounded-lg font-medium transition-colors"
                            >
                                {move || if submitting.get() { "Redeeming..." } else { "Redeem" }}
                            </button>
                        }.into_view()
                    } else {
                        // Unaffordable prizes get no click handler at all.
                        view! {
                            <button
                                disabled=true
                                class="w-full px-4 py-2 bg-gray-700 text-gray-500 rounded-lg
                                       font-medium cursor-not-allowed"
                            >
                                "Not enough coins"
                            </button>
                        }.into_view()
                    }
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_balance_is_enough() {
        assert!(affordable(50, 50));
    }

    #[test]
    fn short_balance_disables_redemption() {
        assert!(!affordable(49, 50));
    }
}
