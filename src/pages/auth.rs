//! Auth Page
//!
//! Login and registration forms shown while no session exists. All fields are
//! validated (trimmed, non-empty) before any network call.

use leptos::*;

use crate::api;
use crate::state::session::SessionState;

use super::required;

#[derive(Clone, Copy, PartialEq)]
enum AuthTab {
    Login,
    Register,
}

/// Authentication screen with login/register tabs
#[component]
pub fn AuthScreen() -> impl IntoView {
    let (tab, set_tab) = create_signal(AuthTab::Login);

    // Prefilled after a successful registration
    let (login_username, set_login_username) = create_signal(String::new());

    view! {
        <div class="flex-1 flex items-center justify-center px-4">
            <div class="bg-gray-800 rounded-xl p-8 w-full max-w-md">
                <div class="flex items-center justify-center space-x-3 mb-6">
                    <span class="text-3xl">"💬"</span>
                    <span class="text-2xl font-bold">"CoinChat"</span>
                </div>

                // Tab toggle
                <div class="flex space-x-2 mb-6">
                    <TabButton
                        label="Sign in"
                        current=tab
                        target=AuthTab::Login
                        on_click=move |_| set_tab.set(AuthTab::Login)
                    />
                    <TabButton
                        label="Register"
                        current=tab
                        target=AuthTab::Register
                        on_click=move |_| set_tab.set(AuthTab::Register)
                    />
                </div>

                {move || match tab.get() {
                    AuthTab::Login => view! {
                        <LoginForm username=login_username set_username=set_login_username />
                    }.into_view(),
                    AuthTab::Register => view! {
                        <RegisterForm on_registered=move |username: String| {
                            set_login_username.set(username);
                            set_tab.set(AuthTab::Login);
                        } />
                    }.into_view(),
                }}
            </div>
        </div>
    }
}

#[component]
fn TabButton(
    label: &'static str,
    current: ReadSignal<AuthTab>,
    target: AuthTab,
    on_click: impl Fn(web_sys::MouseEvent) + 'static,
) -> impl IntoView {
    view! {
        <button
            type="button"
            on:click=on_click
            class=move || {
                let base = "flex-1 px-4 py-2 rounded-lg text-sm font-medium transition-colors";
                if current.get() == target {
                    format!("{} bg-gray-600 text-white", base)
                } else {
                    format!("{} bg-gray-700 text-gray-400 hover:text-white", base)
                }
            }
        >
            {label}
        </button>
    }
}

/// Login form. On success the session is established and the friends page
/// shown; a rejected exchange leaves no token behind.
#[component]
fn LoginForm(
    username: ReadSignal<String>,
    set_username: WriteSignal<String>,
) -> impl IntoView {
    let state = use_context::<SessionState>().expect("SessionState not found");

    let (password, set_password) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let fields = (required(&username.get()), required(&password.get()));
        let (Some(username), Some(password)) = fields else {
            state.show_error("Please enter a username and password");
            return;
        };

        set_submitting.set(true);

        let state_clone = state.clone();
        spawn_local(async move {
            match api::login(&username, &password).await {
                Ok((token, user)) => {
                    state_clone.show_success("Signed in");
                    // Unmounts this form, so the signal stays untouched here.
                    state_clone.establish(token, user);
                }
                Err(e) => {
                    state_clone.show_error(&e);
                    set_submitting.set(false);
                }
            }
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-4">
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Username"</label>
                <input
                    type="text"
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Password"</label>
                <input
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            <button
                type="submit"
                disabled=move || submitting.get()
                class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                       rounded-lg py-3 font-semibold transition-colors"
            >
                {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
            </button>
        </form>
    }
}

/// Registration form. Success has no session side effect; the caller is
/// handed the username to prefill the login form with.
#[component]
fn RegisterForm(on_registered: impl Fn(String) + Clone + 'static) -> impl IntoView {
    let state = use_context::<SessionState>().expect("SessionState not found");

    let (username, set_username) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let fields = (
            required(&username.get()),
            required(&email.get()),
            required(&password.get()),
        );
        let (Some(username), Some(email), Some(password)) = fields else {
            state.show_error("Please fill in every field");
            return;
        };

        set_submitting.set(true);

        let state_clone = state.clone();
        let on_registered = on_registered.clone();
        spawn_local(async move {
            match api::register(&username, &email, &password).await {
                Ok(_user) => {
                    state_clone.show_success("Account created, please sign in");
                    // Switches back to the login tab, unmounting this form.
                    on_registered(username);
                }
                Err(e) => {
                    state_clone.show_error(&e);
                    set_submitting.set(false);
                }
            }
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-4">
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Username"</label>
                <input
                    type="text"
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Email"</label>
                <input
                    type="email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Password"</label>
                <input
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            <button
                type="submit"
                disabled=move || submitting.get()
                class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                       rounded-lg py-3 font-semibold transition-colors"
            >
                {move || if submitting.get() { "Creating account..." } else { "Register" }}
            </button>
        </form>
    }
}
