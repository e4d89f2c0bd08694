//! Session State
//!
//! Reactive session and navigation state using Leptos signals, persisted to
//! browser local storage.

use leptos::*;

/// Local storage key for the raw access token.
const TOKEN_KEY: &str = "token";
/// Local storage key for the JSON-serialized cached user.
const CURRENT_USER_KEY: &str = "currentUser";

/// Banner lifetime in milliseconds.
const BANNER_TIMEOUT_MS: u32 = 3_000;

/// A user record as returned by the backend. The logged-in user's copy is
/// cached here and in local storage, and re-fetched after any action that can
/// change the coin balance.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub coins: i64,
}

/// Pages reachable once a session exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Friends,
    Profile,
    Prizes,
    Chat,
}

/// The friend a chat thread is currently open with. Kept when leaving the
/// chat page so returning redisplays the same conversation.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatPeer {
    pub id: i64,
    pub username: String,
}

/// Global session state provided to all components
#[derive(Clone)]
pub struct SessionState {
    /// Bearer token sent with every authenticated request
    pub token: RwSignal<Option<String>>,
    /// Cached copy of the logged-in user
    pub current_user: RwSignal<Option<User>>,
    /// Currently shown page
    pub page: RwSignal<Page>,
    /// Peer of the open chat thread, at most one
    pub active_chat: RwSignal<Option<ChatPeer>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for the banner)
    pub success: RwSignal<Option<String>>,
}

/// Provide session state to the component tree, restoring any stored session.
pub fn provide_session_state() {
    let (token, user) = load_session();

    let state = SessionState {
        token: create_rw_signal(token),
        current_user: create_rw_signal(user),
        page: create_rw_signal(Page::Friends),
        active_chat: create_rw_signal(None),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

/// Read the persisted session. A token without its user (or the reverse) is
/// useless, so partial state is treated as logged out.
fn load_session() -> (Option<String>, Option<User>) {
    let Some(storage) = local_storage() else {
        return (None, None);
    };

    let token = storage.get_item(TOKEN_KEY).ok().flatten();
    let user = storage
        .get_item(CURRENT_USER_KEY)
        .ok()
        .flatten()
        .and_then(|json| serde_json::from_str(&json).ok());

    match (token, user) {
        (Some(token), Some(user)) => (Some(token), Some(user)),
        _ => (None, None),
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl SessionState {
    /// Store a fresh token + user pair and land on the friends page.
    pub fn establish(&self, token: String, user: User) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(TOKEN_KEY, &token);
            if let Ok(json) = serde_json::to_string(&user) {
                let _ = storage.set_item(CURRENT_USER_KEY, &json);
            }
        }

        self.token.set(Some(token));
        self.current_user.set(Some(user));
        self.page.set(Page::Friends);
    }

    /// Clear the session. Pure local state change, no network call.
    pub fn logout(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
            let _ = storage.remove_item(CURRENT_USER_KEY);
        }

        self.token.set(None);
        self.current_user.set(None);
        self.active_chat.set(None);
        self.page.set(Page::Friends);
    }

    /// Replace the cached user and persist it.
    pub fn set_user(&self, user: User) {
        if let Some(storage) = local_storage() {
            if let Ok(json) = serde_json::to_string(&user) {
                let _ = storage.set_item(CURRENT_USER_KEY, &json);
            }
        }

        self.current_user.set(Some(user));
    }

    /// Invalidate-and-refetch: reload the user after any action that may have
    /// changed the coin balance. Failures only go to the console; the stale
    /// cache stays usable.
    pub async fn refresh_user(&self) {
        let Some(token) = self.token.get_untracked() else {
            return;
        };

        match crate::api::current_user(&token).await {
            Ok(user) => self.set_user(user),
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to refresh user: {}", e).into());
            }
        }
    }

    /// Open a chat thread with a friend.
    pub fn open_chat(&self, peer: ChatPeer) {
        self.active_chat.set(Some(peer));
        self.page.set(Page::Chat);
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(BANNER_TIMEOUT_MS, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout). A newer message
    /// simply overwrites an older one, no queueing.
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(BANNER_TIMEOUT_MS, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_user_roundtrips_through_json() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            coins: 5,
        };

        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn user_tolerates_extra_backend_fields() {
        let json = r#"{"id":2,"username":"bob","email":"bob@example.com","coins":0,"created_at":"2024-01-01T00:00:00"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.username, "bob");
        assert_eq!(user.coins, 0);
    }
}
