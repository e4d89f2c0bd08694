//! HTTP API Client
//!
//! One async function per backend endpoint. Authenticated calls send the
//! bearer token; every non-2xx response surfaces the backend's `detail`
//! message, or a generic fallback when the body carries none.

use gloo_net::http::{Request, Response};

use crate::state::session::User;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Get the API base URL from local storage or use default, with any trailing
/// slash normalized away.
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item("coinchat_api_url").ok().flatten());

    stored
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
        .trim_end_matches('/')
        .to_string()
}

// ============ Wire Types ============

#[derive(Debug, Clone, serde::Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// The stored friend link created by `POST /friends`. The friends *list*
/// endpoint returns full `User` records instead.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Friendship {
    pub id: i64,
    pub user_id: i64,
    pub friend_id: i64,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Prize {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub cost: i64,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct CoinRecord {
    pub id: i64,
    pub user_id: i64,
    /// Signed: positive for earnings, negative for redemptions.
    pub amount: i64,
    pub reason: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CoinBalance {
    pub coins: i64,
}

#[derive(Debug, serde::Deserialize)]
struct ApiError {
    detail: String,
}

/// Extract the backend's `detail` message from a non-2xx response.
async fn error_detail(response: Response, fallback: &str) -> String {
    response
        .json::<ApiError>()
        .await
        .map(|e| e.detail)
        .unwrap_or_else(|_| fallback.to_string())
}

/// Send an authenticated GET and parse the JSON body.
async fn authorized_get<T: serde::de::DeserializeOwned>(
    path: &str,
    token: &str,
    fallback: &str,
) -> Result<T, String> {
    let response = Request::get(&format!("{}{}", get_api_base(), path))
        .header("Authorization", &format!("Bearer {}", token))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_detail(response, fallback).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Build the form-encoded body for the token request.
fn token_request_body(username: &str, password: &str) -> String {
    format!(
        "username={}&password={}",
        urlencoding::encode(username),
        urlencoding::encode(password)
    )
}

// ============ API Functions ============

/// Register a new account. No session side effect.
pub async fn register(username: &str, email: &str, password: &str) -> Result<User, String> {
    #[derive(serde::Serialize)]
    struct RegisterRequest {
        username: String,
        email: String,
        password: String,
    }

    let response = Request::post(&format!("{}/register", get_api_base()))
        .json(&RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_detail(response, "Registration failed").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Exchange credentials for an access token, then fetch the user it belongs
/// to. A failed exchange yields no token at all, so a token can never exist
/// without its cached user.
pub async fn login(username: &str, password: &str) -> Result<(String, User), String> {
    let response = Request::post(&format!("{}/token", get_api_base()))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(token_request_body(username, password))
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_detail(response, "Login failed").await);
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    let user = current_user(&token.access_token).await?;
    Ok((token.access_token, user))
}

/// Fetch the authenticated user.
pub async fn current_user(token: &str) -> Result<User, String> {
    authorized_get("/users/me", token, "Failed to fetch user").await
}

/// Look up a user by username. `Ok(None)` when no such user exists.
pub async fn user_by_username(token: &str, username: &str) -> Result<Option<User>, String> {
    let response = Request::get(&format!(
        "{}/users/username/{}",
        get_api_base(),
        urlencoding::encode(username)
    ))
    .header("Authorization", &format!("Bearer {}", token))
    .send()
    .await
    .map_err(|e| format!("Network error: {}", e))?;

    if response.status() == 404 {
        return Ok(None);
    }
    if !response.ok() {
        return Err(error_detail(response, "Lookup failed").await);
    }

    response
        .json()
        .await
        .map(Some)
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch the friends list as full user records.
pub async fn friends(token: &str) -> Result<Vec<User>, String> {
    authorized_get("/friends", token, "Failed to load friends").await
}

/// Link two users as friends.
pub async fn add_friend(token: &str, user_id: i64, friend_id: i64) -> Result<Friendship, String> {
    #[derive(serde::Serialize)]
    struct AddFriendRequest {
        user_id: i64,
        friend_id: i64,
    }

    let response = Request::post(&format!("{}/friends", get_api_base()))
        .header("Authorization", &format!("Bearer {}", token))
        .json(&AddFriendRequest { user_id, friend_id })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_detail(response, "Failed to add friend").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Remove a friend link.
pub async fn delete_friend(token: &str, friend_id: i64) -> Result<(), String> {
    let response = Request::delete(&format!("{}/friends/{}", get_api_base(), friend_id))
        .header("Authorization", &format!("Bearer {}", token))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_detail(response, "Failed to remove friend").await);
    }

    Ok(())
}

/// Send a message to a friend. The backend credits the sender one coin.
pub async fn send_message(
    token: &str,
    sender_id: i64,
    receiver_id: i64,
    content: &str,
) -> Result<Message, String> {
    #[derive(serde::Serialize)]
    struct SendMessageRequest {
        sender_id: i64,
        receiver_id: i64,
        content: String,
    }

    let response = Request::post(&format!("{}/messages", get_api_base()))
        .header("Authorization", &format!("Bearer {}", token))
        .json(&SendMessageRequest {
            sender_id,
            receiver_id,
            content: content.to_string(),
        })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_detail(response, "Failed to send message").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch the full thread with a friend, oldest first. No pagination.
pub async fn messages(token: &str, friend_id: i64) -> Result<Vec<Message>, String> {
    authorized_get(
        &format!("/messages/{}", friend_id),
        token,
        "Failed to load messages",
    )
    .await
}

/// Fetch the current coin balance.
pub async fn coins(token: &str) -> Result<CoinBalance, String> {
    authorized_get("/coins", token, "Failed to load coin balance").await
}

/// Fetch the coin audit log, newest first.
pub async fn coin_records(token: &str) -> Result<Vec<CoinRecord>, String> {
    authorized_get("/coin-records", token, "Failed to load coin records").await
}

/// Fetch the prize catalog.
pub async fn prizes(token: &str) -> Result<Vec<Prize>, String> {
    authorized_get("/prizes", token, "Failed to load prizes").await
}

/// Redeem a prize. The backend debits the coins and appends a coin record.
pub async fn redeem_prize(token: &str, prize_id: i64) -> Result<(), String> {
    let response = Request::post(&format!("{}/prizes/{}/redeem", get_api_base(), prize_id))
        .header("Authorization", &format!("Bearer {}", token))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_detail(response, "Redemption failed").await);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_request_body_is_form_encoded() {
        assert_eq!(
            token_request_body("alice", "p w&1"),
            "username=alice&password=p%20w%261"
        );
    }

    #[test]
    fn user_parses_backend_shape() {
        let json = r#"{"id":1,"username":"alice","email":"alice@example.com","coins":12,"created_at":"2024-05-01T09:30:00"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.coins, 12);
    }

    #[test]
    fn message_parses_naive_timestamp() {
        let json = r#"{"id":7,"sender_id":1,"receiver_id":2,"content":"hi","created_at":"2024-05-01T09:30:00"}"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.content, "hi");
        assert_eq!(
            message.created_at.format("%H:%M:%S").to_string(),
            "09:30:00"
        );
    }

    #[test]
    fn prize_tolerates_missing_description_and_image() {
        let json = r#"{"id":3,"name":"Mug","description":null,"cost":50,"image_url":null,"available":true}"#;
        let prize: Prize = serde_json::from_str(json).unwrap();
        assert_eq!(prize.description, None);
        assert_eq!(prize.image_url, None);
        assert_eq!(prize.cost, 50);
    }

    #[test]
    fn coin_record_keeps_signed_amount() {
        let json = r#"{"id":9,"user_id":1,"amount":-30,"reason":"Prize redeemed: Mug","created_at":"2024-05-01T10:00:00"}"#;
        let record: CoinRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.amount, -30);
    }

    #[test]
    fn coin_balance_parses() {
        let json = r#"{"coins":42}"#;
        let balance: CoinBalance = serde_json::from_str(json).unwrap();
        assert_eq!(balance.coins, 42);
    }

    #[test]
    fn token_response_parses() {
        let json = r#"{"access_token":"abc.def","token_type":"bearer"}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "abc.def");
        assert_eq!(token.token_type, "bearer");
    }

    #[test]
    fn friendship_parses_backend_shape() {
        let json = r#"{"id":4,"user_id":1,"friend_id":2,"created_at":"2024-05-01T09:00:00"}"#;
        let friendship: Friendship = serde_json::from_str(json).unwrap();
        assert_eq!(friendship.user_id, 1);
        assert_eq!(friendship.friend_id, 2);
    }
}
