//! State Management
//!
//! Global session and navigation state shared across pages.

pub mod session;

pub use session::{provide_session_state, ChatPeer, Page, SessionState, User};
