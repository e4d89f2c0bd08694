//! UI Components
//!
//! Reusable Leptos components shared across pages.

pub mod loading;
pub mod nav;
pub mod toast;

pub use loading::Loading;
pub use nav::Nav;
pub use toast::Toast;
