//! HTTP API Client
//!
//! Access layer for the CoinChat REST backend.

pub mod client;

pub use client::*;
