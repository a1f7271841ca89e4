//! HTTP client for the lock bridge API.
//!
//! [`client::BridgeClient`] implements [`latchkey_core::bridge::LockBridge`]
//! over the bridge's `lockState` and `lockAction` endpoints using [`reqwest`].

pub mod client;

pub use client::{BridgeClient, BridgeTimeouts};
