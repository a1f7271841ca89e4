//! Domain logic for the lock-bridge control panel.
//!
//! Everything here is pure: the only I/O boundary is the [`bridge::LockBridge`]
//! trait, implemented over HTTP by `latchkey-bridge` and by in-memory fakes in
//! tests.

pub mod action;
pub mod battery;
pub mod bridge;
pub mod credentials;
pub mod dispatch;
pub mod error;
pub mod i18n;
pub mod lock_state;
pub mod normalizer;
pub mod timestamp;
pub mod types;
