//! Outbound notification module.
//!
//! Owns the single POST to the push-notification API: request construction,
//! the bearer/form-encoding header contract, and response interpretation.

pub mod client;

pub use client::{Notifier, NotifyError};
