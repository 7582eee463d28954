//! notify-relay - Web form front end for push notifications.
//!
//! Serves a single HTML form and relays each submitted message to the
//! LINE Notify API as one bearer-authenticated form POST.
//!
//! ## Architecture
//!
//! ```text
//! Browser → Form Intake Handler → Notifier → LINE Notify API
//! ```

pub mod config;
pub mod notify;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use notify::{Notifier, NotifyError};
pub use web::{build_router, AppState};
