//! Web server module for the form front end.
//!
//! Serves the message form, validates submissions, and hands valid ones to
//! the [`Notifier`](crate::notify::Notifier). Handlers stay thin: validate,
//! delegate once, translate the outcome into a status code.

pub mod handlers;

pub use handlers::{
    build_router, health, index, send_message, AppState, HealthResponse, IndexTemplate, SendForm,
};
