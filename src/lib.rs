//! Client-side credential recovery and session management for the storefront
//! mobile app, talking to a local JSON-backed mock Identity Store.
//!
//! The crate is a library consumed by a UI shell; it implements the OTP-based
//! password reset flow (request → verify → reset with 5-minute expiry), the
//! session lifecycle (sign-in, sign-up, sign-out, bootstrap from durable
//! storage), and the simulated out-of-band OTP delivery channel.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;

pub use config::AppConfig;
pub use errors::{AuthError, Result};
pub use models::{Outcome, SessionStatus, User};
pub use state::AppState;

#[cfg(test)]
mod test_support;
