//! Shared utilities for API access, configuration, errors and timers.
//!
//! ## Core Authentication Flows
//!
//! ### Login
//!
//! 1. **Validate:** identifier and password must both be present.
//! 2. **Authenticate:** POST `{ logins: [{ username, password }] }` to `/login`.
//! 3. **Persist:** on success the `isAuthenticated` flag is written and the page
//!    navigates to `/home` after a short delay.
//!
//! ### Sign-up
//!
//! 1. **Validate:** username, email format, password length and confirmation.
//! 2. **Register:** POST `{ users: [{ user_id: "0", ..., action: "1" }] }` to `/users`.
//! 3. **Reset:** the form clears and the page navigates back to `/login`.
//!
//! ### Password recovery
//!
//! 1. **Lookup:** POST `{ users: [{ email }] }` to `/one_users_email`.
//! 2. **Send:** only for an active user, POST the same body to `/send_recovery_email`.
//!
//! Centralizing these helpers keeps network behavior consistent and avoids duplicated
//! logic in routes and features. Callers must still avoid logging passwords.

pub mod api;
pub mod config;
pub mod errors;
pub mod schedule;

pub use api::ApiClient;
pub use config::{AppConfig, ConfigOverrides};
pub use errors::AppError;
pub use schedule::ScheduledTask;
