//! Auth feature module covering the backend client, local validation, the
//! persisted session flag and the route guard. It keeps authentication logic
//! out of the page controllers and must stay aligned with the backend's
//! payload contract. This module handles passwords and must not log them.
//!
//! Flow Overview: Login posts credentials and, on success, persists the
//! session flag. Sign-up posts a create-user row. Password recovery looks the
//! email up and only sends the recovery email to an active account.

pub mod client;
mod guards;
pub mod session;
pub mod types;
pub mod validation;

pub use client::{AuthBackend, HttpAuthClient};
pub use guards::{require_auth, GuardDecision};
pub use session::{FileSessionStore, MemorySessionStore, SessionContext, SessionStore};
pub use types::{AuthResult, FailureKind};
