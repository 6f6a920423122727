//! # authflow
//!
//! Client-side authentication flow: login, sign-up and password recovery
//! against a remote JSON backend, with a persisted session flag gating the
//! protected `/home` route.
//!
//! ## Layout
//!
//! - **`app_lib`**: HTTP helpers, configuration, errors and cancellable timers.
//! - **`features::auth`**: wire types, validation, the backend client, the
//!   session context and the route guard.
//! - **`components`**: toast notifications shown by the pages.
//! - **`routes`**: the route table and one form controller per page.
//! - **`cli`**: the `authflow` terminal shell driving the pages.
//!
//! ## Page lifecycle
//!
//! Every page follows `Idle → Validating → Submitting → (Succeeded | Failed)`.
//! Validation failures never reach the network; every submission ends in
//! exactly one toast; the submit control is re-enabled on every path.
//!
//! The route guard is a UX-only gate: the backend must enforce its own
//! authorization.

#[path = "lib/mod.rs"]
pub mod app_lib;
pub mod cli;
pub mod components;
pub mod features;
pub mod routes;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
