//! Route table, path resolution and navigation for the auth pages.
//!
//! `/login`, `/signup` and `/forgot-password` are public, `/home` is guarded
//! by the session flag and `/` redirects to `/login`.

mod form;
pub mod forgot_password;
pub mod login;
pub mod signup;
#[cfg(test)]
mod testing;

pub use form::{FormPhase, SubmitLabels, SubmitOutcome};
pub use forgot_password::{ForgotPasswordPage, ForgotPasswordView};
pub use login::LoginPage;
pub use signup::SignUpPage;

use crate::{
    app_lib::ScheduledTask,
    features::auth::{require_auth, GuardDecision, SessionContext},
};
use std::{fmt, time::Duration};
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    SignUp,
    ForgotPassword,
    Home,
    NotFound,
}

impl Route {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::SignUp => "/signup",
            Self::ForgotPassword => "/forgot-password",
            Self::Home => "/home",
            Self::NotFound => "/404",
        }
    }

    #[must_use]
    pub const fn is_protected(self) -> bool {
        matches!(self, Self::Home)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// What the router does with a requested path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(Route),
}

impl Resolution {
    /// Route that ends up on screen.
    #[must_use]
    pub const fn route(self) -> Route {
        match self {
            Self::Render(route) | Self::Redirect(route) => route,
        }
    }
}

/// Resolves a path through the route table, applying the default redirect and the guard.
#[must_use]
pub fn resolve(path: &str, session: &SessionContext) -> Resolution {
    let path = normalize_path(path);
    let route = match path.as_str() {
        "/" => return Resolution::Redirect(Route::Login),
        "/login" => Route::Login,
        "/signup" => Route::SignUp,
        "/forgot-password" => Route::ForgotPassword,
        "/home" => Route::Home,
        _ => Route::NotFound,
    };

    if !route.is_protected() {
        return Resolution::Render(route);
    }

    match require_auth(session, route) {
        GuardDecision::Render(route) => Resolution::Render(route),
        GuardDecision::Redirect(route) => Resolution::Redirect(route),
    }
}

fn normalize_path(path: &str) -> String {
    let path = path
        .trim()
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Sends navigation requests from pages to whoever owns the screen.
#[derive(Clone, Debug)]
pub struct Navigator {
    tx: mpsc::UnboundedSender<Route>,
}

/// Receiving side of a [`Navigator`].
pub type NavigationEvents = mpsc::UnboundedReceiver<Route>;

impl Navigator {
    #[must_use]
    pub fn channel() -> (Self, NavigationEvents) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Navigates immediately.
    pub fn navigate(&self, route: Route) {
        debug!(route = route.path(), "navigate");
        // a closed receiver means the shell is gone; nothing left to show
        let _ = self.tx.send(route);
    }

    /// Navigates once `delay` has elapsed, unless the returned task is dropped first.
    #[must_use]
    pub fn navigate_after(&self, delay: Duration, route: Route) -> ScheduledTask {
        let navigator = self.clone();
        ScheduledTask::after(delay, move || navigator.navigate(route))
    }
}
