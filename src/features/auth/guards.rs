use crate::{features::auth::session::SessionContext, routes::Route};
use tracing::debug;

/// Result of checking a protected route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render(Route),
    Redirect(Route),
}

/// Admits `target` when the session flag is set, otherwise redirects to login.
#[must_use]
pub fn require_auth(session: &SessionContext, target: Route) -> GuardDecision {
    if session.is_authenticated() {
        GuardDecision::Render(target)
    } else {
        // UX-only guard; real access control must live on the API.
        debug!(route = target.path(), "not signed in, redirecting to login");
        GuardDecision::Redirect(Route::Login)
    }
}
