//! Login page controller. Validates locally, authenticates against the
//! backend, persists the session flag and moves to `/home` after the success
//! toast has been on screen for a moment.

use super::{
    form::{FormPhase, FormState, SubmitLabels, SubmitOutcome},
    Navigator, Route,
};
use crate::{
    app_lib::ScheduledTask,
    components::{Severity, ToastState, Toaster},
    features::auth::{
        types::AuthResult, validation::validate_login, AuthBackend, SessionContext,
    },
};
use secrecy::SecretString;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info, instrument};

pub const TOAST_DURATION: Duration = Duration::from_millis(3000);
/// Time the success toast stays up before moving to `/home`.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

pub const SUCCESS_MESSAGE: &str = "Signed in successfully!";
pub const FAILURE_MESSAGE: &str = "Sign-in failed";
pub const SESSION_SAVE_FAILED_MESSAGE: &str = "Signed in, but the session could not be saved";

pub const SUBMIT_LABELS: SubmitLabels = SubmitLabels {
    idle: "Sign in",
    busy: "Signing in...",
};

pub struct LoginPage<B> {
    backend: B,
    session: SessionContext,
    navigator: Navigator,
    identifier: String,
    password: SecretString,
    show_password: bool,
    form: FormState,
    toaster: Toaster,
    redirect: Option<ScheduledTask>,
}

impl<B: AuthBackend> LoginPage<B> {
    #[must_use]
    pub fn new(backend: B, session: SessionContext, navigator: Navigator) -> Self {
        Self {
            backend,
            session,
            navigator,
            identifier: String::new(),
            password: SecretString::default(),
            show_password: false,
            form: FormState::default(),
            toaster: Toaster::new(TOAST_DURATION),
            redirect: None,
        }
    }

    pub fn set_identifier(&mut self, identifier: impl Into<String>) {
        self.identifier = identifier.into();
    }

    pub fn set_password(&mut self, password: SecretString) {
        self.password = password;
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn password(&self) -> &SecretString {
        &self.password
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    #[must_use]
    pub fn password_visible(&self) -> bool {
        self.show_password
    }

    #[must_use]
    pub fn phase(&self) -> FormPhase {
        self.form.phase()
    }

    /// Phase changes, including `Submitting` while [`LoginPage::submit`] is pending.
    #[must_use]
    pub fn phase_updates(&self) -> watch::Receiver<FormPhase> {
        self.form.subscribe()
    }

    #[must_use]
    pub fn is_submit_enabled(&self) -> bool {
        !self.form.is_submitting()
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        SUBMIT_LABELS.for_phase(self.form.phase())
    }

    #[must_use]
    pub fn toast(&self) -> ToastState {
        self.toaster.current()
    }

    pub fn go_to_signup(&self) {
        self.navigator.navigate(Route::SignUp);
    }

    pub fn go_to_forgot_password(&self) {
        self.navigator.navigate(Route::ForgotPassword);
    }

    /// Runs one submission to completion. Fields are never cleared here.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.form.begin_validation();
        if let Err(err) = validate_login(&self.identifier, &self.password) {
            self.form.reject();
            self.toaster.show(err.to_string(), Severity::Warning);
            return SubmitOutcome::Invalid(err);
        }

        let identifier = self.identifier.trim().to_string();
        let pending = self.form.begin_submit();
        let result = self.backend.authenticate(&identifier, &self.password).await;

        let result = match result {
            AuthResult::Success { message } => {
                if let Err(err) = self.session.mark_authenticated() {
                    error!("Failed to persist session flag: {err}");
                    pending.finish(false);
                    self.toaster
                        .show(SESSION_SAVE_FAILED_MESSAGE, Severity::Danger);
                    return SubmitOutcome::Completed(AuthResult::ServerError(
                        SESSION_SAVE_FAILED_MESSAGE.to_string(),
                    ));
                }
                pending.finish(true);
                info!("login succeeded");
                self.toaster.show(
                    message.clone().unwrap_or_else(|| SUCCESS_MESSAGE.to_string()),
                    Severity::Success,
                );
                self.redirect = Some(self.navigator.navigate_after(REDIRECT_DELAY, Route::Home));
                AuthResult::Success { message }
            }
            failure => {
                pending.finish(false);
                info!("login failed");
                self.toaster.show(
                    failure.message().unwrap_or(FAILURE_MESSAGE).to_string(),
                    Severity::Danger,
                );
                failure
            }
        };

        SubmitOutcome::Completed(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        features::auth::{validation::FieldError, AuthResult},
        routes::{resolve, testing::FakeBackend, NavigationEvents, Resolution},
    };
    use secrecy::ExposeSecret;

    fn page(backend: FakeBackend) -> (LoginPage<FakeBackend>, SessionContext, NavigationEvents) {
        let session = SessionContext::in_memory();
        let (navigator, events) = Navigator::channel();
        let page = LoginPage::new(backend, session.clone(), navigator);
        (page, session, events)
    }

    fn fill(page: &mut LoginPage<FakeBackend>, identifier: &str, password: &str) {
        page.set_identifier(identifier);
        page.set_password(SecretString::from(password.to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_fields_warn_without_network() {
        let backend = FakeBackend::answering(AuthResult::success());
        let (mut page, session, _events) = page(backend.clone());
        fill(&mut page, "ana", "");

        let outcome = page.submit().await;

        assert_eq!(outcome, SubmitOutcome::Invalid(FieldError::MissingFields));
        assert_eq!(backend.calls(), 0);
        assert_eq!(page.phase(), FormPhase::Idle);
        let toast = page.toast();
        assert!(toast.visible);
        assert_eq!(toast.severity, Severity::Warning);
        assert_eq!(toast.message, "Please fill in all fields");
        assert!(!session.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn success_sets_flag_and_navigates_home_after_delay() {
        let backend = FakeBackend::answering(AuthResult::Success {
            message: Some("Welcome back".to_string()),
        });
        let (mut page, session, mut events) = page(backend.clone());
        fill(&mut page, " ana@example.com ", "secret1");

        let outcome = page.submit().await;

        assert!(outcome.is_success());
        assert_eq!(backend.last_request(), vec!["ana@example.com", "secret1"]);
        assert_eq!(page.phase(), FormPhase::Succeeded);
        assert!(session.is_authenticated());
        let toast = page.toast();
        assert_eq!(toast.severity, Severity::Success);
        assert_eq!(toast.message, "Welcome back");

        tokio::time::sleep(REDIRECT_DELAY - Duration::from_millis(1)).await;
        assert!(events.try_recv().is_err());
        assert_eq!(events.recv().await, Some(Route::Home));
        assert_eq!(resolve("/home", &session), Resolution::Render(Route::Home));
    }

    #[tokio::test(start_paused = true)]
    async fn success_without_message_uses_default_toast() {
        let backend = FakeBackend::answering(AuthResult::success());
        let (mut page, _session, _events) = page(backend);
        fill(&mut page, "ana", "secret1");

        page.submit().await;
        assert_eq!(page.toast().message, SUCCESS_MESSAGE);
    }

    #[tokio::test(start_paused = true)]
    async fn rejection_shows_danger_and_keeps_fields() {
        let backend =
            FakeBackend::answering(AuthResult::InvalidCredentials("bad credentials".to_string()));
        let (mut page, session, mut events) = page(backend);
        fill(&mut page, "user", "wrongpass");

        let outcome = page.submit().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Completed(AuthResult::InvalidCredentials(
                "bad credentials".to_string()
            ))
        );
        assert_eq!(page.phase(), FormPhase::Failed);
        assert!(page.is_submit_enabled());
        assert_eq!(page.identifier(), "user");
        assert_eq!(page.password().expose_secret(), "wrongpass");
        let toast = page.toast();
        assert_eq!(toast.severity, Severity::Danger);
        assert_eq!(toast.message, "bad credentials");
        assert!(!session.is_authenticated());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn network_error_uses_connection_message() {
        let backend = FakeBackend::answering(AuthResult::NetworkError);
        let (mut page, _session, _events) = page(backend);
        fill(&mut page, "user", "pw");

        page.submit().await;
        assert_eq!(page.toast().message, "Unable to connect to the server");
        assert_eq!(page.toast().severity, Severity::Danger);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_submission_re_enables_submit() {
        let backend = FakeBackend::hanging();
        let (mut page, _session, _events) = page(backend.clone());
        fill(&mut page, "user", "pw");

        let timed_out = tokio::time::timeout(Duration::from_secs(30), page.submit()).await;

        assert!(timed_out.is_err());
        assert_eq!(backend.calls(), 1);
        assert_eq!(page.phase(), FormPhase::Idle);
        assert!(page.is_submit_enabled());
        assert_eq!(page.submit_label(), "Sign in");
    }

    #[tokio::test(start_paused = true)]
    async fn pending_submission_disables_submit() {
        let backend = FakeBackend::hanging();
        let (mut page, _session, _events) = page(backend.clone());
        fill(&mut page, "user", "pw");
        let mut phases = page.phase_updates();

        {
            let submit = page.submit();
            tokio::pin!(submit);
            tokio::select! {
                _ = &mut submit => panic!("hanging backend resolved"),
                seen = phases.wait_for(|phase| phase.is_submitting()) => {
                    assert!(seen.is_ok());
                }
            }
            assert_eq!(SUBMIT_LABELS.for_phase(*phases.borrow()), "Signing in...");
            assert_eq!(backend.calls(), 1);
        }

        assert_eq!(*phases.borrow_and_update(), FormPhase::Idle);
        assert!(page.is_submit_enabled());
        assert_eq!(page.submit_label(), "Sign in");
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_the_page_cancels_pending_redirect() {
        let backend = FakeBackend::answering(AuthResult::success());
        let (mut page, _session, mut events) = page(backend);
        fill(&mut page, "ana", "secret1");

        page.submit().await;
        drop(page);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn links_navigate_immediately() {
        let (page, _session, mut events) = page(FakeBackend::answering(AuthResult::success()));
        page.go_to_signup();
        page.go_to_forgot_password();
        assert_eq!(events.recv().await, Some(Route::SignUp));
        assert_eq!(events.recv().await, Some(Route::ForgotPassword));
    }

    #[test]
    fn password_visibility_toggles() {
        let (navigator, _events) = Navigator::channel();
        let mut page = LoginPage::new(
            FakeBackend::answering(AuthResult::success()),
            SessionContext::in_memory(),
            navigator,
        );
        assert!(!page.password_visible());
        page.toggle_password_visibility();
        assert!(page.password_visible());
    }
}
