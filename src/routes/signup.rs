//! Sign-up page controller.

use super::{
    form::{FormPhase, FormState, SubmitLabels, SubmitOutcome},
    Navigator, Route,
};
use crate::{
    app_lib::ScheduledTask,
    components::{Severity, ToastState, Toaster},
    features::auth::{
        validation::{validate_registration, RegistrationForm},
        AuthBackend,
    },
};
use secrecy::SecretString;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, instrument};

pub const TOAST_DURATION: Duration = Duration::from_millis(3000);
/// Delay before the login page replaces the sign-up page.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

pub const SUCCESS_MESSAGE: &str = "Account created! Welcome aboard";
pub const FAILURE_MESSAGE: &str = "Could not create the account";

pub const SUBMIT_LABELS: SubmitLabels = SubmitLabels {
    idle: "Create account",
    busy: "Creating account...",
};

pub struct SignUpPage<B> {
    backend: B,
    navigator: Navigator,
    fields: RegistrationForm,
    show_password: bool,
    show_confirm_password: bool,
    form: FormState,
    toaster: Toaster,
    redirect: Option<ScheduledTask>,
}

impl<B: AuthBackend> SignUpPage<B> {
    #[must_use]
    pub fn new(backend: B, navigator: Navigator) -> Self {
        Self {
            backend,
            navigator,
            fields: RegistrationForm::default(),
            show_password: false,
            show_confirm_password: false,
            form: FormState::default(),
            toaster: Toaster::new(TOAST_DURATION),
            redirect: None,
        }
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.fields.username = username.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.fields.email = email.into();
    }

    pub fn set_password(&mut self, password: SecretString) {
        self.fields.password = password;
    }

    pub fn set_confirm_password(&mut self, confirm_password: SecretString) {
        self.fields.confirm_password = confirm_password;
    }

    #[must_use]
    pub fn fields(&self) -> &RegistrationForm {
        &self.fields
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn toggle_confirm_password_visibility(&mut self) {
        self.show_confirm_password = !self.show_confirm_password;
    }

    #[must_use]
    pub fn password_visible(&self) -> bool {
        self.show_password
    }

    #[must_use]
    pub fn confirm_password_visible(&self) -> bool {
        self.show_confirm_password
    }

    #[must_use]
    pub fn phase(&self) -> FormPhase {
        self.form.phase()
    }

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

    pub fn go_to_login(&self) {
        self.navigator.navigate(Route::Login);
    }

    /// On success every field is cleared and the login page follows after [`REDIRECT_DELAY`].
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.form.begin_validation();
        if let Err(err) = validate_registration(&self.fields) {
            self.form.reject();
            self.toaster.show(err.to_string(), Severity::Warning);
            return SubmitOutcome::Invalid(err);
        }

        let username = self.fields.username.trim().to_string();
        let email = self.fields.email.trim().to_string();
        let pending = self.form.begin_submit();
        let result = self
            .backend
            .register(&username, &email, &self.fields.password)
            .await;
        pending.finish(result.is_success());

        if result.is_success() {
            info!("account created");
            self.fields = RegistrationForm::default();
            self.show_password = false;
            self.show_confirm_password = false;
            self.toaster.show(SUCCESS_MESSAGE, Severity::Success);
            self.redirect = Some(self.navigator.navigate_after(REDIRECT_DELAY, Route::Login));
        } else {
            info!("account creation failed");
            self.toaster.show(
                result.message().unwrap_or(FAILURE_MESSAGE).to_string(),
                Severity::Danger,
            );
        }

        SubmitOutcome::Completed(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        features::auth::{validation::FieldError, AuthResult},
        routes::{testing::FakeBackend, NavigationEvents},
    };
    use secrecy::ExposeSecret;

    fn page(backend: FakeBackend) -> (SignUpPage<FakeBackend>, NavigationEvents) {
        let (navigator, events) = Navigator::channel();
        (SignUpPage::new(backend, navigator), events)
    }

    fn fill(page: &mut SignUpPage<FakeBackend>, password: &str, confirm: &str) {
        page.set_username("ana");
        page.set_email(" ana@example.com ");
        page.set_password(SecretString::from(password.to_string()));
        page.set_confirm_password(SecretString::from(confirm.to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn mismatch_is_rejected_before_any_call() {
        let backend = FakeBackend::answering(AuthResult::success());
        let (mut page, _events) = page(backend.clone());
        fill(&mut page, "secret1", "secret2");

        let outcome = page.submit().await;

        assert_eq!(outcome, SubmitOutcome::Invalid(FieldError::PasswordMismatch));
        assert_eq!(backend.calls(), 0);
        assert_eq!(page.phase(), FormPhase::Idle);
        let toast = page.toast();
        assert_eq!(toast.severity, Severity::Warning);
        assert_eq!(toast.message, "Passwords do not match");
    }

    #[tokio::test(start_paused = true)]
    async fn short_password_is_rejected() {
        let backend = FakeBackend::answering(AuthResult::success());
        let (mut page, _events) = page(backend.clone());
        fill(&mut page, "abc", "abc");

        let outcome = page.submit().await;

        assert_eq!(outcome, SubmitOutcome::Invalid(FieldError::PasswordTooShort));
        assert_eq!(backend.calls(), 0);
        assert_eq!(page.toast().message, "Password must be at least 6 characters");
    }

    #[tokio::test(start_paused = true)]
    async fn created_account_clears_fields_and_goes_to_login() {
        let backend = FakeBackend::answering(AuthResult::success());
        let (mut page, mut events) = page(backend.clone());
        fill(&mut page, "secret1", "secret1");
        page.toggle_password_visibility();

        let outcome = page.submit().await;

        assert!(outcome.is_success());
        assert_eq!(
            backend.last_request(),
            vec!["ana", "ana@example.com", "secret1"]
        );
        assert_eq!(page.phase(), FormPhase::Succeeded);
        assert!(page.fields().username.is_empty());
        assert!(page.fields().email.is_empty());
        assert!(page.fields().password.expose_secret().is_empty());
        assert!(page.fields().confirm_password.expose_secret().is_empty());
        assert!(!page.password_visible());
        assert_eq!(page.toast().message, SUCCESS_MESSAGE);
        assert_eq!(page.toast().severity, Severity::Success);

        tokio::time::sleep(Duration::from_millis(1400)).await;
        assert!(events.try_recv().is_err());
        assert_eq!(events.recv().await, Some(Route::Login));
    }

    #[tokio::test(start_paused = true)]
    async fn server_message_is_shown_and_fields_kept() {
        let backend = FakeBackend::answering(AuthResult::ServerError(
            "duplicate key value".to_string(),
        ));
        let (mut page, mut events) = page(backend);
        fill(&mut page, "secret1", "secret1");

        let outcome = page.submit().await;

        assert!(!outcome.is_success());
        assert_eq!(page.phase(), FormPhase::Failed);
        assert_eq!(page.toast().message, "duplicate key value");
        assert_eq!(page.toast().severity, Severity::Danger);
        assert_eq!(page.fields().username, "ana");
        assert_eq!(page.fields().password.expose_secret(), "secret1");
        assert!(page.is_submit_enabled());

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn toast_hides_after_three_seconds() {
        let backend = FakeBackend::answering(AuthResult::NetworkError);
        let (mut page, _events) = page(backend);
        fill(&mut page, "secret1", "secret1");

        page.submit().await;
        assert!(page.toast().visible);

        tokio::time::sleep(TOAST_DURATION + Duration::from_millis(10)).await;
        assert!(!page.toast().visible);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_submission_re_enables_submit() {
        let backend = FakeBackend::hanging();
        let (mut page, _events) = page(backend);
        fill(&mut page, "secret1", "secret1");

        let timed_out = tokio::time::timeout(Duration::from_secs(30), page.submit()).await;

        assert!(timed_out.is_err());
        assert!(page.is_submit_enabled());
        assert_eq!(page.submit_label(), "Create account");
    }

    #[tokio::test(start_paused = true)]
    async fn pending_submission_shows_progress_label() {
        let (mut page, _events) = page(FakeBackend::hanging());
        fill(&mut page, "secret1", "secret1");
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
            assert_eq!(
                SUBMIT_LABELS.for_phase(*phases.borrow()),
                "Creating account..."
            );
        }

        assert_eq!(page.phase(), FormPhase::Idle);
    }

    #[tokio::test]
    async fn login_link_navigates() {
        let (page, mut events) = page(FakeBackend::answering(AuthResult::success()));
        page.go_to_login();
        assert_eq!(events.recv().await, Some(Route::Login));
    }

    #[test]
    fn visibility_toggles_are_independent() {
        let (navigator, _events) = Navigator::channel();
        let mut page = SignUpPage::new(FakeBackend::answering(AuthResult::success()), navigator);
        page.toggle_confirm_password_visibility();
        assert!(page.confirm_password_visible());
        assert!(!page.password_visible());
    }
}
