//! Forgot-password page controller.
//!
//! The page has two views: the email form, and a confirmation that stays on
//! screen after the recovery email went out. The confirmation offers a way
//! back to login or a reset to the form to send another email.

use super::{
    form::{FormPhase, FormState, SubmitLabels, SubmitOutcome},
    Navigator, Route,
};
use crate::{
    components::{Severity, ToastState, Toaster},
    features::auth::{validation::validate_recovery_email, AuthBackend},
};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, instrument};

pub const TOAST_DURATION: Duration = Duration::from_millis(4000);

pub const SUCCESS_MESSAGE: &str = "Recovery email sent! Check your inbox";
pub const FAILURE_MESSAGE: &str = "Could not send the recovery email";

pub const SUBMIT_LABELS: SubmitLabels = SubmitLabels {
    idle: "Send recovery email",
    busy: "Sending...",
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ForgotPasswordView {
    #[default]
    Form,
    /// Confirmation showing the address the email went to.
    EmailSent { email: String },
}

pub struct ForgotPasswordPage<B> {
    backend: B,
    navigator: Navigator,
    email: String,
    view: ForgotPasswordView,
    form: FormState,
    toaster: Toaster,
}

impl<B: AuthBackend> ForgotPasswordPage<B> {
    #[must_use]
    pub fn new(backend: B, navigator: Navigator) -> Self {
        Self {
            backend,
            navigator,
            email: String::new(),
            view: ForgotPasswordView::Form,
            form: FormState::default(),
            toaster: Toaster::new(TOAST_DURATION),
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn view(&self) -> &ForgotPasswordView {
        &self.view
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

    /// Leaves the confirmation view with an empty form.
    pub fn send_another(&mut self) {
        self.view = ForgotPasswordView::Form;
        self.email.clear();
        self.form.reset();
    }

    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.form.begin_validation();
        if let Err(err) = validate_recovery_email(&self.email) {
            self.form.reject();
            self.toaster.show(err.to_string(), Severity::Warning);
            return SubmitOutcome::Invalid(err);
        }

        let email = self.email.trim().to_string();
        let pending = self.form.begin_submit();
        let result = self.backend.request_password_reset(&email).await;
        pending.finish(result.is_success());

        if result.is_success() {
            info!("recovery email sent");
            self.toaster.show(SUCCESS_MESSAGE, Severity::Success);
            self.view = ForgotPasswordView::EmailSent { email };
        } else {
            info!("recovery email not sent");
            self.toaster.show(
                result.message().unwrap_or(FAILURE_MESSAGE).to_string(),
                Severity::Danger,
            );
        }

        SubmitOutcome::Completed(result)
    }
}
