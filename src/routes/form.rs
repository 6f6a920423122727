//! Submission state shared by the page controllers.
//!
//! The phase is published on a watch channel, so a renderer can disable the
//! submit control and swap its label while `submit` holds the page.

use crate::features::auth::{types::AuthResult, validation::FieldError};
use tokio::sync::watch;

/// Lifecycle of one form: `Idle → Validating → Submitting → (Succeeded | Failed)`.
///
/// `Failed` accepts a new submission just like `Idle`; fields are kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl FormPhase {
    #[must_use]
    pub const fn is_submitting(self) -> bool {
        matches!(self, Self::Submitting)
    }
}

/// Submit button text for the idle and in-flight states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitLabels {
    pub idle: &'static str,
    pub busy: &'static str,
}

impl SubmitLabels {
    #[must_use]
    pub const fn for_phase(self, phase: FormPhase) -> &'static str {
        if phase.is_submitting() {
            self.busy
        } else {
            self.idle
        }
    }
}

/// What one call to `submit` did.
///
/// `submit` takes the page by `&mut`, so a second submission cannot start
/// while one is in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; the network was not touched.
    Invalid(FieldError),
    /// The backend call resolved.
    Completed(AuthResult),
}

impl SubmitOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed(result) if result.is_success())
    }
}

#[derive(Debug)]
pub(crate) struct FormState {
    phase: watch::Sender<FormPhase>,
}

impl Default for FormState {
    fn default() -> Self {
        let (phase, _) = watch::channel(FormPhase::Idle);
        Self { phase }
    }
}

impl FormState {
    pub(crate) fn phase(&self) -> FormPhase {
        *self.phase.borrow()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<FormPhase> {
        self.phase.subscribe()
    }

    pub(crate) fn is_submitting(&self) -> bool {
        self.phase().is_submitting()
    }

    fn set(&self, phase: FormPhase) {
        self.phase.send_if_modified(|current| {
            let changed = *current != phase;
            *current = phase;
            changed
        });
    }

    pub(crate) fn begin_validation(&mut self) {
        self.set(FormPhase::Validating);
    }

    pub(crate) fn reject(&mut self) {
        self.set(FormPhase::Idle);
    }

    pub(crate) fn reset(&mut self) {
        self.set(FormPhase::Idle);
    }

    /// Enters `Submitting` until the returned guard is finished or dropped.
    pub(crate) fn begin_submit(&mut self) -> PendingSubmit<'_> {
        self.set(FormPhase::Submitting);
        PendingSubmit { form: self }
    }
}

/// Holds the form in `Submitting`. Dropping it without [`PendingSubmit::finish`]
/// (e.g. the submission future was cancelled) returns the form to `Idle`, so the
/// submit control can never stay disabled.
#[derive(Debug)]
pub(crate) struct PendingSubmit<'a> {
    form: &'a mut FormState,
}

impl PendingSubmit<'_> {
    pub(crate) fn finish(self, succeeded: bool) {
        self.form.set(if succeeded {
            FormPhase::Succeeded
        } else {
            FormPhase::Failed
        });
    }
}

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        if self.form.is_submitting() {
            self.form.set(FormPhase::Idle);
        }
    }
}
