//! Toast notifications shown by the pages. A toast carries one message and a
//! severity, auto-dismisses after the page's display duration and can be
//! dismissed early. Messages must be safe to render and never include
//! passwords.

use crate::app_lib::ScheduledTask;
use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::sync::watch;

/// Supported toast styles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Success,
    Danger,
    Warning,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    pub visible: bool,
    pub message: String,
    pub severity: Severity,
}

/// Owns the toast state of one page and its auto-dismiss timer.
#[derive(Debug)]
pub struct Toaster {
    state: Arc<watch::Sender<ToastState>>,
    generation: Arc<AtomicU64>,
    duration: Duration,
    dismiss_timer: Option<ScheduledTask>,
}

impl Toaster {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        let (state, _) = watch::channel(ToastState::default());
        Self {
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            duration,
            dismiss_timer: None,
        }
    }

    /// Current toast snapshot.
    #[must_use]
    pub fn current(&self) -> ToastState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every show/dismiss.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ToastState> {
        self.state.subscribe()
    }

    /// Replaces any visible toast and restarts the auto-dismiss timer.
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(ToastState {
            visible: true,
            message: message.into(),
            severity,
        });

        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        // the previous timer is aborted when it is replaced
        self.dismiss_timer = Some(ScheduledTask::after(self.duration, move || {
            if current.load(Ordering::SeqCst) == generation {
                hide(&state);
            }
        }));
    }

    /// Hides the toast now and cancels its timer.
    pub fn dismiss(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(timer) = self.dismiss_timer.take() {
            timer.cancel();
        }
        hide(&self.state);
    }
}

fn hide(state: &watch::Sender<ToastState>) {
    state.send_if_modified(|toast| {
        let was_visible = toast.visible;
        toast.visible = false;
        was_visible
    });
}
