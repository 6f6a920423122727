use crate::{
    app_lib::ScheduledTask,
    components::ToastState,
    features::auth::FailureKind,
    routes::{FormPhase, NavigationEvents, Route, SubmitLabels, SubmitOutcome},
};
use anyhow::{bail, Result};
use std::time::Duration;
use tokio::{sync::watch, time::timeout};

const NAVIGATION_GRACE: Duration = Duration::from_millis(500);

pub(crate) fn print_toast(toast: &ToastState) {
    if toast.visible {
        println!("[{}] {}", toast.severity, toast.message);
    }
}

/// Prints the in-flight label once the page enters `Submitting`.
pub(crate) fn announce_progress(
    mut phases: watch::Receiver<FormPhase>,
    labels: SubmitLabels,
) -> ScheduledTask {
    ScheduledTask::after_async(Duration::ZERO, async move {
        if phases.wait_for(|phase| phase.is_submitting()).await.is_ok() {
            eprintln!("{}", labels.busy);
        }
    })
}

/// Waits for a delayed navigation scheduled by a page and prints its target.
pub(crate) async fn follow_navigation(
    events: &mut NavigationEvents,
    delay: Duration,
) -> Option<Route> {
    let route = timeout(delay + NAVIGATION_GRACE, events.recv())
        .await
        .ok()
        .flatten()?;
    println!("-> {route}");
    Some(route)
}

/// Turns a page outcome into the process result.
pub(crate) fn conclude(flow: &str, outcome: &SubmitOutcome) -> Result<()> {
    match outcome {
        SubmitOutcome::Completed(result) => match result.failure_kind() {
            None => Ok(()),
            Some(FailureKind::AuthRejected) => bail!("{flow} rejected by the server"),
            Some(FailureKind::ServerLogic) => bail!("{flow} failed: unexpected server answer"),
            Some(FailureKind::Network) => bail!("{flow} failed: server unreachable"),
        },
        SubmitOutcome::Invalid(err) => bail!("{flow} rejected: {err}"),
    }
}
