use crate::{
    cli::{actions::Action, commands, dispatch, telemetry},
    GIT_COMMIT_HASH,
};
use anyhow::Result;
use tracing::debug;

/// Parses the command line, installs logging and resolves the [`Action`] to run.
///
/// # Errors
///
/// Returns an error if telemetry cannot be initialized or the arguments do not
/// resolve to a valid configuration
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    telemetry::init(commands::logging::verbosity(&matches))?;
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        commit = GIT_COMMIT_HASH,
        "authflow starting"
    );

    dispatch::handler(&matches)
}
