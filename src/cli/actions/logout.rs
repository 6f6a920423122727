use crate::{app_lib::AppConfig, features::auth::SessionContext, routes::Route};
use anyhow::{Context, Result};
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
}

/// # Errors
/// Returns an error if the session file cannot be removed.
pub fn execute(args: &Args) -> Result<()> {
    let path = args.config.session_path();
    SessionContext::persisted(&path)
        .clear()
        .with_context(|| format!("failed to clear session at {}", path.display()))?;
    info!("session cleared");
    println!("-> {}", Route::Login);
    Ok(())
}
