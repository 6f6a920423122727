use crate::{
    app_lib::AppConfig,
    features::auth::SessionContext,
    routes::{resolve, Resolution},
};
use anyhow::Result;

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub path: String,
}

/// Resolves `path` against the persisted session and prints what would be shown.
/// # Errors
/// Currently infallible.
pub fn execute(args: &Args) -> Result<()> {
    let session = SessionContext::persisted(args.config.session_path());
    println!("{}", describe(resolve(&args.path, &session)));
    Ok(())
}

fn describe(resolution: Resolution) -> String {
    match resolution {
        Resolution::Render(route) => format!("render {route}"),
        Resolution::Redirect(route) => format!("redirect -> {route}"),
    }
}
