use crate::{
    app_lib::{ApiClient, AppConfig},
    cli::actions::report,
    features::auth::{HttpAuthClient, SessionContext},
    routes::{
        login::{REDIRECT_DELAY, SUBMIT_LABELS},
        LoginPage, Navigator,
    },
};
use anyhow::Result;
use secrecy::SecretString;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub identifier: String,
    pub password: SecretString,
}

/// Drives the login page once with the given credentials.
/// # Errors
/// Returns an error if the client cannot be built or the login does not succeed.
pub async fn execute(args: Args) -> Result<()> {
    let Args {
        config,
        identifier,
        password,
    } = args;

    let backend = HttpAuthClient::new(ApiClient::new(&config)?);
    let session = SessionContext::persisted(config.session_path());
    debug!(session = %config.session_path().display(), "session store");

    let (navigator, mut events) = Navigator::channel();
    let mut page = LoginPage::new(backend, session, navigator);
    page.set_identifier(identifier);
    page.set_password(password);

    let _progress = report::announce_progress(page.phase_updates(), SUBMIT_LABELS);
    let outcome = page.submit().await;
    report::print_toast(&page.toast());
    if outcome.is_success() {
        report::follow_navigation(&mut events, REDIRECT_DELAY).await;
    }

    report::conclude("login", &outcome)
}
