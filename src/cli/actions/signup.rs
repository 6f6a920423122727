use crate::{
    app_lib::{ApiClient, AppConfig},
    cli::actions::report,
    features::auth::HttpAuthClient,
    routes::{
        signup::{REDIRECT_DELAY, SUBMIT_LABELS},
        Navigator, SignUpPage,
    },
};
use anyhow::Result;
use secrecy::SecretString;

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub username: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

/// # Errors
/// Returns an error if the client cannot be built or the account is not created.
pub async fn execute(args: Args) -> Result<()> {
    let backend = HttpAuthClient::new(ApiClient::new(&args.config)?);
    let (navigator, mut events) = Navigator::channel();
    let mut page = SignUpPage::new(backend, navigator);
    page.set_username(args.username);
    page.set_email(args.email);
    page.set_password(args.password);
    page.set_confirm_password(args.confirm_password);

    let _progress = report::announce_progress(page.phase_updates(), SUBMIT_LABELS);
    let outcome = page.submit().await;
    report::print_toast(&page.toast());
    if outcome.is_success() {
        report::follow_navigation(&mut events, REDIRECT_DELAY).await;
    }

    report::conclude("signup", &outcome)
}
