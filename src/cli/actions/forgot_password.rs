use crate::{
    app_lib::{ApiClient, AppConfig},
    cli::actions::report,
    features::auth::HttpAuthClient,
    routes::{
        forgot_password::SUBMIT_LABELS, ForgotPasswordPage, ForgotPasswordView, Navigator,
    },
};
use anyhow::Result;

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub email: String,
}

/// # Errors
/// Returns an error if the client cannot be built or the email is not sent.
pub async fn execute(args: Args) -> Result<()> {
    let backend = HttpAuthClient::new(ApiClient::new(&args.config)?);
    let (navigator, _events) = Navigator::channel();
    let mut page = ForgotPasswordPage::new(backend, navigator);
    page.set_email(args.email);

    let _progress = report::announce_progress(page.phase_updates(), SUBMIT_LABELS);
    let outcome = page.submit().await;
    report::print_toast(&page.toast());
    if let ForgotPasswordView::EmailSent { email } = page.view() {
        println!("Recovery instructions were sent to {email}");
    }

    report::conclude("password recovery", &outcome)
}
