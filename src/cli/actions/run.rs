use crate::cli::actions::{forgot_password, login, logout, open, signup, Action};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Login(args) => login::execute(args).await,
        Action::SignUp(args) => signup::execute(args).await,
        Action::ForgotPassword(args) => forgot_password::execute(args).await,
        Action::Open(args) => open::execute(&args),
        Action::Logout(args) => logout::execute(&args),
    }
}
