pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod open;
pub mod signup;

mod report;
// Internal "interpreter" for `Action`.
mod run;

#[derive(Debug)]
pub enum Action {
    Login(login::Args),
    SignUp(signup::Args),
    ForgotPassword(forgot_password::Args),
    Open(open::Args),
    Logout(logout::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails or the flow ends in a failure toast.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
