use clap::{Arg, Command};

pub const CMD_LOGIN: &str = "login";
pub const CMD_SIGNUP: &str = "signup";
pub const CMD_FORGOT_PASSWORD: &str = "forgot-password";
pub const CMD_OPEN: &str = "open";
pub const CMD_LOGOUT: &str = "logout";

pub const ARG_IDENTIFIER: &str = "identifier";
pub const ARG_USERNAME: &str = "username";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_CONFIRM_PASSWORD: &str = "confirm-password";
pub const ARG_PATH: &str = "path";

// Empty values are accepted so the pages can report them like the form would.
fn field(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .default_value("")
        .hide_default_value(true)
}

#[must_use]
pub fn login() -> Command {
    Command::new(CMD_LOGIN)
        .about("Sign in and store the session flag")
        .arg(field(ARG_IDENTIFIER, "Username or email"))
        .arg(field(ARG_PASSWORD, "Password"))
}

#[must_use]
pub fn signup() -> Command {
    Command::new(CMD_SIGNUP)
        .about("Create an account")
        .arg(field(ARG_USERNAME, "Username"))
        .arg(field(ARG_EMAIL, "Email address"))
        .arg(field(ARG_PASSWORD, "Password (at least 6 characters)"))
        .arg(field(ARG_CONFIRM_PASSWORD, "Password confirmation"))
}

#[must_use]
pub fn forgot_password() -> Command {
    Command::new(CMD_FORGOT_PASSWORD)
        .about("Send a password recovery email")
        .arg(field(ARG_EMAIL, "Email address of the account"))
}

#[must_use]
pub fn open() -> Command {
    Command::new(CMD_OPEN)
        .about("Resolve a path through the router")
        .arg(
            Arg::new(ARG_PATH)
                .help("Path to open, e.g. /home")
                .default_value("/"),
        )
}

#[must_use]
pub fn logout() -> Command {
    Command::new(CMD_LOGOUT).about("Clear the session flag")
}
