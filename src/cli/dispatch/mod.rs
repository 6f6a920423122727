//! Maps parsed CLI arguments to the [`Action`] that drives one page.

use crate::{
    app_lib::AppConfig,
    cli::{
        actions::{forgot_password, login, logout, open, signup, Action},
        commands::{config, pages},
    },
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;

/// # Errors
/// Returns an error if the configuration is invalid or the subcommand is unknown.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let config = AppConfig::with_overrides(config::overrides(matches))
        .context("invalid configuration")?;

    let (name, sub) = matches
        .subcommand()
        .context("missing subcommand, see --help")?;

    let action = match name {
        pages::CMD_LOGIN => Action::Login(login::Args {
            config,
            identifier: value(sub, pages::ARG_IDENTIFIER),
            password: secret(sub, pages::ARG_PASSWORD),
        }),
        pages::CMD_SIGNUP => Action::SignUp(signup::Args {
            config,
            username: value(sub, pages::ARG_USERNAME),
            email: value(sub, pages::ARG_EMAIL),
            password: secret(sub, pages::ARG_PASSWORD),
            confirm_password: secret(sub, pages::ARG_CONFIRM_PASSWORD),
        }),
        pages::CMD_FORGOT_PASSWORD => Action::ForgotPassword(forgot_password::Args {
            config,
            email: value(sub, pages::ARG_EMAIL),
        }),
        pages::CMD_OPEN => Action::Open(open::Args {
            config,
            path: value(sub, pages::ARG_PATH),
        }),
        pages::CMD_LOGOUT => Action::Logout(logout::Args { config }),
        other => return Err(anyhow!("unknown subcommand: {other}")),
    };

    Ok(action)
}

fn value(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}

fn secret(matches: &ArgMatches, id: &str) -> SecretString {
    SecretString::from(value(matches, id))
}
