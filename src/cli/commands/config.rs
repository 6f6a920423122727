use crate::app_lib::{
    config::{ENV_API_URL, ENV_STATE_DIR, ENV_TIMEOUT},
    ConfigOverrides,
};
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_STATE_DIR: &str = "state-dir";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Base URL of the auth backend")
                .env(ENV_API_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds (default: 10)")
                .env(ENV_TIMEOUT)
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_STATE_DIR)
                .long(ARG_STATE_DIR)
                .help("Directory holding session.json")
                .env(ENV_STATE_DIR)
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

/// Collects the configuration flags; missing ones fall back to defaults later.
#[must_use]
pub fn overrides(matches: &ArgMatches) -> ConfigOverrides {
    ConfigOverrides {
        api_base_url: matches.get_one::<String>(ARG_API_URL).cloned(),
        timeout_seconds: matches.get_one::<u64>(ARG_TIMEOUT).copied(),
        state_dir: matches.get_one::<PathBuf>(ARG_STATE_DIR).cloned(),
    }
}
