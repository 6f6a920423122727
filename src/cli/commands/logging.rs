//! `-v` counting and `AUTHFLOW_LOG_LEVEL`. Either form resolves to the same
//! verbosity count, which [`verbosity`] turns into a tracing level.

use clap::{builder::ValueParser, Arg, ArgAction, ArgMatches, Command};
use tracing::Level;

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ENV_LOG_LEVEL: &str = "AUTHFLOW_LOG_LEVEL";

/// Indexed by verbosity count; counts past the end stay at `trace`.
const LEVELS: [(&str, Level); 5] = [
    ("error", Level::ERROR),
    ("warn", Level::WARN),
    ("info", Level::INFO),
    ("debug", Level::DEBUG),
    ("trace", Level::TRACE),
];
const MAX_VERBOSITY: u8 = 5;

fn parse_log_level(level: &str) -> Result<u8, String> {
    let level = level.trim();
    if let Ok(count) = level.parse::<u8>() {
        return if count <= MAX_VERBOSITY {
            Ok(count)
        } else {
            Err(format!("verbosity {count} is above {MAX_VERBOSITY}"))
        };
    }

    LEVELS
        .iter()
        .position(|(name, _)| name.eq_ignore_ascii_case(level))
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| {
            let names: Vec<&str> = LEVELS.iter().map(|(name, _)| *name).collect();
            format!("unknown log level `{level}`, expected one of {}", names.join(", "))
        })
}

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(parse_log_level)
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
            .env(ENV_LOG_LEVEL)
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}

/// Level requested on the command line, `None` to keep the subscriber default.
#[must_use]
pub fn verbosity(matches: &ArgMatches) -> Option<Level> {
    let count = matches.get_one::<u8>(ARG_VERBOSITY).copied().unwrap_or(0);
    if count == 0 {
        return None;
    }
    LEVELS
        .get(usize::from(count))
        .or(LEVELS.last())
        .map(|(_, level)| *level)
}
