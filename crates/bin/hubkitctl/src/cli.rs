//! Command-line argument parsing.

use std::path::PathBuf;

pub const USAGE: &str = "\
usage: hubkitctl <subcommand>

subcommands:
  describe [DOMAIN]               print registered schema descriptors as JSON
  command <ENTITY_FILE> <PAYLOAD> apply a command to an entity and print it
  event <ENTITY_FILE> <PAYLOAD>   apply an event to an entity and print it
  help                            show this message

PAYLOAD is a JSON document, or `-` to read it from stdin.
The entity file is never written back.";

/// A parsed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cli {
    Describe { domain: Option<String> },
    Apply {
        inbound: Inbound,
        entity: PathBuf,
        payload: String,
    },
    Help,
}

/// Which state channel an applied payload targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbound {
    Command,
    Event,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("missing subcommand")]
    MissingSubcommand,
    #[error("unknown subcommand: {0}")]
    UnknownSubcommand(String),
    #[error("`{subcommand}` expects {expected}")]
    WrongArguments {
        subcommand: &'static str,
        expected: &'static str,
    },
}

/// Parse arguments, excluding the program name.
///
/// # Errors
///
/// Returns a [`UsageError`] for unknown subcommands or a wrong argument count.
pub fn parse<I>(args: I) -> Result<Cli, UsageError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let subcommand = args.next().ok_or(UsageError::MissingSubcommand)?;
    let rest: Vec<String> = args.collect();

    match subcommand.as_str() {
        "describe" => match <[String; 0]>::try_from(rest) {
            Ok([]) => Ok(Cli::Describe { domain: None }),
            Err(rest) => match <[String; 1]>::try_from(rest) {
                Ok([domain]) => Ok(Cli::Describe {
                    domain: Some(domain),
                }),
                Err(_) => Err(UsageError::WrongArguments {
                    subcommand: "describe",
                    expected: "at most one DOMAIN",
                }),
            },
        },
        "command" => apply("command", Inbound::Command, rest),
        "event" => apply("event", Inbound::Event, rest),
        "help" | "-h" | "--help" => Ok(Cli::Help),
        _ => Err(UsageError::UnknownSubcommand(subcommand)),
    }
}

fn apply(subcommand: &'static str, inbound: Inbound, rest: Vec<String>) -> Result<Cli, UsageError> {
    let [entity, payload] = <[String; 2]>::try_from(rest).map_err(|_| UsageError::WrongArguments {
        subcommand,
        expected: "ENTITY_FILE and PAYLOAD",
    })?;
    Ok(Cli::Apply {
        inbound,
        entity: PathBuf::from(entity),
        payload,
    })
}
