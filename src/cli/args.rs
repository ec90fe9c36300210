//! Command-line argument parsing for the lexa CLI.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use thiserror::Error;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Interactive chat (default)
    Chat,
    /// Ask a single question and exit
    Ask(String),
    /// Semantic search over the indexed documents, optionally restricted
    /// by `key=value` metadata filters
    Search {
        query: String,
        filters: Vec<(String, String)>,
    },
    /// Liveness and readiness of the service
    Health,
    /// Show settings, updating the given values first
    Settings {
        top_k: Option<u32>,
        threshold: Option<f32>,
    },
}

/// Command plus global options.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    /// `--url` override of the service base URL
    pub url: Option<String>,
    pub command: CliCommand,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgsError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid value for {flag}: {value}")]
    InvalidValue { flag: String, value: String },
    #[error("{0} needs a query")]
    MissingQuery(String),
    #[error("unknown argument: {0}")]
    Unknown(String),
}

pub const USAGE: &str = "\
Usage: lexa [--url <base>] [command]

Commands:
  chat                          Interactive chat (default)
  ask <query>                   Ask a single question
  search <query> [--filter key=value]...
                                Search the indexed documents
  health                        Check service health
  settings [--top-k N] [--threshold F]
                                Show or update retrieval settings

Options:
  --url <base>                  Service base URL (overrides LEXA_URL)
  -V, --version                 Show version
  -h, --help                    Show this help

In chat: Ctrl+C stops the answer, /clear starts over, /quit exits.";

/// Parse command-line arguments.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use lexa::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["lexa".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap().command, CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> Result<CliArgs, ArgsError>
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let mut args = args.skip(1).peekable();
    let mut url = None;
    let mut command = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliArgs { url, command: CliCommand::Version }),
            "--help" | "-h" => return Ok(CliArgs { url, command: CliCommand::Help }),
            "--url" => url = Some(take_value(&mut args, "--url")?),
            "chat" if command.is_none() => command = Some(CliCommand::Chat),
            "health" if command.is_none() => command = Some(CliCommand::Health),
            "ask" | "search" if command.is_none() => {
                let query = take_query(&mut args);
                if query.is_empty() {
                    return Err(ArgsError::MissingQuery(arg.clone()));
                }
                command = Some(if arg == "ask" {
                    CliCommand::Ask(query)
                } else {
                    CliCommand::Search {
                        query,
                        filters: Vec::new(),
                    }
                });
            }
            "--filter" => match command.as_mut() {
                Some(CliCommand::Search { filters, .. }) => {
                    let value = take_value(&mut args, "--filter")?;
                    filters.push(parse_filter(&value)?);
                }
                _ => return Err(ArgsError::Unknown(arg.clone())),
            },
            "settings" if command.is_none() => {
                command = Some(parse_settings(&mut args, &mut url)?);
            }
            _ => return Err(ArgsError::Unknown(arg.clone())),
        }
    }

    Ok(CliArgs {
        url,
        command: command.unwrap_or(CliCommand::Chat),
    })
}

fn take_value<I>(args: &mut I, flag: &str) -> Result<String, ArgsError>
where
    I: Iterator<Item = String>,
{
    args.next()
        .filter(|v| !v.starts_with("--"))
        .ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
}

/// Split `key=value`; both sides must be non-empty.
fn parse_filter(value: &str) -> Result<(String, String), ArgsError> {
    match value.split_once('=') {
        Some((key, val)) if !key.trim().is_empty() && !val.trim().is_empty() => {
            Ok((key.trim().to_string(), val.trim().to_string()))
        }
        _ => Err(ArgsError::InvalidValue {
            flag: "--filter".to_string(),
            value: value.to_string(),
        }),
    }
}

/// Remaining words up to the next `--` flag, joined with spaces.
fn take_query<I>(args: &mut std::iter::Peekable<I>) -> String
where
    I: Iterator<Item = String>,
{
    let mut words = Vec::new();
    while let Some(word) = args.next_if(|a| !a.starts_with("--")) {
        words.push(word);
    }
    words.join(" ").trim().to_string()
}

fn parse_settings<I>(
    args: &mut std::iter::Peekable<I>,
    url: &mut Option<String>,
) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut top_k = None;
    let mut threshold = None;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--top-k" => {
                let value = take_value(args, "--top-k")?;
                top_k = Some(value.parse().map_err(|_| ArgsError::InvalidValue {
                    flag: flag.clone(),
                    value,
                })?);
            }
            "--threshold" => {
                let value = take_value(args, "--threshold")?;
                threshold = Some(value.parse().map_err(|_| ArgsError::InvalidValue {
                    flag: flag.clone(),
                    value,
                })?);
            }
            "--url" => *url = Some(take_value(args, "--url")?),
            _ => return Err(ArgsError::Unknown(flag.clone())),
        }
    }

    Ok(CliCommand::Settings { top_k, threshold })
}
