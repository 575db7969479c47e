//! Command-line argument parsing for the video-sync CLI.

use std::path::PathBuf;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Print devices and streams once
    List,
    /// Delete the stream with this configuration name
    Delete(String),
    /// Create a stream from a JSON file
    Create(PathBuf),
    /// Keep refreshing and print changes (default)
    Watch,
}

pub const USAGE: &str = "\
Usage: video-sync [COMMAND]

Commands:
  list                 Print video devices and streams
  delete <name>        Delete the stream with this name
  create <file.json>   Create a stream from a JSON description
  watch                Refresh periodically and print changes (default)

Options:
  -h, --help           Show this help
  -V, --version        Show version

Environment:
  VIDEO_SYNC_HOST         Vehicle address (default http://blueos.local)
  VIDEO_SYNC_TIMEOUT_MS   Request timeout in milliseconds (default 10000)
  VIDEO_SYNC_POLL_MS      Refresh interval in milliseconds (default 5000)
  RUST_LOG                Log filter (default video_sync=info)
";

/// Parse command-line arguments and return the appropriate command.
///
/// Flags win over subcommands. A subcommand missing its argument yields
/// `Help`.
///
/// # Examples
///
/// ```
/// use video_sync::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["video-sync".to_string(), "delete".to_string(), "cam0".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Delete("cam0".to_string()));
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut positional = Vec::new();

    for arg in args.skip(1) {
        // Skip the program name
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    match positional.next().as_deref() {
        None | Some("watch") => CliCommand::Watch,
        Some("list") => CliCommand::List,
        Some("delete") => match positional.next() {
            Some(name) => CliCommand::Delete(name),
            None => CliCommand::Help,
        },
        Some("create") => match positional.next() {
            Some(path) => CliCommand::Create(PathBuf::from(path)),
            None => CliCommand::Help,
        },
        Some(_) => CliCommand::Help,
    }
}
