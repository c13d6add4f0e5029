//! Line commands for the terminal chat.

use std::path::PathBuf;

pub const HELP: &str = "\
Type a message and press Enter. Commands:
  /attach <path>...  add photos (JPG or PNG, up to 5)
  /remove <n>        remove pending photo number n
  /photos            list pending photos
  /help              show this help
  /quit              leave the chat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Send the line as-is. Empty lines send any pending photos.
    Message(String),
    Attach(Vec<PathBuf>),
    /// Zero-based index.
    Remove(usize),
    Photos,
    Help,
    Quit,
    /// Malformed command, with a message for the user.
    Invalid(String),
}

pub fn parse_line(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return ReplCommand::Message(trimmed.to_string());
    };

    let mut parts = rest.split_whitespace();
    let cmd = parts.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    match cmd.as_str() {
        "attach" if args.is_empty() => ReplCommand::Invalid("Usage: /attach <path>...".to_string()),
        "attach" => ReplCommand::Attach(args.into_iter().map(PathBuf::from).collect()),
        "remove" => match args.as_slice() {
            [n] => match n.parse::<usize>() {
                Ok(n) if n >= 1 => ReplCommand::Remove(n - 1),
                _ => ReplCommand::Invalid(format!("Not a photo number: {n}")),
            },
            _ => ReplCommand::Invalid("Usage: /remove <n>".to_string()),
        },
        "photos" => ReplCommand::Photos,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        other => ReplCommand::Invalid(format!("Unknown command: /{other} (try /help)")),
    }
}
