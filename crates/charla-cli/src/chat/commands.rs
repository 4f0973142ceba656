//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and provide in-chat controls for the
//! conversation, attachments, model selection, and service status.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Start a new conversation (fresh identity, cleared staging).
    New,
    /// Stage a file attachment.
    Attach(String),
    /// List staged attachments.
    Attachments,
    /// Remove a staged attachment by its 1-based list position.
    Detach(usize),
    /// Toggle turbo mode.
    Turbo,
    /// Select a model, or list the catalog when no name is given.
    Model(Option<String>),
    /// Show past conversations.
    History,
    /// Show service health and session settings.
    Status,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts.get(1).map(|s| s.trim().to_string());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/new" => Some(ChatCommand::New),
        "/attach" => match arg {
            Some(path) if !path.is_empty() => Some(ChatCommand::Attach(path)),
            _ => Some(ChatCommand::Attachments),
        },
        "/detach" => match arg.and_then(|a| a.parse::<usize>().ok()) {
            Some(position) if position > 0 => Some(ChatCommand::Detach(position)),
            _ => Some(ChatCommand::Unknown(
                "/detach requires a list position".to_string(),
            )),
        },
        "/turbo" => Some(ChatCommand::Turbo),
        "/model" | "/models" => Some(ChatCommand::Model(arg.filter(|a| !a.is_empty()))),
        "/history" => Some(ChatCommand::History),
        "/status" => Some(ChatCommand::Status),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}          {}", style("/help").cyan(), "Show this help message");
    println!("  {}         {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}          {}", style("/exit").cyan(), "End the chat session");
    println!("  {}           {}", style("/new").cyan(), "Start a new conversation");
    println!("  {} {}", style("/attach <path>").cyan(), "Stage an image attachment");
    println!("  {}    {}", style("/detach <n>").cyan(), "Remove a staged attachment");
    println!("  {}         {}", style("/turbo").cyan(), "Toggle turbo mode");
    println!("  {}  {}", style("/model [name]").cyan(), "Select a model or list the catalog");
    println!("  {}       {}", style("/history").cyan(), "Show past conversations");
    println!("  {}        {}", style("/status").cyan(), "Show service health");
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/h"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/q"), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_parse_attach_with_path() {
        assert_eq!(
            parse("/attach ./photo.png"),
            Some(ChatCommand::Attach("./photo.png".to_string()))
        );
    }

    #[test]
    fn test_parse_attach_without_path_lists() {
        assert_eq!(parse("/attach"), Some(ChatCommand::Attachments));
    }

    #[test]
    fn test_parse_detach() {
        assert_eq!(parse("/detach 2"), Some(ChatCommand::Detach(2)));
        assert!(matches!(parse("/detach"), Some(ChatCommand::Unknown(_))));
        assert!(matches!(parse("/detach zero"), Some(ChatCommand::Unknown(_))));
        assert!(matches!(parse("/detach 0"), Some(ChatCommand::Unknown(_))));
    }

    #[test]
    fn test_parse_model() {
        assert_eq!(parse("/model"), Some(ChatCommand::Model(None)));
        assert_eq!(
            parse("/model mistral:7b"),
            Some(ChatCommand::Model(Some("mistral:7b".to_string())))
        );
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("hello world"), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse("/foo"), Some(ChatCommand::Unknown("/foo".to_string())));
    }
}
