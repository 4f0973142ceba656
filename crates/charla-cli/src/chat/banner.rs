//! Welcome banner display for chat sessions.

use console::style;

/// Print the banner at the start of a chat session: service endpoint,
/// model, conversation id, and the turbo state.
pub fn print_welcome_banner(base_url: &str, model: &str, conversation_short: &str, turbo: bool) {
    println!();
    println!("  {}", style("Charla").cyan().bold());
    println!("  {}", style(base_url).dim());
    println!();
    println!("  {}  {}", style("Model:").bold(), style(model).dim());
    println!(
        "  {}  {}",
        style("Conversation:").bold(),
        style(conversation_short).dim()
    );
    if turbo {
        println!("  {}  {}", style("Turbo:").bold(), style("on").yellow());
    }
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}
