//! Conversation history listing command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Display past conversations, most recent first.
pub async fn list_history(state: &AppState, json: bool) -> Result<()> {
    let summaries = state.index.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!();
        println!("  {}", style("No conversations yet").dim());
        println!();
        return Ok(());
    }

    println!();
    for summary in &summaries {
        println!("  {} {}", style(summary.id.short()).dim(), summary.title);
    }
    println!();

    Ok(())
}
