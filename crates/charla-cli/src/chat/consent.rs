//! Privacy notice gate shown before the first chat in cloud deployments.
//!
//! Evaluation and persistence live in charla-core; this module only owns
//! the terminal prompt.

use console::style;

use crate::state::AppState;

/// Run the consent gate. Returns whether the session may proceed.
///
/// The gate is skipped entirely when acceptance is already persisted,
/// when the service reports a local deployment, or when the config fetch
/// fails (fail open).
pub async fn run_gate(state: &AppState) -> anyhow::Result<bool> {
    if !state.consent.evaluate().await? {
        return Ok(true);
    }

    println!();
    println!("  {}", style("Privacy notice").bold());
    println!("  This service runs in a hosted environment. Messages and");
    println!("  attachments you send are processed by the remote service.");
    println!();

    let accepted = dialoguer::Confirm::new()
        .with_prompt("  Accept and continue?")
        .default(true)
        .interact()?;

    if accepted {
        state.consent.accept().await?;
        Ok(true)
    } else {
        Ok(false)
    }
}
