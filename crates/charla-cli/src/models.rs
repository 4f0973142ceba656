//! Model catalog listing command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Fetch and display the model catalog, marking the effective selection.
pub async fn list_models(state: &AppState, json: bool) -> Result<()> {
    let catalog = state.monitor.refresh_catalog().await;
    let selected = state.prefs.selected_model().await?;
    let effective = catalog.choose(selected.as_deref());

    if json {
        let out = serde_json::json!({
            "available": catalog.is_usable(),
            "models": catalog.models(),
            "selected": effective,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if !catalog.is_usable() {
        println!();
        println!(
            "  {} Model catalog unavailable — send is disabled.",
            style("!").yellow().bold()
        );
        println!(
            "  {}",
            style("Is the bridge service running? Check `charla status`.").dim()
        );
        println!();
        return Ok(());
    }

    println!();
    for model in catalog.models() {
        let marker = if Some(model.as_str()) == effective.as_deref() {
            "*"
        } else {
            " "
        };
        println!("  {marker} {model}");
    }
    println!();
    println!(
        "  {}",
        style("* effective selection; change with `/model <name>` in chat").dim()
    );
    println!();

    Ok(())
}
