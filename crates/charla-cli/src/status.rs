//! Service status dashboard command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Display the service dashboard: health, catalog, session settings.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let health = state.monitor.check_health().await;
    let catalog = state.monitor.refresh_catalog().await;
    let selected = state.prefs.selected_model().await?;
    let turbo = state.prefs.turbo_enabled().await?;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "service_url": state.config.base_url,
            "reachable": health.reachable,
            "backend_ready": health.backend_ready,
            "catalog_available": catalog.is_usable(),
            "models": catalog.models(),
            "selected_model": selected,
            "turbo": turbo,
            "data_dir": state.data_dir.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let mark = |ok: bool| {
        if ok {
            format!("{}", style("online").green())
        } else {
            format!("{}", style("offline").red())
        }
    };

    println!();
    println!("  Charla v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("  {}", style("── Service ──").dim());
    println!("  URL:      {}", style(&state.config.base_url).dim());
    println!("  Bridge:   {}", mark(health.reachable));
    println!("  Backend:  {}", mark(health.backend_ready));
    println!();

    println!("  {}", style("── Models ──").dim());
    if catalog.is_usable() {
        let effective = catalog.choose(selected.as_deref());
        for model in catalog.models() {
            let marker = if Some(model.as_str()) == effective.as_deref() {
                "*"
            } else {
                " "
            };
            println!("  {marker} {model}");
        }
    } else {
        println!("  {}", style("catalog unavailable — send disabled").yellow());
    }
    println!();

    println!("  {}", style("── Session ──").dim());
    println!("  Turbo:    {}", if turbo { "on" } else { "off" });
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!();

    Ok(())
}
