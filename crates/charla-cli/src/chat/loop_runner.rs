//! Main chat loop orchestration.
//!
//! Coordinates the conversation lifecycle: consent gate, catalog fetch
//! and model selection, welcome banner, background health polling, input
//! loop with streaming responses, slash commands, and history recording.
//!
//! Request serialization is structural: input is not read again until
//! the in-flight stream reaches its terminal event, so there is never
//! more than one request per conversation turn. An in-flight stream is
//! never cancelled; `/new` only detaches the UI from it.

use std::path::Path;
use std::time::Duration;

use console::style;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::watch;
use tracing::info;

use charla_core::attachment::AttachmentStaging;
use charla_core::render::RenderPipeline;
use charla_core::session::state::SessionState;
use charla_types::catalog::HealthReport;
use charla_types::chat::RenderEvent;
use charla_types::session::ConversationSummary;

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::consent;
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;
use super::surface::StreamingSurface;

#[derive(Debug, PartialEq)]
enum LoopControl {
    Continue,
    Exit,
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(
    state: &AppState,
    model_override: Option<String>,
    role_mode: String,
) -> anyhow::Result<()> {
    if !consent::run_gate(state).await? {
        println!("\n  {}", style("Session ended.").dim());
        return Ok(());
    }

    // Catalog fetch and model selection. No model means no send
    // affordance; that is an advisory, not a crash.
    let catalog = state.monitor.refresh_catalog().await;
    let persisted = state.prefs.selected_model().await?;
    let Some(model) = model_override.or_else(|| catalog.choose(persisted.as_deref())) else {
        println!();
        println!(
            "  {} Model catalog unavailable and no model selected.",
            style("!").yellow().bold()
        );
        println!(
            "  {}",
            style("Check the service with `charla status`, or pass --model.").dim()
        );
        println!();
        return Ok(());
    };

    let conversation_id = state.identity.ensure().await?;
    let turbo = state.prefs.turbo_enabled().await?;
    let mut session = SessionState::new(conversation_id, model, role_mode, turbo);
    let mut staging = AttachmentStaging::new();

    print_welcome_banner(
        &state.config.base_url,
        &session.model,
        session.conversation_id.short(),
        session.turbo,
    );

    // Background health poller; the loop samples the latest report.
    let (health_tx, health_rx) = watch::channel(HealthReport::UNREACHABLE);
    let monitor = state.monitor.clone();
    let poll_interval = Duration::from_secs(state.config.health_poll_interval_secs);
    let poller = tokio::spawn(async move {
        monitor.run_health_loop(poll_interval, health_tx).await;
    });

    let renderer = ChatRenderer::new();
    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!(
                    "\n  {}",
                    style("Press Ctrl+D to exit, or keep chatting.").dim()
                );
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    let control = handle_command(
                        state,
                        cmd,
                        &mut session,
                        &mut staging,
                        &mut chat_input,
                        &health_rx,
                    )
                    .await?;
                    if control == LoopControl::Exit {
                        break;
                    }
                    continue;
                }

                send_message(state, &renderer, &mut session, &mut staging, &text).await?;
            }
        }
    }

    poller.abort();
    Ok(())
}

/// Drive one chat exchange to its terminal event.
async fn send_message(
    state: &AppState,
    renderer: &ChatRenderer,
    session: &mut SessionState,
    staging: &mut AttachmentStaging,
    text: &str,
) -> anyhow::Result<()> {
    // Drain atomically: attachments staged from here on belong to the
    // next message, even if this send is slow.
    let attachments = staging.drain_and_clear();
    let request = session.compose_request(text, attachments);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let mut stream = state.chat.send(request);
    let mut surface = StreamingSurface::new();
    let mut first_delta = true;
    let mut metrics = None;
    let mut failed = false;

    while let Some(event) = stream.next().await {
        match event {
            Ok(RenderEvent::TextDelta(accumulated)) => {
                if first_delta {
                    spinner.finish_and_clear();
                    first_delta = false;
                    println!();
                }
                // Full re-render of the accumulated markdown, replacing
                // the previous block.
                let rendered = renderer.render(&accumulated);
                surface.update(&rendered)?;
            }
            Ok(RenderEvent::Completed(m)) => {
                metrics = m;
            }
            Err(err) => {
                spinner.finish_and_clear();
                println!("\n  {} {}", style("Error:").red().bold(), err);
                println!(
                    "  {}",
                    style("Type a message to retry, /exit to quit.").dim()
                );
                failed = true;
                break;
            }
        }
    }

    if first_delta {
        spinner.finish_and_clear();
    }
    surface.detach();

    if failed {
        return Ok(());
    }

    if let Some(m) = metrics {
        renderer.print_metrics_footer(&m);
    }
    println!();

    // Record this conversation in the history index after its first
    // completed exchange. Idempotent per id.
    if !session.indexed {
        let title = ConversationSummary::derive_title(text);
        state
            .index
            .record_if_absent(&session.conversation_id, &title)
            .await?;
        session.indexed = true;
    }

    Ok(())
}

async fn handle_command(
    state: &AppState,
    cmd: ChatCommand,
    session: &mut SessionState,
    staging: &mut AttachmentStaging,
    chat_input: &mut ChatInput,
    health_rx: &watch::Receiver<HealthReport>,
) -> anyhow::Result<LoopControl> {
    match cmd {
        ChatCommand::Help => commands::print_help(),
        ChatCommand::Clear => chat_input.clear(),
        ChatCommand::Exit => {
            println!("\n  {}", style("Session ended.").dim());
            return Ok(LoopControl::Exit);
        }
        ChatCommand::New => {
            let fresh = state.identity.reset().await?;
            session.adopt(fresh);
            staging.clear();
            println!(
                "\n  {} New conversation {}",
                style("*").cyan().bold(),
                style(session.conversation_id.short()).dim()
            );
            println!("  Hello! How can I assist you today?\n");
        }
        ChatCommand::Attach(path) => attach_file(staging, &path).await,
        ChatCommand::Attachments => list_attachments(staging),
        ChatCommand::Detach(position) => {
            let handle = staging.entries().nth(position - 1).map(|(h, _)| h);
            match handle {
                Some(handle) => {
                    staging.remove(handle);
                    println!(
                        "\n  {} Removed attachment {position}. {} pending.\n",
                        style("*").cyan().bold(),
                        staging.len()
                    );
                }
                None => println!(
                    "\n  {} No attachment at position {position}.\n",
                    style("!").yellow().bold()
                ),
            }
        }
        ChatCommand::Turbo => {
            session.turbo = !session.turbo;
            state.prefs.set_turbo(session.turbo).await?;
            let label = if session.turbo { "on" } else { "off" };
            println!("\n  {} Turbo mode {label}.\n", style("*").cyan().bold());
        }
        ChatCommand::Model(None) => {
            let catalog = state.monitor.refresh_catalog().await;
            if !catalog.is_usable() {
                println!(
                    "\n  {} Model catalog unavailable.\n",
                    style("!").yellow().bold()
                );
            } else {
                println!();
                for model in catalog.models() {
                    let marker = if model == &session.model { "*" } else { " " };
                    println!("  {marker} {model}");
                }
                println!();
            }
        }
        ChatCommand::Model(Some(name)) => {
            let catalog = state.monitor.refresh_catalog().await;
            if catalog.models().iter().any(|m| m == &name) {
                state.prefs.set_selected_model(&name).await?;
                session.model = name;
                println!(
                    "\n  {} Model set to {}.\n",
                    style("*").cyan().bold(),
                    style(&session.model).cyan()
                );
            } else {
                println!(
                    "\n  {} Model '{name}' is not in the catalog. Try /model to list.\n",
                    style("!").yellow().bold()
                );
            }
        }
        ChatCommand::History => {
            let summaries = state.index.list().await?;
            if summaries.is_empty() {
                println!("\n  {}\n", style("No conversations yet").dim());
            } else {
                println!();
                for summary in &summaries {
                    println!(
                        "  {} {}",
                        style(summary.id.short()).dim(),
                        summary.title
                    );
                }
                println!();
            }
        }
        ChatCommand::Status => {
            let health = *health_rx.borrow();
            let mark = |ok: bool| {
                if ok {
                    format!("{}", style("online").green())
                } else {
                    format!("{}", style("offline").red())
                }
            };
            println!();
            println!("  {}  {}", style("Service:").bold(), mark(health.reachable));
            println!("  {}  {}", style("Backend:").bold(), mark(health.backend_ready));
            println!("  {}    {}", style("Model:").bold(), session.model);
            println!(
                "  {}    {}",
                style("Turbo:").bold(),
                if session.turbo { "on" } else { "off" }
            );
            println!();
        }
        ChatCommand::Unknown(cmd_name) => {
            println!(
                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                style("?").yellow().bold(),
                style(cmd_name).dim()
            );
        }
    }
    Ok(LoopControl::Continue)
}

/// Stage a file from disk. Only image types are accepted.
async fn attach_file(staging: &mut AttachmentStaging, path: &str) {
    let path = Path::new(path);
    let Some(mime) = mime_for_path(path) else {
        println!(
            "\n  {} Only image attachments are supported (png, jpg, gif, webp, bmp).\n",
            style("!").yellow().bold()
        );
        return;
    };

    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let size_kb = bytes.len() / 1024;
            staging.add(&bytes, mime);
            info!(path = %path.display(), mime, "attachment staged");
            println!(
                "\n  {} Attached {} ({mime}, {size_kb} KB). {} pending.\n",
                style("*").cyan().bold(),
                path.display(),
                staging.len()
            );
        }
        Err(err) => {
            println!(
                "\n  {} Could not read {}: {err}\n",
                style("!").red().bold(),
                path.display()
            );
        }
    }
}

fn list_attachments(staging: &AttachmentStaging) {
    if staging.is_empty() {
        println!("\n  {}\n", style("No attachments staged").dim());
        return;
    }
    println!();
    for (position, (_, attachment)) in staging.entries().enumerate() {
        println!(
            "  {} {} ({} KB)",
            position + 1,
            attachment.mime_type,
            attachment.size_bytes / 1024
        );
    }
    println!();
}

fn mime_for_path(path: &Path) -> Option<&'static str> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())?
        .as_str()
    {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}
