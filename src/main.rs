//! GymDesk Agenda — live trainer schedule console.
//!
//! Wires the gateway, caches, push sync, and booking service together and
//! renders one trainer's schedule as it changes.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;

use gymdesk_core::config::AppConfig;
use gymdesk_core::types::id::TrainerId;
use gymdesk_entity::session::TrainingSession;
use gymdesk_gateway::{HttpScheduleGateway, ScheduleGateway};
use gymdesk_realtime::{RealtimeSync, WsPushSource};
use gymdesk_scheduler::{BookingService, allowed_transitions};
use gymdesk_store::{RosterCache, ScheduleStore};

/// Follow a trainer's schedule live from the terminal.
#[derive(Debug, Parser)]
#[command(name = "gymdesk-agenda", version)]
struct Args {
    /// Trainer whose schedule to follow.
    #[arg(long)]
    trainer: Uuid,
    /// Configuration overlay to load (config/<env>.toml).
    #[arg(long, default_value = "development")]
    env: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = AppConfig::load(&args.env)?;
    init_logging(&config);

    run(config, TrainerId::from_uuid(args.trainer)).await
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).init();
        }
    }
}

/// Main console run function
async fn run(config: AppConfig, trainer_id: TrainerId) -> anyhow::Result<()> {
    tracing::info!("Starting GymDesk agenda v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Backend gateway ──────────────────────────────────
    let gateway: Arc<dyn ScheduleGateway> = Arc::new(HttpScheduleGateway::new(&config.gateway)?);
    tracing::info!(base_url = %config.gateway.base_url, "Gateway ready");

    // ── Step 2: Caches ───────────────────────────────────────────
    let store = Arc::new(ScheduleStore::new(Arc::clone(&gateway), &config.store));
    let roster = Arc::new(RosterCache::new(Arc::clone(&gateway), &config.store));

    // ── Step 3: Push sync ────────────────────────────────────────
    let source = Arc::new(WsPushSource::new(config.realtime.clone()));
    let sync = Arc::new(RealtimeSync::new(
        trainer_id,
        Arc::clone(&store),
        source,
        config.realtime.channel_buffer_size,
    ));
    let mut notices = sync.notices();
    let sync_task = tokio::spawn({
        let sync = Arc::clone(&sync);
        async move { sync.run().await }
    });

    // ── Step 4: Booking service + live view ──────────────────────
    let service = BookingService::new(trainer_id, gateway, store, roster);
    let mut view = service.subscribe().await?;

    match service.eligible_members().await {
        Ok(members) => tracing::info!(count = members.len(), "Bookable members loaded"),
        Err(error) => tracing::warn!(%error, "Could not load the bookable-member roster"),
    }

    render_agenda(&view.borrow().clone());

    loop {
        tokio::select! {
            changed = view.changed() => {
                changed?;
                let sessions = view.borrow().clone();
                render_agenda(&sessions);
            }
            notice = notices.recv() => {
                match notice {
                    Ok(notice) => println!("  • {}", notice.message),
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    sync_task.abort();
    Ok(())
}

/// Print the schedule sorted by start time, with the actions legal for
/// each session's current status.
fn render_agenda(sessions: &[TrainingSession]) {
    let mut sorted = sessions.to_vec();
    sorted.sort_by_key(|session| session.starts_at);

    println!("── Agenda: {} session(s) ──", sorted.len());
    for session in &sorted {
        let actions: Vec<&str> = allowed_transitions(session.status)
            .iter()
            .map(|kind| kind.as_str())
            .collect();
        println!(
            "  {}  {:<9}  {:>3} min  {}  [{}]",
            session.starts_at.format("%Y-%m-%d %H:%M"),
            session.status.to_string(),
            session.duration_minutes,
            session.member.label(),
            actions.join("|"),
        );
    }
}
