use geocheck::api::{AttendanceApi, HttpAttendanceApi, new_client};
use geocheck::app_config::AppConfig;
use geocheck::check_in::CheckInSubmitter;
use geocheck::connectivity::{ProbeConfig, ProbeConnectivityMonitor, spawn_replay_trigger};
use geocheck::context::GeofencingContextLoader;
use geocheck::domain::CheckInMode;
use geocheck::offline_queue::OfflineQueue;
use geocheck::position::ConfiguredPositionSource;
use geocheck::session::{CheckInSession, Guidance, SessionOptions};
use geocheck::storage::FileStore;
use std::error::Error;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let (mode, mission) = parse_args(std::env::args().skip(1))?;

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let client = new_client(&config)?;
    let api: Arc<dyn AttendanceApi> = Arc::new(HttpAttendanceApi::new(client.clone(), config.api().url()));

    let storage = Arc::new(FileStore::new(config.queue().storage_directory()));
    let queue = Arc::new(OfflineQueue::new(storage, api.clone(), config.queue().storage_key()));

    let (monitor, _probe) = ProbeConnectivityMonitor::spawn(client, ProbeConfig::from_app_config(&config));
    let replay = spawn_replay_trigger(queue.clone(), &monitor);
    info!("✅  Initialized offline check-in replay");

    let loader = Arc::new(GeofencingContextLoader::new(api.clone()));
    let source = Arc::new(ConfiguredPositionSource::from_config(config.location()));
    let submitter = Arc::new(CheckInSubmitter::new(api, queue));
    let options = SessionOptions {
        watch: config.location().watch_options(),
        single_shot: config.location().single_shot_options(),
    };

    let mut session = CheckInSession::open(loader, source, submitter, options, mode, mission).await;
    if let Some(guidance) = session.next_guidance().await {
        log_guidance(&guidance);
    }

    match session.submit().await {
        Ok(outcome) => info!("🔥 {}", outcome.message()),
        Err(e) => error!("❌ {}", e),
    }
    session.close();

    info!("🔥 {} keeps syncing offline check-ins, press Ctrl+C to stop", env!("CARGO_PKG_NAME"));
    tokio::signal::ctrl_c().await?;
    replay.abort();

    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<(CheckInMode, Option<String>), Box<dyn Error>> {
    match args.next().as_deref() {
        None | Some("office") => Ok((CheckInMode::Office, None)),
        Some("mission") => Ok((CheckInMode::Mission, args.next())),
        Some(other) => Err(format!("unknown mode '{}', expected 'office' or 'mission <order-number>'", other).into()),
    }
}

fn log_guidance(guidance: &Guidance) {
    if let Some(error) = &guidance.context_error {
        warn!("⚠️ {}", error);
    }

    if let Some(error) = &guidance.location_error {
        warn!("⚠️ {}", error);
    }

    match &guidance.zone {
        Some(Ok(zone)) => match &guidance.proximity {
            Some(proximity) => info!(
                zone_type = ?zone.zone_type(),
                distance_m = ?proximity.distance_meters,
                inside = ?proximity.is_inside,
                "📍 Nearest zone '{}'",
                zone.label
            ),
            None => info!(zone_type = ?zone.zone_type(), "📍 Zone '{}'", zone.label),
        },
        Some(Err(reason)) => warn!("⚠️ {}", reason),
        None => {}
    }
}
