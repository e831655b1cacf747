//! main.rs — Telemetry simulator entry point
//!
//! Runs two concurrent pieces:
//!   1. Physics loop: advances the robot at a fixed rate and caches the
//!      latest snapshot of each telemetry kind
//!   2. HTTP server: exposes the same `/rest/v1/{table}` read shape the
//!      hosted document store serves, so the backend's remote source can be
//!      pointed at this process unchanged
//!
//! Endpoints answer with a JSON array holding the single most-recent record,
//! mirroring an `order=created_at.desc&limit=1` store query.

mod robot_sim;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use serde_json::Value;
use tokio::sync::RwLock;
use tokio::time::interval;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use nathara_types::{AutonomousSnapshot, MonitoringSnapshot, VisionSnapshot};
use robot_sim::RobotSim;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "nathara-sim", about = "Nereus Nathara telemetry simulator")]
struct Args {
    /// HTTP listen port
    #[arg(short, long, default_value = "8090")]
    port: u16,
    /// Physics update rate in Hz
    #[arg(long, default_value = "10.0")]
    rate: f64,
    /// Nominal robot speed, cm/s
    #[arg(long, default_value = "180.0")]
    speed: f64,
    /// Simulation speed multiplier (1.0 = real-time)
    #[arg(long, default_value = "1.0")]
    multiplier: f64,
}

// ── Shared state ──────────────────────────────────────────────────────────────

struct SimState {
    sim: RobotSim,
    last_monitoring: Option<MonitoringSnapshot>,
    last_vision: Option<VisionSnapshot>,
    last_autonomous: Option<AutonomousSnapshot>,
    epoch_counter: u64,
}

type SharedState = Arc<RwLock<SimState>>;

// ── Main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "telemetry_sim=info".into()),
        )
        .init();

    let args = Args::parse();

    info!(
        "🤖 Telemetry simulator starting — {} Hz physics, {} cm/s nominal",
        args.rate, args.speed
    );

    let shared: SharedState = Arc::new(RwLock::new(SimState {
        sim: RobotSim::new(args.speed),
        last_monitoring: None,
        last_vision: None,
        last_autonomous: None,
        epoch_counter: 0,
    }));

    let sim_shared = shared.clone();
    let rate = args.rate;
    let multiplier = args.multiplier;
    tokio::spawn(async move {
        sim_loop(sim_shared, rate, multiplier).await;
    });

    let app = Router::new()
        .route("/rest/v1/monitoring", get(get_monitoring))
        .route("/rest/v1/vision", get(get_vision))
        .route("/rest/v1/autonomous", get(get_autonomous))
        .route("/health", get(|| async { "nathara-sim ok" }))
        .with_state(shared)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));

    let addr = format!("0.0.0.0:{}", args.port);
    info!("📡 Serving document-store read surface at http://{addr}/rest/v1/…");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind simulator port");
    axum::serve(listener, app).await.expect("server error");
}

// ── Physics loop ──────────────────────────────────────────────────────────────

async fn sim_loop(state: SharedState, rate_hz: f64, multiplier: f64) {
    let epoch_ms = (1000.0 / rate_hz) as u64;
    let mut ticker = interval(Duration::from_millis(epoch_ms));
    let dt = (epoch_ms as f64 / 1000.0) * multiplier;

    info!("⚓ Physics loop running at {rate_hz} Hz ({epoch_ms}ms epoch)");

    loop {
        ticker.tick().await;

        let mut s = state.write().await;
        s.sim.tick(dt);
        s.epoch_counter += 1;
        s.last_monitoring = Some(s.sim.monitoring_snapshot());
        s.last_vision = Some(s.sim.vision_snapshot());
        s.last_autonomous = Some(s.sim.autonomous_snapshot());

        if s.epoch_counter % (rate_hz as u64 * 10).max(1) == 0 {
            info!(
                "⏱ epoch={} | pos=({:.0}, {:.0}) | heading={:.0}°",
                s.epoch_counter, s.sim.pos.x, s.sim.pos.y, s.sim.heading_deg
            );
        }
    }
}

// ── Read handlers ─────────────────────────────────────────────────────────────

/// Answer like a document store: a JSON array with at most one (the latest)
/// record. Empty until the first physics epoch completes.
fn latest_as_rows<T: serde::Serialize>(latest: &Option<T>) -> Json<Value> {
    let rows = match latest {
        Some(snap) => vec![serde_json::to_value(snap).unwrap_or(Value::Null)],
        None => Vec::new(),
    };
    Json(Value::Array(rows))
}

async fn get_monitoring(State(state): State<SharedState>) -> Json<Value> {
    latest_as_rows(&state.read().await.last_monitoring)
}

async fn get_vision(State(state): State<SharedState>) -> Json<Value> {
    latest_as_rows(&state.read().await.last_vision)
}

async fn get_autonomous(State(state): State<SharedState>) -> Json<Value> {
    latest_as_rows(&state.read().await.last_autonomous)
}
