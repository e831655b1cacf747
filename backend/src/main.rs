mod config;
mod geometry;
mod handlers;
mod scheduler;
mod session;
mod source;
mod view_model;

use std::sync::Arc;

use anyhow::Context;
use axum::routing::get;
use axum::Router;
use serde_json::json;
use socketioxide::SocketIo;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use config::{Config, SourceKind};
use handlers::on_connect;
use source::{RemoteSource, SimSource, TelemetrySource};
use view_model::{probe_media_panel, ViewConfig};

// ─── Clock sync ───────────────────────────────────────────────────────────────

/// Dashboard clients offset their clock display against this.
async fn server_clock() -> axum::Json<serde_json::Value> {
    axum::Json(json!({ "serverTime": source::now_ms() }))
}

// ─── View configuration ───────────────────────────────────────────────────────

/// The original robot shipped three near-identical dashboard variants that
/// differed only in their panel set; here a deployment declares its set once.
fn view_config(cfg: &Config) -> ViewConfig {
    let media_panels = if cfg.panel_enabled("media") {
        vec![
            probe_media_panel("Surface Cam", &cfg.media_dir.join("Mangrove.jpg")),
            probe_media_panel("Underwater Cam", &cfg.media_dir.join("Fish.jpg")),
        ]
    } else {
        Vec::new()
    };

    ViewConfig {
        monitoring: cfg.panel_enabled("monitoring"),
        vision: cfg.panel_enabled("vision"),
        autonomous: cfg.panel_enabled("autonomous"),
        hardware: cfg.panel_enabled("hardware"),
        media_panels,
    }
}

// ─── Serve with a concrete source ─────────────────────────────────────────────

async fn serve<S>(cfg: Config, source: S) -> anyhow::Result<()>
where
    S: TelemetrySource + Clone + Send + Sync + 'static,
{
    let view = Arc::new(view_config(&cfg));
    let cfg = Arc::new(cfg);

    let (socket_layer, io) = SocketIo::builder().build_layer();

    let cfg_sock = cfg.clone();
    let view_sock = view.clone();
    io.ns("/", move |socket: socketioxide::extract::SocketRef| {
        let source = source.clone();
        let cfg = cfg_sock.clone();
        let view = view_sock.clone();
        async move {
            on_connect(socket, source, cfg, view).await;
        }
    });

    // CORS — allow all origins, the dashboard is served separately
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/sync", get(server_clock))
        .layer(socket_layer)
        .layer(cors);

    let addr = format!("0.0.0.0:{}", cfg.port);
    info!("🚀 Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

// ─── Main ─────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nathara_backend=info,socketioxide=warn".into()),
        )
        .init();

    info!("🤖 Nereus Nathara telemetry backend starting...");

    let cfg = Config::default();
    info!(
        "Refresh {}ms, fetch timeout {}ms, trajectory cap {}, source {:?}",
        cfg.refresh.as_millis(),
        cfg.fetch_timeout.as_millis(),
        cfg.trajectory_cap,
        cfg.source,
    );

    match cfg.source {
        SourceKind::Sim => serve(cfg, SimSource::new()).await,
        SourceKind::Remote => {
            let source = RemoteSource::new(
                &cfg.remote_url,
                cfg.remote_key.clone(),
                cfg.fetch_timeout,
            )?;
            serve(cfg, source).await
        }
    }
}
