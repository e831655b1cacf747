//! Socket.IO connection lifecycle.
//!
//! Every connected client gets its own isolated session: a SessionState, a
//! refresh-loop task, and a `view-update` stream. Sessions never share
//! trajectory or snapshot state. Disconnecting aborts the loop task, so an
//! in-flight fetch result is discarded with it and never mutates a torn-down
//! session.

use std::sync::Arc;

use serde_json::Value;
use socketioxide::extract::{Data, SocketRef};
use tokio::sync::RwLock;
use tracing::{info, warn};

use nathara_types::ArenaId;

use crate::config::Config;
use crate::geometry::layout_for;
use crate::scheduler::{run_session_loop, SharedSession};
use crate::session::SessionState;
use crate::source::TelemetrySource;
use crate::view_model::{build, ViewConfig};

pub async fn on_connect<S>(
    socket: SocketRef,
    source: S,
    cfg: Arc<Config>,
    view: Arc<ViewConfig>,
) where
    S: TelemetrySource + Clone + Send + Sync + 'static,
{
    let socket_id = socket.id.to_string();
    info!("Client connected: {socket_id}");

    let session: SharedSession = Arc::new(RwLock::new(SessionState::new(
        cfg.default_arena,
        cfg.trajectory_cap,
    )));

    // Initial render so the map appears before the first tick lands
    {
        let state = session.read().await;
        let vm = build(layout_for(state.arena()), &state, &view);
        let _ = socket.emit("view-update", &vm);
    }

    // Refresh loop, one per session
    let loop_handle = {
        let session = session.clone();
        let socket = socket.clone();
        let view = view.clone();
        let period = cfg.refresh;
        let fetch_timeout = cfg.fetch_timeout;
        tokio::spawn(async move {
            run_session_loop(source, session, period, fetch_timeout, view, move |vm| {
                let _ = socket.emit("view-update", vm);
            })
            .await;
        })
    };

    // ── select-arena ──────────────────────────────────────────────────────────
    {
        let session = session.clone();
        let view = view.clone();
        socket.on("select-arena", move |s: SocketRef, Data::<Value>(data)| {
            let session = session.clone();
            let view = view.clone();
            async move {
                let Some(id) = data["arena"].as_str().and_then(ArenaId::parse) else {
                    warn!("Client {}: bad arena selector: {data}", s.id);
                    return;
                };

                let mut state = session.write().await;
                if state.select_arena(id) {
                    info!("Client {}: switched to {id}", s.id);
                }
                // Re-render immediately rather than waiting out the tick
                let vm = build(layout_for(state.arena()), &state, &view);
                drop(state);
                let _ = s.emit("view-update", &vm);
            }
        });
    }

    // Teardown: abort the loop; any in-flight fetch dies with it. The
    // disconnect handler must be Clone, so it holds an AbortHandle rather
    // than the JoinHandle itself.
    let abort = loop_handle.abort_handle();
    socket.on_disconnect(move |_: SocketRef| async move {
        abort.abort();
        info!("Client disconnected, session torn down: {socket_id}");
    });
}
