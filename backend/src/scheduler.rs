//! Per-session refresh loop.
//!
//! Each cycle walks Idle → Fetching → Rendering: fetch the three snapshot
//! kinds (each under a bounded timeout), fold whatever succeeded into the
//! session, rebuild the view model, hand it to the emitter. Fetch failures
//! are downgraded to per-kind fault indicators — telemetry is a latest-value
//! stream, so a missed update simply leaves the previous value on screen.
//!
//! Overlap policy: coalesce. The loop awaits its own fetches (a session
//! never has more than one in-flight source call) and missed interval ticks
//! are skipped rather than queued.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

use nathara_types::TelemetrySnapshot;

use crate::geometry::layout_for;
use crate::session::SessionState;
use crate::source::{SourceError, TelemetrySource};
use crate::view_model::{build, ViewConfig, ViewModel};

pub type SharedSession = Arc<RwLock<SessionState>>;

/// Scheduler phase within one cycle. The single-writer discipline comes from
/// this state machine, not from locks: mutation only happens between
/// Fetching and Rendering, on the loop's own task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    Fetching,
    Rendering,
}

async fn fetch_bounded<T, F>(
    kind: &'static str,
    timeout: Duration,
    fut: F,
) -> Result<T, SourceError>
where
    F: std::future::Future<Output = Result<T, SourceError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(res) => res,
        Err(_) => {
            warn!("{kind}: fetch timed out after {}ms", timeout.as_millis());
            Err(SourceError::Timeout)
        }
    }
}

/// Run one complete refresh cycle against a session and return the view
/// model to emit. Failures never propagate: a failed kind keeps its prior
/// snapshot and contributes a fault line instead.
pub async fn run_cycle<S: TelemetrySource>(
    source: &S,
    session: &RwLock<SessionState>,
    fetch_timeout: Duration,
    view: &ViewConfig,
) -> ViewModel {
    debug!("refresh cycle: {:?}", CyclePhase::Fetching);

    // Sequential fetches keep in-flight concurrency at exactly one per
    // session; one kind failing never blocks the others.
    let monitoring = fetch_bounded("monitoring", fetch_timeout, source.fetch_monitoring()).await;
    let vision = fetch_bounded("vision", fetch_timeout, source.fetch_vision()).await;
    let autonomous = fetch_bounded("autonomous", fetch_timeout, source.fetch_autonomous()).await;

    let mut faults = Vec::new();
    {
        let mut state = session.write().await;
        match monitoring {
            Ok(snap) => {
                state.record_position(snap.position);
                state.record_snapshot(TelemetrySnapshot::Monitoring(snap));
            }
            Err(e) => {
                warn!("monitoring fetch failed: {e}");
                faults.push(format!("monitoring: {e}"));
            }
        }
        match vision {
            Ok(snap) => state.record_snapshot(TelemetrySnapshot::Vision(snap)),
            Err(e) => {
                warn!("vision fetch failed: {e}");
                faults.push(format!("vision: {e}"));
            }
        }
        match autonomous {
            Ok(snap) => state.record_snapshot(TelemetrySnapshot::Autonomous(snap)),
            Err(e) => {
                warn!("autonomous fetch failed: {e}");
                faults.push(format!("autonomous: {e}"));
            }
        }
        state.set_faults(faults);
    }

    debug!("refresh cycle: {:?}", CyclePhase::Rendering);

    let state = session.read().await;
    build(layout_for(state.arena()), &state, view)
}

/// Drive a session's refresh loop until the task is aborted (session
/// teardown). The emitter receives the full view model every tick; it is
/// expected to be re-render-safe, not incrementally patched.
pub async fn run_session_loop<S, F>(
    source: S,
    session: SharedSession,
    period: Duration,
    fetch_timeout: Duration,
    view: Arc<ViewConfig>,
    mut emit: F,
) where
    S: TelemetrySource,
    F: FnMut(&ViewModel) + Send,
{
    let mut ticker = interval(period);
    // Latest value wins: drop ticks we could not serve instead of queueing
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        debug!("refresh cycle: {:?}", CyclePhase::Idle);
        ticker.tick().await;
        let vm = run_cycle(&source, &session, fetch_timeout, &view).await;
        emit(&vm);
    }
}
