//! Telemetry source boundary.
//!
//! The engine never special-cases a backend: anything that can produce the
//! three snapshot kinds is a source. Two implementations ship here — the
//! in-process randomized generator used on the bench, and the HTTP client
//! against the hosted document store the robot publishes into.

use std::future::Future;

use chrono::Local;
use rand::Rng;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use nathara_types::{
    AutonomousSnapshot, DetectionReading, MonitoringSnapshot, Point2D, SteeringCommand,
    VisionSnapshot, Zone,
};

// ─── Errors ───────────────────────────────────────────────────────────────────

/// Fetch-path failures. All of these are downgraded to "no update this tick"
/// at the scheduler boundary; none of them abort the refresh loop.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network or backend failure; prior state is retained.
    #[error("source unavailable: {0}")]
    Unavailable(String),
    /// The bounded fetch timeout elapsed.
    #[error("fetch timed out")]
    Timeout,
    /// Fetched data failed schema validation; treated as absence.
    #[error("malformed snapshot: {0}")]
    Malformed(String),
}

// ─── Source contract ──────────────────────────────────────────────────────────

/// Produces telemetry snapshots on demand. One fetch per kind per refresh
/// cycle; each call is independently fallible so one failing kind never
/// blocks the others.
pub trait TelemetrySource: Send + Sync {
    fn fetch_monitoring(
        &self,
    ) -> impl Future<Output = Result<MonitoringSnapshot, SourceError>> + Send;
    fn fetch_vision(&self) -> impl Future<Output = Result<VisionSnapshot, SourceError>> + Send;
    fn fetch_autonomous(
        &self,
    ) -> impl Future<Output = Result<AutonomousSnapshot, SourceError>> + Send;
}

pub fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

// ─── Randomized bench source ──────────────────────────────────────────────────

/// Randomized generator matching the value ranges the robot produces. Used
/// for bench runs and UI development without hardware or a reachable store.
#[derive(Debug, Clone, Default)]
pub struct SimSource;

impl SimSource {
    pub fn new() -> Self {
        Self
    }

    fn gen_monitoring(&self) -> MonitoringSnapshot {
        let now = Local::now();
        let mut rng = rand::thread_rng();
        MonitoringSnapshot {
            captured_at_ms: now_ms(),
            day: now.format("%A").to_string(),
            date: now.format("%d-%m-%Y").to_string(),
            time: now.format("%H:%M:%S").to_string(),
            position: Point2D::new(rng.gen_range(0.0..2500.0), rng.gen_range(0.0..2500.0)),
            latitude: rng.gen_range(-90.0..90.0),
            longitude: rng.gen_range(-180.0..180.0),
            yaw_deg: rng.gen_range(0.0..360.0),
            cog_deg: rng.gen_range(0.0..360.0),
            sog_knot: rng.gen_range(0.0..100.0),
            sog_kmh: rng.gen_range(0.0..200.0),
            battery_pct: [
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
            ],
        }
    }

    fn gen_vision(&self) -> VisionSnapshot {
        fn reading(rng: &mut impl Rng) -> DetectionReading {
            DetectionReading {
                confidence: rng.gen_range(0.0..0.99),
                distance_m: rng.gen_range(0.2..5.0),
            }
        }

        let mut rng = rand::thread_rng();
        VisionSnapshot {
            captured_at_ms: now_ms(),
            green_ball: reading(&mut rng),
            red_ball: reading(&mut rng),
            mangrove: reading(&mut rng),
            fish: reading(&mut rng),
            avg_conf_surface: rng.gen_range(0.0..0.99),
            avg_conf_underwater: rng.gen_range(0.0..0.99),
            fps_surface: rng.gen_range(0.0..200.0),
            fps_underwater: rng.gen_range(0.0..200.0),
        }
    }

    fn gen_autonomous(&self) -> AutonomousSnapshot {
        let mut rng = rand::thread_rng();
        let command = match rng.gen_range(0..5) {
            0 => SteeringCommand::Left,
            1 => SteeringCommand::Forward,
            2 => SteeringCommand::Right,
            3 => SteeringCommand::Spin,
            _ => SteeringCommand::Stop,
        };
        let zone = match rng.gen_range(0..3) {
            0 => Zone::I,
            1 => Zone::II,
            _ => Zone::III,
        };
        AutonomousSnapshot {
            captured_at_ms: now_ms(),
            left_thruster_rpm: rng.gen_range(0.0..2500.0),
            right_thruster_rpm: rng.gen_range(0.0..2500.0),
            bow_thruster_rpm: rng.gen_range(0.0..2500.0),
            left_servo_deg: rng.gen_range(-90.0..90.0),
            right_servo_deg: rng.gen_range(-90.0..90.0),
            angular: rng.gen_range(0.0..100.0),
            linear: rng.gen_range(0.0..100.0),
            command,
            zone,
            green_ball_detected: rng.gen_bool(0.5),
            red_ball_detected: rng.gen_bool(0.5),
        }
    }
}

impl TelemetrySource for SimSource {
    async fn fetch_monitoring(&self) -> Result<MonitoringSnapshot, SourceError> {
        Ok(self.gen_monitoring())
    }

    async fn fetch_vision(&self) -> Result<VisionSnapshot, SourceError> {
        Ok(self.gen_vision())
    }

    async fn fetch_autonomous(&self) -> Result<AutonomousSnapshot, SourceError> {
        Ok(self.gen_autonomous())
    }
}

// ─── Remote document-store source ─────────────────────────────────────────────

/// HTTP reader against the hosted document store's REST API. Each fetch asks
/// for the single most-recent record of its table, ordered by creation time
/// descending. Requests carry a bounded timeout ≤ the refresh period.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RemoteSource {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn fetch_latest<T: DeserializeOwned>(&self, table: &str) -> Result<T, SourceError> {
        let url = format!(
            "{}/rest/v1/{table}?select=*&order=created_at.desc&limit=1",
            self.base_url
        );
        let mut req = self.client.get(&url);
        if let Some(key) = &self.api_key {
            req = req.header("apikey", key);
        }

        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout
            } else {
                SourceError::Unavailable(e.to_string())
            }
        })?;

        if !resp.status().is_success() {
            return Err(SourceError::Unavailable(format!(
                "{table}: HTTP {}",
                resp.status()
            )));
        }

        let rows: Vec<serde_json::Value> = resp
            .json()
            .await
            .map_err(|e| SourceError::Malformed(format!("{table}: {e}")))?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::Unavailable(format!("{table}: no records")))?;

        debug!("fetched latest {table} record");
        serde_json::from_value(row).map_err(|e| SourceError::Malformed(format!("{table}: {e}")))
    }
}

impl TelemetrySource for RemoteSource {
    async fn fetch_monitoring(&self) -> Result<MonitoringSnapshot, SourceError> {
        self.fetch_latest("monitoring").await
    }

    async fn fetch_vision(&self) -> Result<VisionSnapshot, SourceError> {
        self.fetch_latest("vision").await
    }

    async fn fetch_autonomous(&self) -> Result<AutonomousSnapshot, SourceError> {
        self.fetch_latest("autonomous").await
    }
}
