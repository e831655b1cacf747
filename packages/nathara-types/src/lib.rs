//! # nathara-types
//!
//! Shared telemetry and arena structures for the Nereus Nathara monitoring
//! system.
//!
//! These types are used by:
//! - `backend`: aggregating snapshots into per-session view models
//! - `telemetry-sim`: producing randomized snapshots during bench testing
//! - the robot-side publishers, which write the same JSON shapes into the
//!   hosted document store
//!
//! ## Coordinate Conventions
//!
//! - **Arena frame**: 2D Cartesian, origin at the arena's south-west corner,
//!   X east, Y north, domain [0, 2500] × [0, 2500] (units: cm)
//! - **Geographic**: WGS-84 latitude/longitude, degrees
//! - **Headings**: yaw/COG in degrees, 0 = north, wrapped to [0, 360)

use serde::{Deserialize, Serialize};

// ── Arena Identity ────────────────────────────────────────────────────────────

/// Competition field selector. The two fields are mirror images of each other
/// with swapped dock colors, so geometry is keyed on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArenaId {
    A,
    B,
}

impl ArenaId {
    /// Parse the wire value sent by the dashboard's arena selector.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "A" | "a" | "Arena A" => Some(Self::A),
            "B" | "b" | "Arena B" => Some(Self::B),
            _ => None,
        }
    }
}

impl std::fmt::Display for ArenaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "Arena A"),
            Self::B => write!(f, "Arena B"),
        }
    }
}

/// One of the three concentric navigation zones of an arena, outer to inner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zone {
    I,
    II,
    III,
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::I => write!(f, "I"),
            Self::II => write!(f, "II"),
            Self::III => write!(f, "III"),
        }
    }
}

// ── Arena Geometry ────────────────────────────────────────────────────────────

/// 2D point in the arena frame (cm).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// What a rectangular marker stands for on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarkerRole {
    Dock,
    Fish,
    Mangrove,
}

/// Painted color of a rectangular marker (display hint for the map).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Red,
    Green,
    Blue,
}

/// Axis-aligned marker rectangle, arena frame. `origin` is the south-west
/// corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerRect {
    pub origin: Point2D,
    pub width: f64,
    pub height: f64,
    pub role: MarkerRole,
    pub color: MarkerColor,
}

/// Floating ball color. Red and green sets swap sides between the arenas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BallColor {
    Red,
    Green,
}

/// One floating ball marker. Each arena carries exactly 10 red and 10 green,
/// partitioned 3/4/3 across zones I/II/III.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallMarker {
    pub position: Point2D,
    pub color: BallColor,
    pub zone: Zone,
}

/// Complete static geometry for one arena. Constructed once, never mutated,
/// shared read-only across all sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArenaLayout {
    pub id: ArenaId,
    /// Dock, fish and mangrove rectangles, in that order.
    pub markers: [MarkerRect; 3],
    /// 10 red then 10 green balls, each set ordered zone I → II → III.
    pub balls: [BallMarker; 20],
}

impl ArenaLayout {
    pub fn balls_of(&self, color: BallColor) -> impl Iterator<Item = &BallMarker> {
        self.balls.iter().filter(move |b| b.color == color)
    }

    pub fn dock(&self) -> &MarkerRect {
        &self.markers[0]
    }
}

// ── Telemetry Snapshots ───────────────────────────────────────────────────────

/// Vehicle monitoring snapshot: clock, pose and speed over ground, battery
/// bank levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringSnapshot {
    /// Capture wall-clock time, unix milliseconds.
    pub captured_at_ms: i64,
    /// Day name, e.g. "Monday".
    pub day: String,
    /// "DD-MM-YYYY"
    pub date: String,
    /// "HH:MM:SS"
    pub time: String,
    /// Arena-frame position (cm).
    pub position: Point2D,
    pub latitude: f64,
    pub longitude: f64,
    /// Degrees, [0, 360).
    pub yaw_deg: f64,
    /// Course over ground, degrees, [0, 360).
    pub cog_deg: f64,
    pub sog_knot: f64,
    pub sog_kmh: f64,
    /// Five battery bank levels, percent.
    pub battery_pct: [f64; 5],
}

/// Confidence + distance for one detection class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReading {
    /// [0, 1]
    pub confidence: f64,
    /// Meters, > 0.
    pub distance_m: f64,
}

/// Computer-vision snapshot: per-class detections plus per-camera aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionSnapshot {
    pub captured_at_ms: i64,
    pub green_ball: DetectionReading,
    pub red_ball: DetectionReading,
    pub mangrove: DetectionReading,
    pub fish: DetectionReading,
    pub avg_conf_surface: f64,
    pub avg_conf_underwater: f64,
    pub fps_surface: f64,
    pub fps_underwater: f64,
}

/// Discrete steering command from the autonomy stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SteeringCommand {
    Left,
    Forward,
    Right,
    Spin,
    Stop,
}

impl std::fmt::Display for SteeringCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "Left"),
            Self::Forward => write!(f, "Forward"),
            Self::Right => write!(f, "Right"),
            Self::Spin => write!(f, "Spin"),
            Self::Stop => write!(f, "Stop"),
        }
    }
}

/// Autonomous-control snapshot: actuator commands and navigation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutonomousSnapshot {
    pub captured_at_ms: i64,
    pub left_thruster_rpm: f64,
    pub right_thruster_rpm: f64,
    pub bow_thruster_rpm: f64,
    /// Degrees, conventionally [-90, 90].
    pub left_servo_deg: f64,
    pub right_servo_deg: f64,
    /// Angular command magnitude, ≥ 0.
    pub angular: f64,
    /// Linear command magnitude, ≥ 0.
    pub linear: f64,
    pub command: SteeringCommand,
    pub zone: Zone,
    pub green_ball_detected: bool,
    pub red_ball_detected: bool,
}

/// Tagged union of the three snapshot kinds, used where a single slot-keyed
/// write path is wanted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum TelemetrySnapshot {
    Monitoring(MonitoringSnapshot),
    Vision(VisionSnapshot),
    Autonomous(AutonomousSnapshot),
}

impl TelemetrySnapshot {
    pub fn captured_at_ms(&self) -> i64 {
        match self {
            Self::Monitoring(s) => s.captured_at_ms,
            Self::Vision(s) => s.captured_at_ms,
            Self::Autonomous(s) => s.captured_at_ms,
        }
    }
}
