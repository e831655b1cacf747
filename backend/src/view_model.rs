//! View-model construction: composes the static arena layout, the session's
//! trajectory and the latest snapshots into a flat, presentation-ready
//! structure with all formatting resolved.
//!
//! `build` is a pure function of its inputs — no I/O, no hidden state — so it
//! can be re-run on every refresh tick and the presentation layer re-renders
//! the whole thing wholesale.
//!
//! Display literals follow Rust `format!` rounding: round-to-nearest on the
//! exact binary value, with exactly-representable ties going to even
//! (7.25 → "7.2").

use serde::Serialize;

use nathara_types::{ArenaId, ArenaLayout, Point2D};

use crate::session::SessionState;

// ─── Panel configuration ─────────────────────────────────────────────────────

/// Which info blocks a deployment renders. The three dashboard variants of
/// the robot differ only in their enabled panel set, so this replaces
/// per-variant builds.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub monitoring: bool,
    pub vision: bool,
    pub autonomous: bool,
    pub hardware: bool,
    /// Static picture panels, probed at startup. Empty disables the block.
    pub media_panels: Vec<MediaPanel>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            monitoring: true,
            vision: true,
            autonomous: true,
            hardware: true,
            media_panels: Vec::new(),
        }
    }
}

/// One static picture panel. `Missing` renders as a visible placeholder in
/// the UI rather than aborting the refresh cycle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPanel {
    pub caption: String,
    pub state: MediaState,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MediaState {
    Ready { path: String },
    Missing,
}

// ─── View model ───────────────────────────────────────────────────────────────

/// An info block is either fully formatted data or an explicit no-data
/// marker. The first tick after an arena switch can run before any snapshot
/// arrives, so absence must render, not fail.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "camelCase")]
pub enum BlockState<T> {
    Ready(T),
    NoData,
}

impl<T> BlockState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringBlock {
    pub day: String,
    pub date: String,
    pub time: String,
    /// `"{x:.0}, {y:.0}"`
    pub position: String,
    /// `"{lat:.2}, {lon:.2}"`
    pub lat_long: String,
    /// `"{:.1} kn"`
    pub sog_knot: String,
    /// `"{:.1} km/h"`
    pub sog_kmh: String,
    /// `"{:.1} °"`
    pub cog: String,
    pub yaw: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionBlock {
    pub green_ball_conf: String,
    pub red_ball_conf: String,
    pub mangrove_conf: String,
    pub fish_conf: String,
    pub green_ball_dist: String,
    pub red_ball_dist: String,
    pub mangrove_dist: String,
    pub fish_dist: String,
    pub avg_conf_surface: String,
    pub avg_conf_underwater: String,
    pub fps_surface: String,
    pub fps_underwater: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutonomousBlock {
    /// `"{:.0} RPM"`
    pub left_thruster: String,
    pub bow_thruster: String,
    pub right_thruster: String,
    /// `"{:.0} °"`
    pub left_servo: String,
    pub right_servo: String,
    pub angular: String,
    pub linear: String,
    pub command: String,
    pub zone: String,
    pub green_ball_detected: bool,
    pub red_ball_detected: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareBlock {
    /// Five battery banks, `"{:.1} %"` each, display order 1–5.
    pub batteries: [String; 5],
}

/// Complete, re-renderable presentation state for one session, emitted
/// wholesale on every refresh tick. Disabled panels serialize as `null`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub arena: ArenaId,
    pub layout: ArenaLayout,
    pub trajectory: Vec<Point2D>,
    pub monitoring: Option<BlockState<MonitoringBlock>>,
    pub vision: Option<BlockState<VisionBlock>>,
    pub autonomous: Option<BlockState<AutonomousBlock>>,
    pub hardware: Option<BlockState<HardwareBlock>>,
    pub media: Vec<MediaPanel>,
    /// Non-fatal fetch faults from the last cycle, empty when healthy.
    pub faults: Vec<String>,
}

// ─── Builder ─────────────────────────────────────────────────────────────────

pub fn build(layout: &ArenaLayout, state: &SessionState, cfg: &ViewConfig) -> ViewModel {
    let monitoring = cfg.monitoring.then(|| {
        match state.last_monitoring() {
            Some(m) => BlockState::Ready(MonitoringBlock {
                day: m.day.clone(),
                date: m.date.clone(),
                time: m.time.clone(),
                position: format!("{:.0}, {:.0}", m.position.x, m.position.y),
                lat_long: format!("{:.2}, {:.2}", m.latitude, m.longitude),
                sog_knot: format!("{:.1} kn", m.sog_knot),
                sog_kmh: format!("{:.1} km/h", m.sog_kmh),
                cog: format!("{:.1} °", m.cog_deg),
                yaw: format!("{:.1} °", m.yaw_deg),
            }),
            None => BlockState::NoData,
        }
    });

    let vision = cfg.vision.then(|| {
        match state.last_vision() {
            Some(v) => BlockState::Ready(VisionBlock {
                green_ball_conf: format!("{:.2}", v.green_ball.confidence),
                red_ball_conf: format!("{:.2}", v.red_ball.confidence),
                mangrove_conf: format!("{:.2}", v.mangrove.confidence),
                fish_conf: format!("{:.2}", v.fish.confidence),
                green_ball_dist: format!("{:.2} m", v.green_ball.distance_m),
                red_ball_dist: format!("{:.2} m", v.red_ball.distance_m),
                mangrove_dist: format!("{:.2} m", v.mangrove.distance_m),
                fish_dist: format!("{:.2} m", v.fish.distance_m),
                avg_conf_surface: format!("{:.2}", v.avg_conf_surface),
                avg_conf_underwater: format!("{:.2}", v.avg_conf_underwater),
                fps_surface: format!("{:.1}", v.fps_surface),
                fps_underwater: format!("{:.1}", v.fps_underwater),
            }),
            None => BlockState::NoData,
        }
    });

    let autonomous = cfg.autonomous.then(|| {
        match state.last_autonomous() {
            Some(a) => BlockState::Ready(AutonomousBlock {
                left_thruster: format!("{:.0} RPM", a.left_thruster_rpm),
                bow_thruster: format!("{:.0} RPM", a.bow_thruster_rpm),
                right_thruster: format!("{:.0} RPM", a.right_thruster_rpm),
                left_servo: format!("{:.0} °", a.left_servo_deg),
                right_servo: format!("{:.0} °", a.right_servo_deg),
                angular: format!("{:.1}", a.angular),
                linear: format!("{:.1}", a.linear),
                command: a.command.to_string(),
                zone: a.zone.to_string(),
                green_ball_detected: a.green_ball_detected,
                red_ball_detected: a.red_ball_detected,
            }),
            None => BlockState::NoData,
        }
    });

    let hardware = cfg.hardware.then(|| {
        match state.last_monitoring() {
            Some(m) => BlockState::Ready(HardwareBlock {
                batteries: m.battery_pct.map(|b| format!("{b:.1} %")),
            }),
            None => BlockState::NoData,
        }
    });

    ViewModel {
        arena: state.arena(),
        layout: layout.clone(),
        trajectory: state.trajectory().to_vec(),
        monitoring,
        vision,
        autonomous,
        hardware,
        media: cfg.media_panels.clone(),
        faults: state.faults().to_vec(),
    }
}

/// Probe a media file and produce its panel entry. A missing asset becomes a
/// visible placeholder, never an error.
pub fn probe_media_panel(caption: &str, path: &std::path::Path) -> MediaPanel {
    let state = if path.is_file() {
        MediaState::Ready { path: path.display().to_string() }
    } else {
        tracing::warn!("media asset missing: {}", path.display());
        MediaState::Missing
    };
    MediaPanel { caption: caption.to_string(), state }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::layout_for;
    use nathara_types::{
        AutonomousSnapshot, DetectionReading, MonitoringSnapshot, SteeringCommand,
        TelemetrySnapshot, VisionSnapshot, Zone,
    };

    fn monitoring_at(x: f64, y: f64) -> MonitoringSnapshot {
        MonitoringSnapshot {
            captured_at_ms: 0,
            day: "Friday".into(),
            date: "28-08-2026".into(),
            time: "10:15:00".into(),
            position: Point2D::new(x, y),
            latitude: 1.119,
            longitude: 104.048,
            yaw_deg: 45.0,
            cog_deg: 187.26,
            sog_knot: 7.25,
            sog_kmh: 13.43,
            battery_pct: [99.94, 80.0, 60.5, 40.0, 20.0],
        }
    }

    #[test]
    fn empty_session_renders_no_data_markers() {
        let state = SessionState::new(ArenaId::A, 0);
        let vm = build(layout_for(ArenaId::A), &state, &ViewConfig::default());

        assert!(!vm.monitoring.unwrap().is_ready());
        assert!(!vm.vision.unwrap().is_ready());
        assert!(!vm.autonomous.unwrap().is_ready());
        assert!(!vm.hardware.unwrap().is_ready());
        assert!(vm.trajectory.is_empty());
    }

    #[test]
    fn disabled_panels_are_absent() {
        let state = SessionState::new(ArenaId::A, 0);
        let cfg = ViewConfig { vision: false, autonomous: false, ..ViewConfig::default() };
        let vm = build(layout_for(ArenaId::A), &state, &cfg);

        assert!(vm.monitoring.is_some());
        assert!(vm.vision.is_none());
        assert!(vm.autonomous.is_none());
    }

    #[test]
    fn monitoring_formatting_is_exact() {
        let mut state = SessionState::new(ArenaId::A, 0);
        state.record_snapshot(TelemetrySnapshot::Monitoring(monitoring_at(123.4, 9.96)));
        let vm = build(layout_for(ArenaId::A), &state, &ViewConfig::default());

        let block = match vm.monitoring.unwrap() {
            BlockState::Ready(b) => b,
            BlockState::NoData => panic!("expected monitoring data"),
        };
        assert_eq!(block.position, "123, 10");
        assert_eq!(block.lat_long, "1.12, 104.05");
        // 7.25 is exactly representable: ties go to even
        assert_eq!(block.sog_knot, "7.2 kn");
        assert_eq!(block.sog_kmh, "13.4 km/h");
        assert_eq!(block.cog, "187.3 °");
        assert_eq!(block.yaw, "45.0 °");
    }

    #[test]
    fn battery_levels_format_to_one_decimal() {
        let mut state = SessionState::new(ArenaId::A, 0);
        state.record_snapshot(TelemetrySnapshot::Monitoring(monitoring_at(0.0, 0.0)));
        let vm = build(layout_for(ArenaId::A), &state, &ViewConfig::default());

        let hw = match vm.hardware.unwrap() {
            BlockState::Ready(b) => b,
            BlockState::NoData => panic!("expected hardware data"),
        };
        assert_eq!(hw.batteries[0], "99.9 %");
        assert_eq!(hw.batteries[4], "20.0 %");
    }

    #[test]
    fn vision_confidence_and_distance_formatting() {
        let mut state = SessionState::new(ArenaId::A, 0);
        state.record_snapshot(TelemetrySnapshot::Vision(VisionSnapshot {
            captured_at_ms: 0,
            green_ball: DetectionReading { confidence: 0.999, distance_m: 1.5 },
            red_ball: DetectionReading { confidence: 0.5, distance_m: 0.204 },
            mangrove: DetectionReading { confidence: 0.33, distance_m: 2.0 },
            fish: DetectionReading { confidence: 0.1, distance_m: 4.99 },
            avg_conf_surface: 0.87,
            avg_conf_underwater: 0.65,
            fps_surface: 29.97,
            fps_underwater: 15.0,
        }));
        let vm = build(layout_for(ArenaId::A), &state, &ViewConfig::default());

        let block = match vm.vision.unwrap() {
            BlockState::Ready(b) => b,
            BlockState::NoData => panic!("expected vision data"),
        };
        assert_eq!(block.green_ball_conf, "1.00");
        assert_eq!(block.red_ball_dist, "0.20 m");
        assert_eq!(block.fish_dist, "4.99 m");
        assert_eq!(block.fps_surface, "30.0");
    }

    #[test]
    fn autonomous_formatting_and_flags() {
        let mut state = SessionState::new(ArenaId::B, 0);
        state.record_snapshot(TelemetrySnapshot::Autonomous(AutonomousSnapshot {
            captured_at_ms: 0,
            left_thruster_rpm: 1499.7,
            right_thruster_rpm: 800.0,
            bow_thruster_rpm: 0.0,
            left_servo_deg: -45.4,
            right_servo_deg: 45.4,
            angular: 2.5,
            linear: 60.0,
            command: SteeringCommand::Forward,
            zone: Zone::II,
            green_ball_detected: true,
            red_ball_detected: false,
        }));
        let vm = build(layout_for(ArenaId::B), &state, &ViewConfig::default());

        let block = match vm.autonomous.unwrap() {
            BlockState::Ready(b) => b,
            BlockState::NoData => panic!("expected autonomous data"),
        };
        assert_eq!(block.left_thruster, "1500 RPM");
        assert_eq!(block.left_servo, "-45 °");
        assert_eq!(block.right_servo, "45 °");
        assert_eq!(block.command, "Forward");
        assert_eq!(block.zone, "II");
        assert!(block.green_ball_detected);
        assert!(!block.red_ball_detected);
    }

    #[test]
    fn trajectory_and_layout_pass_through() {
        let mut state = SessionState::new(ArenaId::A, 0);
        state.record_position(Point2D::new(100.0, 200.0));
        state.record_position(Point2D::new(150.0, 210.0));
        let vm = build(layout_for(ArenaId::A), &state, &ViewConfig::default());

        assert_eq!(vm.arena, ArenaId::A);
        assert_eq!(vm.layout, *layout_for(ArenaId::A));
        assert_eq!(
            vm.trajectory,
            vec![Point2D::new(100.0, 200.0), Point2D::new(150.0, 210.0)]
        );
    }

    #[test]
    fn missing_media_asset_becomes_placeholder() {
        let panel = probe_media_panel(
            "Surface Cam",
            std::path::Path::new("/definitely/not/here/Mangrove.jpg"),
        );
        assert!(matches!(panel.state, MediaState::Missing));

        // Any file guaranteed to exist in the build tree
        let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let panel = probe_media_panel("Underwater Cam", &here);
        assert!(matches!(panel.state, MediaState::Ready { .. }));
    }

    #[test]
    fn faults_surface_in_view_model() {
        let mut state = SessionState::new(ArenaId::A, 0);
        state.set_faults(vec!["monitoring: source unavailable".into()]);
        let vm = build(layout_for(ArenaId::A), &state, &ViewConfig::default());
        assert_eq!(vm.faults.len(), 1);
    }
}
