//! robot_sim.rs — Robot motion and telemetry simulation
//!
//! Simulates one marine robot wandering its arena. The motion model is a
//! heading random walk with speed lag, so trajectories plot as smooth arcs
//! instead of uniform noise. Detection confidences and actuator values are
//! drawn fresh every tick in the ranges the real vision and autonomy stacks
//! report.

use chrono::Local;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use nathara_types::{
    AutonomousSnapshot, DetectionReading, MonitoringSnapshot, Point2D, SteeringCommand,
    VisionSnapshot, Zone,
};

/// Arena frame is [0, 2500]² cm.
const ARENA_MAX: f64 = 2500.0;

pub struct RobotSim {
    pub pos: Point2D,
    pub heading_deg: f64,
    pub speed_cms: f64,
    base_speed_cms: f64,
    pub battery_pct: [f64; 5],
    /// Reference geodetic position the arena frame is anchored at.
    anchor_lat: f64,
    anchor_lon: f64,
    t_elapsed: f64,
    heading_walk: Normal<f64>,
}

impl RobotSim {
    pub fn new(base_speed_cms: f64) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            pos: Point2D::new(
                rng.gen_range(500.0..2000.0),
                rng.gen_range(500.0..2000.0),
            ),
            heading_deg: rng.gen_range(0.0..360.0),
            speed_cms: base_speed_cms,
            base_speed_cms,
            battery_pct: [100.0; 5],
            // Batam competition venue
            anchor_lat: 1.1187,
            anchor_lon: 104.0485,
            t_elapsed: 0.0,
            heading_walk: Normal::new(0.0, 18.0).expect("valid stddev"),
        }
    }

    /// Advance the robot by dt seconds. Walls reflect the heading so the
    /// robot stays inside the arena frame.
    pub fn tick(&mut self, dt: f64) {
        let mut rng = rand::thread_rng();
        self.t_elapsed += dt;

        self.heading_deg =
            (self.heading_deg + self.heading_walk.sample(&mut rng) * dt).rem_euclid(360.0);

        // First-order speed lag toward a wandering target
        let target = self.base_speed_cms * rng.gen_range(0.6..1.4);
        self.speed_cms += (target - self.speed_cms) * (dt * 2.0).min(1.0);

        let hdg = self.heading_deg.to_radians();
        self.pos.x += self.speed_cms * hdg.sin() * dt;
        self.pos.y += self.speed_cms * hdg.cos() * dt;

        if self.pos.x < 0.0 || self.pos.x > ARENA_MAX {
            self.pos.x = self.pos.x.clamp(0.0, ARENA_MAX);
            self.heading_deg = (360.0 - self.heading_deg).rem_euclid(360.0);
        }
        if self.pos.y < 0.0 || self.pos.y > ARENA_MAX {
            self.pos.y = self.pos.y.clamp(0.0, ARENA_MAX);
            self.heading_deg = (180.0 - self.heading_deg).rem_euclid(360.0);
        }

        // Slow linear battery drain with per-bank jitter
        for bank in &mut self.battery_pct {
            *bank = (*bank - dt * 0.002 * rng.gen_range(0.5..1.5)).max(0.0);
        }
    }

    fn now_ms() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    pub fn monitoring_snapshot(&self) -> MonitoringSnapshot {
        let now = Local::now();
        let sog_kmh = self.speed_cms * 0.036; // cm/s → km/h
        MonitoringSnapshot {
            captured_at_ms: Self::now_ms(),
            day: now.format("%A").to_string(),
            date: now.format("%d-%m-%Y").to_string(),
            time: now.format("%H:%M:%S").to_string(),
            position: self.pos,
            // ~111 km per degree of latitude; arena cm offsets are tiny
            latitude: self.anchor_lat + self.pos.y / 100.0 / 111_000.0,
            longitude: self.anchor_lon + self.pos.x / 100.0 / 111_000.0,
            yaw_deg: self.heading_deg,
            cog_deg: self.heading_deg,
            sog_knot: sog_kmh / 1.852,
            sog_kmh,
            battery_pct: self.battery_pct,
        }
    }

    pub fn vision_snapshot(&self) -> VisionSnapshot {
        fn reading(rng: &mut impl Rng) -> DetectionReading {
            DetectionReading {
                confidence: rng.gen_range(0.0..0.99),
                distance_m: rng.gen_range(0.2..5.0),
            }
        }

        let mut rng = rand::thread_rng();
        VisionSnapshot {
            captured_at_ms: Self::now_ms(),
            green_ball: reading(&mut rng),
            red_ball: reading(&mut rng),
            mangrove: reading(&mut rng),
            fish: reading(&mut rng),
            avg_conf_surface: rng.gen_range(0.0..0.99),
            avg_conf_underwater: rng.gen_range(0.0..0.99),
            fps_surface: rng.gen_range(20.0..60.0),
            fps_underwater: rng.gen_range(20.0..60.0),
        }
    }

    pub fn autonomous_snapshot(&self) -> AutonomousSnapshot {
        let mut rng = rand::thread_rng();

        // Derive the zone from how deep into the field the robot is
        let center_dist = ((self.pos.x - ARENA_MAX / 2.0).powi(2)
            + (self.pos.y - ARENA_MAX / 2.0).powi(2))
        .sqrt();
        let zone = if center_dist > 900.0 {
            Zone::I
        } else if center_dist > 450.0 {
            Zone::II
        } else {
            Zone::III
        };

        let command = match rng.gen_range(0..10) {
            0..=1 => SteeringCommand::Left,
            2..=5 => SteeringCommand::Forward,
            6..=7 => SteeringCommand::Right,
            8 => SteeringCommand::Spin,
            _ => SteeringCommand::Stop,
        };

        AutonomousSnapshot {
            captured_at_ms: Self::now_ms(),
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
