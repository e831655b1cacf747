//! Per-connection session state: arena selection, rolling trajectory and the
//! latest snapshot of each telemetry kind.
//!
//! A session has exactly one writer (its refresh loop); the Socket.IO handler
//! only touches it for arena selection. Sessions never share state with each
//! other — the only process-wide shared data is the immutable geometry table.

use nathara_types::{
    ArenaId, AutonomousSnapshot, MonitoringSnapshot, Point2D, TelemetrySnapshot, VisionSnapshot,
};

/// Mutable state for one dashboard session.
#[derive(Debug, Clone)]
pub struct SessionState {
    current_arena: ArenaId,
    trajectory: Vec<Point2D>,
    trajectory_cap: usize,
    last_monitoring: Option<MonitoringSnapshot>,
    last_vision: Option<VisionSnapshot>,
    last_autonomous: Option<AutonomousSnapshot>,
    /// Per-tick fetch faults, overwritten each refresh cycle.
    faults: Vec<String>,
}

impl SessionState {
    pub fn new(arena: ArenaId, trajectory_cap: usize) -> Self {
        Self {
            current_arena: arena,
            trajectory: Vec::new(),
            trajectory_cap,
            last_monitoring: None,
            last_vision: None,
            last_autonomous: None,
            faults: Vec::new(),
        }
    }

    pub fn arena(&self) -> ArenaId {
        self.current_arena
    }

    pub fn trajectory(&self) -> &[Point2D] {
        &self.trajectory
    }

    pub fn last_monitoring(&self) -> Option<&MonitoringSnapshot> {
        self.last_monitoring.as_ref()
    }

    pub fn last_vision(&self) -> Option<&VisionSnapshot> {
        self.last_vision.as_ref()
    }

    pub fn last_autonomous(&self) -> Option<&AutonomousSnapshot> {
        self.last_autonomous.as_ref()
    }

    pub fn faults(&self) -> &[String] {
        &self.faults
    }

    /// Switch the selected arena. A changed selection starts the session
    /// over: trajectory and snapshot slots are cleared so the next tick
    /// renders against the new field only. Reselecting the current arena is
    /// a no-op. Returns whether the selection changed.
    pub fn select_arena(&mut self, id: ArenaId) -> bool {
        if id == self.current_arena {
            return false;
        }
        self.current_arena = id;
        self.trajectory.clear();
        self.last_monitoring = None;
        self.last_vision = None;
        self.last_autonomous = None;
        self.faults.clear();
        true
    }

    /// Append a position to the trajectory. No deduplication, order
    /// preserved. Oldest points are evicted FIFO once the capacity is
    /// reached; capacity 0 means unbounded.
    pub fn record_position(&mut self, p: Point2D) {
        self.trajectory.push(p);
        if self.trajectory_cap > 0 && self.trajectory.len() > self.trajectory_cap {
            self.trajectory.remove(0);
        }
    }

    /// Overwrite the slot matching the snapshot's kind.
    pub fn record_snapshot(&mut self, snap: TelemetrySnapshot) {
        match snap {
            TelemetrySnapshot::Monitoring(s) => self.last_monitoring = Some(s),
            TelemetrySnapshot::Vision(s) => self.last_vision = Some(s),
            TelemetrySnapshot::Autonomous(s) => self.last_autonomous = Some(s),
        }
    }

    /// Replace the per-tick fault list (fetch errors downgraded to
    /// indicators).
    pub fn set_faults(&mut self, faults: Vec<String>) {
        self.faults = faults;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nathara_types::{SteeringCommand, Zone};

    fn monitoring(x: f64, y: f64) -> MonitoringSnapshot {
        MonitoringSnapshot {
            captured_at_ms: 0,
            day: "Monday".into(),
            date: "01-01-2026".into(),
            time: "00:00:00".into(),
            position: Point2D::new(x, y),
            latitude: 1.0,
            longitude: 104.0,
            yaw_deg: 0.0,
            cog_deg: 0.0,
            sog_knot: 0.0,
            sog_kmh: 0.0,
            battery_pct: [100.0; 5],
        }
    }

    fn autonomous() -> AutonomousSnapshot {
        AutonomousSnapshot {
            captured_at_ms: 0,
            left_thruster_rpm: 0.0,
            right_thruster_rpm: 0.0,
            bow_thruster_rpm: 0.0,
            left_servo_deg: 0.0,
            right_servo_deg: 0.0,
            angular: 0.0,
            linear: 0.0,
            command: SteeringCommand::Stop,
            zone: Zone::I,
            green_ball_detected: false,
            red_ball_detected: false,
        }
    }

    #[test]
    fn positions_append_in_order() {
        let mut state = SessionState::new(ArenaId::A, 0);
        state.record_position(Point2D::new(1.0, 2.0));
        state.record_position(Point2D::new(3.0, 4.0));
        assert_eq!(
            state.trajectory(),
            &[Point2D::new(1.0, 2.0), Point2D::new(3.0, 4.0)]
        );
    }

    #[test]
    fn duplicate_positions_are_kept() {
        let mut state = SessionState::new(ArenaId::A, 0);
        state.record_position(Point2D::new(5.0, 5.0));
        state.record_position(Point2D::new(5.0, 5.0));
        assert_eq!(state.trajectory().len(), 2);
    }

    #[test]
    fn arena_switch_resets_trajectory_and_snapshots() {
        let mut state = SessionState::new(ArenaId::A, 0);
        state.record_position(Point2D::new(100.0, 200.0));
        state.record_snapshot(TelemetrySnapshot::Monitoring(monitoring(100.0, 200.0)));
        state.record_snapshot(TelemetrySnapshot::Autonomous(autonomous()));

        assert!(state.select_arena(ArenaId::B));
        assert_eq!(state.arena(), ArenaId::B);
        assert!(state.trajectory().is_empty());
        assert!(state.last_monitoring().is_none());
        assert!(state.last_autonomous().is_none());
    }

    #[test]
    fn reselecting_current_arena_preserves_trajectory() {
        let mut state = SessionState::new(ArenaId::A, 0);
        state.record_position(Point2D::new(1.0, 1.0));
        assert!(!state.select_arena(ArenaId::A));
        assert_eq!(state.trajectory().len(), 1);
    }

    #[test]
    fn trajectory_evicts_oldest_at_capacity() {
        let mut state = SessionState::new(ArenaId::A, 3);
        for i in 0..5 {
            state.record_position(Point2D::new(i as f64, 0.0));
        }
        assert_eq!(
            state.trajectory(),
            &[
                Point2D::new(2.0, 0.0),
                Point2D::new(3.0, 0.0),
                Point2D::new(4.0, 0.0),
            ]
        );
    }

    #[test]
    fn snapshots_overwrite_their_slot_only() {
        let mut state = SessionState::new(ArenaId::A, 0);
        state.record_snapshot(TelemetrySnapshot::Monitoring(monitoring(1.0, 1.0)));
        state.record_snapshot(TelemetrySnapshot::Monitoring(monitoring(2.0, 2.0)));
        state.record_snapshot(TelemetrySnapshot::Autonomous(autonomous()));

        assert_eq!(
            state.last_monitoring().unwrap().position,
            Point2D::new(2.0, 2.0)
        );
        assert!(state.last_autonomous().is_some());
        assert!(state.last_vision().is_none());
    }
}
