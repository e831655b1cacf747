//! Static arena geometry tables.
//!
//! Coordinates are competition-fixed and must match the official field layout
//! exactly. The red/green ball sets swap sides between Arena A and Arena B
//! (the dock color differs per arena, so the marker colors near the dock
//! differ too) — the asymmetry is intentional, do not normalize it.

use nathara_types::{
    ArenaId, ArenaLayout, BallColor, BallMarker, MarkerColor, MarkerRect, MarkerRole, Point2D,
    Zone,
};

const fn rect(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    role: MarkerRole,
    color: MarkerColor,
) -> MarkerRect {
    MarkerRect { origin: Point2D::new(x, y), width, height, role, color }
}

const fn ball(x: f64, y: f64, color: BallColor, zone: Zone) -> BallMarker {
    BallMarker { position: Point2D::new(x, y), color, zone }
}

static LAYOUT_A: ArenaLayout = ArenaLayout {
    id: ArenaId::A,
    markers: [
        rect(2100.0, 65.0, 170.0, 100.0, MarkerRole::Dock, MarkerColor::Red),
        rect(520.0, 300.0, 100.0, 50.0, MarkerRole::Fish, MarkerColor::Blue),
        rect(300.0, 620.0, 100.0, 50.0, MarkerRole::Mangrove, MarkerColor::Green),
    ],
    balls: [
        // Red, zones I / II / III
        ball(180.0, 960.0, BallColor::Red, Zone::I),
        ball(180.0, 1310.0, BallColor::Red, Zone::I),
        ball(300.0, 1715.0, BallColor::Red, Zone::I),
        ball(1040.0, 2100.0, BallColor::Red, Zone::II),
        ball(1200.0, 2100.0, BallColor::Red, Zone::II),
        ball(1360.0, 2100.0, BallColor::Red, Zone::II),
        ball(1520.0, 2100.0, BallColor::Red, Zone::II),
        ball(2175.0, 1465.0, BallColor::Red, Zone::III),
        ball(2030.0, 1160.0, BallColor::Red, Zone::III),
        ball(2110.0, 855.0, BallColor::Red, Zone::III),
        // Green, zones I / II / III
        ball(330.0, 960.0, BallColor::Green, Zone::I),
        ball(330.0, 1310.0, BallColor::Green, Zone::I),
        ball(450.0, 1715.0, BallColor::Green, Zone::I),
        ball(1040.0, 2250.0, BallColor::Green, Zone::II),
        ball(1200.0, 2250.0, BallColor::Green, Zone::II),
        ball(1360.0, 2250.0, BallColor::Green, Zone::II),
        ball(1520.0, 2250.0, BallColor::Green, Zone::II),
        ball(2325.0, 1465.0, BallColor::Green, Zone::III),
        ball(2180.0, 1160.0, BallColor::Green, Zone::III),
        ball(2260.0, 855.0, BallColor::Green, Zone::III),
    ],
};

static LAYOUT_B: ArenaLayout = ArenaLayout {
    id: ArenaId::B,
    markers: [
        rect(250.0, 65.0, 170.0, 100.0, MarkerRole::Dock, MarkerColor::Green),
        rect(1880.0, 300.0, 100.0, 50.0, MarkerRole::Fish, MarkerColor::Blue),
        rect(2100.0, 620.0, 100.0, 50.0, MarkerRole::Mangrove, MarkerColor::Green),
    ],
    balls: [
        // Red, zones I / II / III
        ball(390.0, 855.0, BallColor::Red, Zone::I),
        ball(470.0, 1160.0, BallColor::Red, Zone::I),
        ball(325.0, 1465.0, BallColor::Red, Zone::I),
        ball(980.0, 2100.0, BallColor::Red, Zone::II),
        ball(1140.0, 2100.0, BallColor::Red, Zone::II),
        ball(1300.0, 2100.0, BallColor::Red, Zone::II),
        ball(1460.0, 2100.0, BallColor::Red, Zone::II),
        ball(2200.0, 1715.0, BallColor::Red, Zone::III),
        ball(2320.0, 1310.0, BallColor::Red, Zone::III),
        ball(2320.0, 960.0, BallColor::Red, Zone::III),
        // Green, zones I / II / III
        ball(240.0, 855.0, BallColor::Green, Zone::I),
        ball(320.0, 1160.0, BallColor::Green, Zone::I),
        ball(175.0, 1465.0, BallColor::Green, Zone::I),
        ball(980.0, 2250.0, BallColor::Green, Zone::II),
        ball(1140.0, 2250.0, BallColor::Green, Zone::II),
        ball(1300.0, 2250.0, BallColor::Green, Zone::II),
        ball(1460.0, 2250.0, BallColor::Green, Zone::II),
        ball(2050.0, 1715.0, BallColor::Green, Zone::III),
        ball(2170.0, 1310.0, BallColor::Green, Zone::III),
        ball(2170.0, 960.0, BallColor::Green, Zone::III),
    ],
};

/// Total, deterministic lookup over the closed ArenaId enum. Every call
/// returns the same `'static` layout value.
pub fn layout_for(id: ArenaId) -> &'static ArenaLayout {
    match id {
        ArenaId::A => &LAYOUT_A,
        ArenaId::B => &LAYOUT_B,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_stable() {
        assert_eq!(layout_for(ArenaId::A), layout_for(ArenaId::A));
        assert_eq!(layout_for(ArenaId::B), layout_for(ArenaId::B));
        assert!(std::ptr::eq(layout_for(ArenaId::A), layout_for(ArenaId::A)));
    }

    #[test]
    fn each_arena_has_ten_balls_per_color() {
        for id in [ArenaId::A, ArenaId::B] {
            let layout = layout_for(id);
            assert_eq!(layout.balls_of(BallColor::Red).count(), 10);
            assert_eq!(layout.balls_of(BallColor::Green).count(), 10);
        }
    }

    #[test]
    fn balls_partition_three_four_three_across_zones() {
        for id in [ArenaId::A, ArenaId::B] {
            let layout = layout_for(id);
            for color in [BallColor::Red, BallColor::Green] {
                let count = |z: Zone| {
                    layout.balls_of(color).filter(|b| b.zone == z).count()
                };
                assert_eq!(count(Zone::I), 3, "{id} {color:?} zone I");
                assert_eq!(count(Zone::II), 4, "{id} {color:?} zone II");
                assert_eq!(count(Zone::III), 3, "{id} {color:?} zone III");
            }
        }
    }

    #[test]
    fn dock_rectangles_match_field_layout() {
        let a = layout_for(ArenaId::A).dock();
        assert_eq!(a.origin, Point2D::new(2100.0, 65.0));
        assert_eq!((a.width, a.height), (170.0, 100.0));
        assert_eq!(a.color, MarkerColor::Red);

        let b = layout_for(ArenaId::B).dock();
        assert_eq!(b.origin, Point2D::new(250.0, 65.0));
        assert_eq!((b.width, b.height), (170.0, 100.0));
        assert_eq!(b.color, MarkerColor::Green);
    }

    #[test]
    fn arenas_are_mirrored_not_identical() {
        let a = layout_for(ArenaId::A);
        let b = layout_for(ArenaId::B);
        assert_ne!(a.balls, b.balls);
        assert_ne!(a.markers, b.markers);
    }
}
