//! Radial blast law for rescue container detonation
//!
//! Impulse decays as `BLAST_STRENGTH / (distance + BLAST_SOFTENING)` and is
//! cut off entirely at `BLAST_RADIUS`.

use glam::Vec2;

use crate::consts::{BLAST_RADIUS, BLAST_SOFTENING, BLAST_STRENGTH};

/// Impulse magnitude at a given distance from the blast center
#[inline]
pub fn blast_magnitude(distance: f32) -> f32 {
    BLAST_STRENGTH / (distance + BLAST_SOFTENING)
}

/// Impulse for a grain at `offset` from the blast center
///
/// Returns `None` outside the blast radius. A grain sitting exactly on the
/// center has no direction to be pushed in and receives a zero impulse.
pub fn blast_impulse(offset: Vec2) -> Option<Vec2> {
    let distance = offset.length();
    if distance >= BLAST_RADIUS {
        return None;
    }
    Some(offset.normalize_or_zero() * blast_magnitude(distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_blast_points_away_from_center() {
        let impulse = blast_impulse(Vec2::new(1.0, 0.0)).unwrap();
        assert!(impulse.x > 0.0);
        assert!(impulse.y.abs() < 1e-6);
        assert!((impulse.length() - 20.0 / 1.1).abs() < 1e-4);
    }

    #[test]
    fn test_blast_cutoff() {
        assert!(blast_impulse(Vec2::new(2.0, 0.0)).is_none());
        assert!(blast_impulse(Vec2::new(1.5, 1.5)).is_none());
        assert!(blast_impulse(Vec2::new(1.99, 0.0)).is_some());
    }

    #[test]
    fn test_blast_at_center_is_bounded() {
        assert!((blast_magnitude(0.0) - 200.0).abs() < 1e-3);
        assert_eq!(blast_impulse(Vec2::ZERO), Some(Vec2::ZERO));
    }

    proptest! {
        #[test]
        fn prop_magnitude_decreases_with_distance(a in 0.0f32..2.0, b in 0.0f32..2.0) {
            prop_assume!((a - b).abs() > 1e-4);
            let (near, far) = if a < b { (a, b) } else { (b, a) };
            prop_assert!(blast_magnitude(near) > blast_magnitude(far));
        }

        #[test]
        fn prop_no_impulse_outside_radius(
            angle in 0.0f32..std::f32::consts::TAU,
            d in 2.0f32..50.0,
        ) {
            let offset = Vec2::new(angle.cos(), angle.sin()) * d;
            prop_assume!(offset.length() >= BLAST_RADIUS);
            prop_assert!(blast_impulse(offset).is_none());
        }
    }
}
