//! Angle wrapping in degrees.

/// Wrap an angle into [0, 360).
pub fn normalize_deg(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if r >= 360.0 { r - 360.0 } else { r }
}

/// Wrap an angle into (-180, +180].
pub fn normalize_to_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Shortest angular distance between two directions, in [0, 180].
///
/// Accounts for wraparound: 359° and 1° are 2° apart.
pub fn angular_distance_deg(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_deg_range() {
        assert!((normalize_deg(370.0) - 10.0).abs() < 1e-10);
        assert!((normalize_deg(-10.0) - 350.0).abs() < 1e-10);
        assert!((normalize_deg(720.0) - 0.0).abs() < 1e-10);
        assert_eq!(normalize_deg(0.0), 0.0);
    }

    #[test]
    fn normalize_deg_tiny_negative_stays_below_360() {
        let r = normalize_deg(-1e-17);
        assert!((0.0..360.0).contains(&r), "r = {r}");
    }

    #[test]
    fn normalize_pm180_basic() {
        assert!((normalize_to_pm180(0.0) - 0.0).abs() < 1e-10);
        assert!((normalize_to_pm180(180.0) - 180.0).abs() < 1e-10);
        assert!((normalize_to_pm180(-180.0) - 180.0).abs() < 1e-10);
        assert!((normalize_to_pm180(270.0) - (-90.0)).abs() < 1e-10);
        assert!((normalize_to_pm180(-270.0) - 90.0).abs() < 1e-10);
        assert!((normalize_to_pm180(450.0) - 90.0).abs() < 1e-10);
    }

    #[test]
    fn distance_across_zero() {
        assert!((angular_distance_deg(359.0, 1.0) - 2.0).abs() < 1e-10);
        assert!((angular_distance_deg(1.0, 359.0) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn distance_symmetric_and_bounded() {
        for (a, b) in [(10.0, 200.0), (32.22, 176.19), (-90.0, 450.0)] {
            let d1 = angular_distance_deg(a, b);
            let d2 = angular_distance_deg(b, a);
            assert!((d1 - d2).abs() < 1e-10);
            assert!((0.0..=180.0).contains(&d1));
        }
    }
}
