//! The Big Dipper asterism drawn on the image plane under the Gaussian.

use std::f64::consts::FRAC_PI_4;

use crate::geom::{Point3, Segment3, Transform, Vec3};

/// Approximate plane positions of Alkaid, Mizar, Alioth, Megrez, Phecda,
/// Dubhe and Merak, in drawing order.
pub const BIG_DIPPER: [[f64; 2]; 7] = [
    [-1.8, 1.2],
    [-0.8, 1.0],
    [-0.2, 0.7],
    [0.5, 0.5],
    [1.0, 1.0],
    [2.0, 0.7],
    [1.5, 0.2],
];

/// Index of Alioth, the star the layout is centered on.
pub const ALIOTH: usize = 2;

/// Star positions recentered on Alioth and turned 45° about +Z.
#[must_use]
pub fn big_dipper() -> Vec<Point3> {
    let [cx, cy] = BIG_DIPPER[ALIOTH];
    let layout = Transform::rotate_z(FRAC_PI_4) * Transform::translate(Vec3::new(-cx, -cy, 0.0));
    BIG_DIPPER
        .iter()
        .map(|&[x, y]| layout.apply_point(Point3::new(x, y, 0.0)))
        .collect()
}

/// Segments joining consecutive points.
#[must_use]
pub fn polyline_segments(points: &[Point3]) -> Vec<Segment3> {
    points
        .windows(2)
        .map(|w| Segment3::new(w[0], w[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Tolerance;

    #[test]
    fn alioth_lands_on_origin() {
        let stars = big_dipper();
        assert_eq!(stars.len(), 7);
        assert!(Tolerance::DEFAULT.approx_eq_point3(stars[ALIOTH], Point3::ORIGIN));
    }

    #[test]
    fn layout_preserves_star_distances() {
        let stars = big_dipper();
        let raw = |i: usize| Point3::new(BIG_DIPPER[i][0], BIG_DIPPER[i][1], 0.0);
        for i in 1..stars.len() {
            let before = raw(i - 1).distance_to(raw(i));
            let after = stars[i - 1].distance_to(stars[i]);
            assert!(Tolerance::DEFAULT.approx_eq_f64(before, after));
        }
    }

    #[test]
    fn dipper_has_six_segments() {
        assert_eq!(polyline_segments(&big_dipper()).len(), 6);
        assert!(polyline_segments(&[]).is_empty());
    }
}
