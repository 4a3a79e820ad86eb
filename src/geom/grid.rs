//! Grid lines over corner quads, used to draw the source and warped target
//! "images" of the correspondence demo.

use serde::Serialize;

use super::core::{Point3, Vec3};
use super::correspondence::CornerQuad;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment3 {
    pub start: [f64; 3],
    pub end: [f64; 3],
}

impl Segment3 {
    #[must_use]
    pub fn new(start: Point3, end: Point3) -> Self {
        Self {
            start: start.to_array(),
            end: end.to_array(),
        }
    }
}

impl CornerQuad {
    /// Axis-aligned square in the z = `center.z` plane.
    #[must_use]
    pub fn square(center: Point3, size: f64) -> Self {
        Self::warped(center, size, [Vec3::ZERO; 4])
    }

    /// Square of side `size` around `center` whose corners are nudged by
    /// `offsets` (ordered like the corners), simulating a perspective warp.
    #[must_use]
    pub fn warped(center: Point3, size: f64, offsets: [Vec3; 4]) -> Self {
        let h = size / 2.0;
        let base = [
            Vec3::new(-h, h, 0.0),
            Vec3::new(h, h, 0.0),
            Vec3::new(-h, -h, 0.0),
            Vec3::new(h, -h, 0.0),
        ];
        let corners = [0, 1, 2, 3].map(|i| center + base[i] + offsets[i]);
        Self::from_corners(corners)
    }
}

/// `rows + 1` lines running left→right and `cols + 1` lines running
/// top→bottom, interpolated along the quad edges.
#[must_use]
pub fn quad_grid_lines(quad: &CornerQuad, rows: usize, cols: usize) -> Vec<Segment3> {
    let rows = rows.max(1);
    let cols = cols.max(1);
    let mut lines = Vec::with_capacity(rows + cols + 2);

    for i in 0..=rows {
        let t = i as f64 / rows as f64;
        let start = quad.top_left.lerp(quad.bottom_left, t);
        let end = quad.top_right.lerp(quad.bottom_right, t);
        lines.push(Segment3::new(start, end));
    }

    for i in 0..=cols {
        let t = i as f64 / cols as f64;
        let start = quad.top_left.lerp(quad.top_right, t);
        let end = quad.bottom_left.lerp(quad.bottom_right, t);
        lines.push(Segment3::new(start, end));
    }

    lines
}
