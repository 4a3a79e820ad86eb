//! First-order tangent planes of a height field.
//!
//! [`TangentPlane::at`] evaluates a field and its gradient at an anchor
//! `(x0, y0)` and yields
//!
//! ```text
//! z(x, y) = z0 + bias + dx * (x - x0) + dy * (y - y0)
//! ```
//!
//! The `bias` lifts the plane slightly off the surface so the two do not
//! z-fight when drawn together; it is purely presentational and defaults to
//! [`TangentPlaneOptions::DEFAULT_BIAS`].

use serde::{Deserialize, Serialize};

use super::core::{Point3, Vec3};
use super::heightfield::HeightField;
use super::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TangentPlaneOptions {
    /// Vertical offset added to the plane.
    pub bias: f64,
    /// Side length of the square patch drawn around the anchor.
    pub patch_size: f64,
    /// Grid samples per side when tessellating the patch.
    pub resolution: usize,
}

impl TangentPlaneOptions {
    pub const DEFAULT_BIAS: f64 = 0.1;
    pub const DEFAULT_PATCH_SIZE: f64 = 1.5;
    pub const DEFAULT_RESOLUTION: usize = 10;

    pub fn validate(&self) -> Result<(), String> {
        if !self.bias.is_finite() {
            return Err(format!("tangent plane bias must be finite, got {}", self.bias));
        }
        if !self.patch_size.is_finite() || self.patch_size <= 0.0 {
            return Err(format!(
                "tangent patch size must be finite and > 0, got {}",
                self.patch_size
            ));
        }
        if self.resolution < 2 {
            return Err(format!(
                "tangent patch resolution must be at least 2, got {}",
                self.resolution
            ));
        }
        Ok(())
    }
}

impl Default for TangentPlaneOptions {
    fn default() -> Self {
        Self {
            bias: Self::DEFAULT_BIAS,
            patch_size: Self::DEFAULT_PATCH_SIZE,
            resolution: Self::DEFAULT_RESOLUTION,
        }
    }
}

/// Linear approximation of a height field around an anchor point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentPlane {
    anchor: Point3,
    dx: f64,
    dy: f64,
    bias: f64,
}

impl TangentPlane {
    /// Tangent plane of `field` at `(x0, y0)`, lifted by `bias`.
    #[must_use]
    pub fn at(field: &impl HeightField, x0: f64, y0: f64, bias: f64) -> Self {
        let anchor = field.point_at(x0, y0);
        let (dx, dy) = field.gradient(x0, y0);
        log::trace!(
            "tangent plane at ({x0}, {y0}): z0={} dx={dx} dy={dy} bias={bias}",
            anchor.z
        );
        Self {
            anchor,
            dx,
            dy,
            bias,
        }
    }

    /// The point on the field the plane touches (without the bias).
    #[must_use]
    pub const fn anchor(&self) -> Point3 {
        self.anchor
    }

    /// Slopes `(∂z/∂x, ∂z/∂y)` at the anchor.
    #[must_use]
    pub const fn slopes(&self) -> (f64, f64) {
        (self.dx, self.dy)
    }

    #[must_use]
    pub const fn bias(&self) -> f64 {
        self.bias
    }

    #[must_use]
    pub fn normal(&self) -> Vec3 {
        self.normal_at(self.anchor.x, self.anchor.y)
    }

    /// Square patch of side `size` centered on the anchor.
    #[must_use]
    pub const fn patch(&self, size: f64) -> TangentPatch {
        TangentPatch { plane: *self, size }
    }
}

impl HeightField for TangentPlane {
    fn height(&self, x: f64, y: f64) -> f64 {
        self.anchor.z + self.bias + self.dx * (x - self.anchor.x) + self.dy * (y - self.anchor.y)
    }

    fn partial_x(&self, _x: f64, _y: f64) -> f64 {
        self.dx
    }

    fn partial_y(&self, _x: f64, _y: f64) -> f64 {
        self.dy
    }
}

/// Bounded piece of a [`TangentPlane`], parametrized over `[0, 1]²` with
/// `(0.5, 0.5)` at the anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentPatch {
    plane: TangentPlane,
    size: f64,
}

impl TangentPatch {
    #[must_use]
    pub const fn plane(&self) -> &TangentPlane {
        &self.plane
    }

    #[must_use]
    pub const fn size(&self) -> f64 {
        self.size
    }
}

impl Surface for TangentPatch {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        let anchor = self.plane.anchor();
        let x = anchor.x + (u - 0.5) * self.size;
        let y = anchor.y + (v - 0.5) * self.size;
        self.plane.point_at(x, y)
    }

    fn partial_derivatives_at(&self, _u: f64, _v: f64) -> (Vec3, Vec3) {
        let (dx, dy) = self.plane.slopes();
        (
            Vec3::new(self.size, 0.0, dx * self.size),
            Vec3::new(0.0, self.size, dy * self.size),
        )
    }
}
