//! Height fields: scalar elevation over the XY plane.
//!
//! A [`HeightField`] is a pure function `(x, y) -> z` together with its two
//! first partial derivatives. [`GaussianField`] is the isotropic bump
//!
//! ```text
//! z = amplitude * exp(-(x² + y²) / (2σ²))
//! ```
//!
//! and [`HeightFieldSurface`] exposes any field over a rectangular domain as a
//! [`Surface`] so it can be tessellated.

use super::core::{Point3, Vec3};
use super::surface::Surface;
use super::tangent::TangentPlane;

/// Errors raised when constructing a height field from user parameters.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum HeightFieldError {
    #[error("gaussian amplitude must be finite, got {0}")]
    InvalidAmplitude(f64),
    #[error("gaussian sigma must be finite and > 0, got {0}")]
    InvalidSigma(f64),
    #[error("height field domain [{min}, {max}] must be finite and non-empty")]
    InvalidDomain { min: f64, max: f64 },
}

/// A smooth elevation function over all of ℝ².
pub trait HeightField {
    fn height(&self, x: f64, y: f64) -> f64;

    fn partial_x(&self, x: f64, y: f64) -> f64;

    fn partial_y(&self, x: f64, y: f64) -> f64;

    /// `(∂z/∂x, ∂z/∂y)` at `(x, y)`.
    #[must_use]
    fn gradient(&self, x: f64, y: f64) -> (f64, f64) {
        (self.partial_x(x, y), self.partial_y(x, y))
    }

    /// The point `(x, y, height(x, y))` on the graph of the field.
    #[must_use]
    fn point_at(&self, x: f64, y: f64) -> Point3 {
        Point3::new(x, y, self.height(x, y))
    }

    /// Unit normal of the graph, `(-∂x, -∂y, 1) / ‖·‖`.
    #[must_use]
    fn normal_at(&self, x: f64, y: f64) -> Vec3 {
        let (dx, dy) = self.gradient(x, y);
        Vec3::new(-dx, -dy, 1.0).normalized().unwrap_or(Vec3::Z)
    }

    /// Tangent plane at `(x0, y0)` lifted by `bias`; see [`TangentPlane::at`].
    #[must_use]
    fn tangent_plane(&self, x0: f64, y0: f64, bias: f64) -> TangentPlane
    where
        Self: Sized,
    {
        TangentPlane::at(self, x0, y0, bias)
    }
}

/// Isotropic Gaussian bump centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianField {
    amplitude: f64,
    sigma: f64,
}

impl GaussianField {
    pub const DEFAULT_AMPLITUDE: f64 = 2.0;
    pub const DEFAULT_SIGMA: f64 = 1.0;

    pub fn new(amplitude: f64, sigma: f64) -> Result<Self, HeightFieldError> {
        if !amplitude.is_finite() {
            return Err(HeightFieldError::InvalidAmplitude(amplitude));
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(HeightFieldError::InvalidSigma(sigma));
        }
        Ok(Self { amplitude, sigma })
    }

    #[must_use]
    pub const fn amplitude(&self) -> f64 {
        self.amplitude
    }

    #[must_use]
    pub const fn sigma(&self) -> f64 {
        self.sigma
    }

    fn envelope(&self, x: f64, y: f64) -> f64 {
        (-(x * x + y * y) / (2.0 * self.sigma * self.sigma)).exp()
    }
}

impl Default for GaussianField {
    fn default() -> Self {
        Self {
            amplitude: Self::DEFAULT_AMPLITUDE,
            sigma: Self::DEFAULT_SIGMA,
        }
    }
}

impl HeightField for GaussianField {
    fn height(&self, x: f64, y: f64) -> f64 {
        self.amplitude * self.envelope(x, y)
    }

    fn partial_x(&self, x: f64, y: f64) -> f64 {
        -self.amplitude * (x / (self.sigma * self.sigma)) * self.envelope(x, y)
    }

    fn partial_y(&self, x: f64, y: f64) -> f64 {
        -self.amplitude * (y / (self.sigma * self.sigma)) * self.envelope(x, y)
    }
}

/// A height field restricted to `x_range × y_range`, parametrized directly by
/// `(u, v) = (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightFieldSurface<F> {
    field: F,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl<F: HeightField> HeightFieldSurface<F> {
    pub fn new(
        field: F,
        x_range: (f64, f64),
        y_range: (f64, f64),
    ) -> Result<Self, HeightFieldError> {
        for (min, max) in [x_range, y_range] {
            if !min.is_finite() || !max.is_finite() || min >= max {
                return Err(HeightFieldError::InvalidDomain { min, max });
            }
        }
        Ok(Self {
            field,
            x_range,
            y_range,
        })
    }

    /// Square domain `[-half_extent, half_extent]²`.
    pub fn centered(field: F, half_extent: f64) -> Result<Self, HeightFieldError> {
        Self::new(field, (-half_extent, half_extent), (-half_extent, half_extent))
    }

    #[must_use]
    pub const fn field(&self) -> &F {
        &self.field
    }
}

impl<F: HeightField> Surface for HeightFieldSurface<F> {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.field.point_at(u, v)
    }

    fn domain_u(&self) -> (f64, f64) {
        self.x_range
    }

    fn domain_v(&self) -> (f64, f64) {
        self.y_range
    }

    fn partial_derivatives_at(&self, u: f64, v: f64) -> (Vec3, Vec3) {
        let (dx, dy) = self.field.gradient(u, v);
        (Vec3::new(1.0, 0.0, dx), Vec3::new(0.0, 1.0, dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_rejects_bad_parameters() {
        assert!(matches!(
            GaussianField::new(f64::NAN, 1.0),
            Err(HeightFieldError::InvalidAmplitude(_))
        ));
        assert!(matches!(
            GaussianField::new(2.0, 0.0),
            Err(HeightFieldError::InvalidSigma(_))
        ));
        assert!(matches!(
            GaussianField::new(2.0, -1.0),
            Err(HeightFieldError::InvalidSigma(_))
        ));
        assert!(GaussianField::new(-1.0, 0.5).is_ok());
    }

    #[test]
    fn surface_rejects_empty_domain() {
        let err = HeightFieldSurface::new(GaussianField::default(), (1.0, 1.0), (0.0, 1.0));
        assert!(matches!(err, Err(HeightFieldError::InvalidDomain { .. })));
    }

    #[test]
    fn gaussian_normal_points_up_at_peak() {
        let field = GaussianField::default();
        assert_eq!(field.normal_at(0.0, 0.0), Vec3::Z);
    }
}
