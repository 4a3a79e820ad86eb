use super::core::{Point3, Tolerance, Vec3};

/// A parametric surface over a rectangular `(u, v)` domain.
pub trait Surface {
    fn point_at(&self, u: f64, v: f64) -> Point3;

    #[must_use]
    fn domain_u(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    #[must_use]
    fn domain_v(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    /// First partial derivatives `(∂P/∂u, ∂P/∂v)`.
    ///
    /// The default uses central differences with a step relative to the
    /// domain span, falling back to one-sided steps at the domain edges.
    #[must_use]
    fn partial_derivatives_at(&self, u: f64, v: f64) -> (Vec3, Vec3) {
        let (u0, u1) = self.domain_u();
        let (v0, v1) = self.domain_v();

        let u = u.clamp(u0.min(u1), u0.max(u1));
        let v = v.clamp(v0.min(v1), v0.max(v1));

        let du = central_difference(u, u0, u1, |t| self.point_at(t, v));
        let dv = central_difference(v, v0, v1, |t| self.point_at(u, t));
        (du, dv)
    }

    #[must_use]
    fn normal_at(&self, u: f64, v: f64) -> Option<Vec3> {
        let (du, dv) = self.partial_derivatives_at(u, v);
        du.cross(dv).normalized()
    }
}

fn central_difference(t: f64, start: f64, end: f64, eval: impl Fn(f64) -> Point3) -> Vec3 {
    let span = end - start;
    if !span.is_finite() || span == 0.0 {
        return Vec3::ZERO;
    }

    let h = Tolerance::DERIVATIVE.relative_to(span);
    if !h.is_finite() || h == 0.0 {
        return Vec3::ZERO;
    }

    let lo = start.min(end);
    let hi = start.max(end);
    let ta = (t - h).max(lo);
    let tb = (t + h).min(hi);
    if ta == tb {
        return Vec3::ZERO;
    }

    eval(tb).sub_point(eval(ta)).mul_scalar(1.0 / (tb - ta))
}

/// Sample `surface` on a regular `u_count × v_count` grid.
///
/// Points are ordered row-major with `u` varying fastest. Both counts are
/// clamped to at least 2 so the domain corners are always included.
#[must_use]
pub fn tessellate_surface_grid(
    surface: &impl Surface,
    u_count: usize,
    v_count: usize,
) -> Vec<Point3> {
    let (u0, u1) = surface.domain_u();
    let (v0, v1) = surface.domain_v();

    let u_count = u_count.max(2);
    let v_count = v_count.max(2);

    let u_denom = (u_count - 1) as f64;
    let v_denom = (v_count - 1) as f64;

    let mut points = Vec::with_capacity(u_count * v_count);
    for v in 0..v_count {
        let v_t = v0 + (v1 - v0) * (v as f64 / v_denom);
        for u in 0..u_count {
            let u_t = u0 + (u1 - u0) * (u as f64 / u_denom);
            points.push(surface.point_at(u_t, v_t));
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Saddle;

    impl Surface for Saddle {
        fn point_at(&self, u: f64, v: f64) -> Point3 {
            Point3::new(u, v, u * v)
        }

        fn domain_u(&self) -> (f64, f64) {
            (-1.0, 1.0)
        }

        fn domain_v(&self) -> (f64, f64) {
            (-1.0, 1.0)
        }
    }

    #[test]
    fn default_partials_match_analytic_saddle() {
        let (du, dv) = Saddle.partial_derivatives_at(0.5, -0.25);
        let tol = Tolerance::LOOSE;
        assert!(tol.approx_eq_vec3(du, Vec3::new(1.0, 0.0, -0.25)));
        assert!(tol.approx_eq_vec3(dv, Vec3::new(0.0, 1.0, 0.5)));
    }

    #[test]
    fn one_sided_difference_at_domain_edge() {
        let (du, _) = Saddle.partial_derivatives_at(1.0, 1.0);
        assert!(Tolerance::LOOSE.approx_eq_vec3(du, Vec3::new(1.0, 0.0, 1.0)));
    }

    #[test]
    fn grid_counts_are_clamped() {
        let pts = tessellate_surface_grid(&Saddle, 0, 1);
        assert_eq!(pts.len(), 4);
        assert_eq!(pts[0], Point3::new(-1.0, -1.0, 1.0));
        assert_eq!(pts[3], Point3::new(1.0, 1.0, 1.0));
    }
}
