use crate::geom::{
    GaussianField, HeightFieldSurface, Point3, Surface, Tolerance, Vec3, tessellate_surface_grid,
    triangulate_grid,
};

/// Same graph as `HeightFieldSurface`, but left on the default finite
/// difference partials.
struct NumericGaussian(GaussianField);

impl Surface for NumericGaussian {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        crate::geom::HeightField::point_at(&self.0, u, v)
    }

    fn domain_u(&self) -> (f64, f64) {
        (-2.0, 2.0)
    }

    fn domain_v(&self) -> (f64, f64) {
        (-2.0, 2.0)
    }
}

#[test]
fn analytic_partials_agree_with_numeric_partials() {
    let analytic = HeightFieldSurface::centered(GaussianField::default(), 2.0).unwrap();
    let numeric = NumericGaussian(GaussianField::default());
    let tol = Tolerance::new(1e-5);

    for &(u, v) in &[(0.0, 0.0), (1.0, 1.0), (-1.5, 0.5), (0.5, -0.5)] {
        let (du_a, dv_a) = analytic.partial_derivatives_at(u, v);
        let (du_n, dv_n) = numeric.partial_derivatives_at(u, v);
        assert!(tol.approx_eq_vec3(du_a, du_n), "du at ({u}, {v})");
        assert!(tol.approx_eq_vec3(dv_a, dv_n), "dv at ({u}, {v})");
    }
}

#[test]
fn normal_at_peak_points_up() {
    let surface = HeightFieldSurface::centered(GaussianField::default(), 2.0).unwrap();
    let n = surface.normal_at(0.0, 0.0).expect("normal");
    assert!(Tolerance::DEFAULT.approx_eq_vec3(n, Vec3::Z));
}

#[test]
fn grid_samples_cover_domain_corners() {
    let surface = HeightFieldSurface::new(GaussianField::default(), (-1.0, 3.0), (0.0, 2.0)).unwrap();
    let pts = tessellate_surface_grid(&surface, 5, 3);
    assert_eq!(pts.len(), 15);
    assert_eq!((pts[0].x, pts[0].y), (-1.0, 0.0));
    assert_eq!((pts[4].x, pts[4].y), (3.0, 0.0));
    assert_eq!((pts[10].x, pts[10].y), (-1.0, 2.0));
    assert_eq!((pts[14].x, pts[14].y), (3.0, 2.0));
    assert_eq!(pts[1].x, 0.0);
}

#[test]
fn triangulation_indices_stay_in_grid() {
    let indices = triangulate_grid(5, 3);
    assert_eq!(indices.len(), 4 * 2 * 6);
    assert!(indices.iter().all(|&i| i < 15));
}
