use crate::geom::{GaussianField, GeomMesh, HeightField, HeightFieldSurface, Tolerance, mesh_surface};

#[test]
fn gaussian_mesh_has_finite_vertices_and_valid_indices() {
    let surface = HeightFieldSurface::centered(GaussianField::default(), 2.0).unwrap();
    let mesh = mesh_surface(&surface, 30, 30);

    mesh.validate().expect("mesh validate");
    assert!(!mesh.has_invalid_vertices());
    assert!(mesh.has_valid_indices());
    assert_eq!(mesh.vertex_count(), 30 * 30);
    assert_eq!(mesh.triangle_count(), 2 * 29 * 29);
    assert_eq!(mesh.indices.len(), mesh.triangle_count() * 3);

    assert_eq!(mesh.positions[0], [-2.0, -2.0, surface.field().height(-2.0, -2.0)]);
    let last = mesh.positions[mesh.positions.len() - 1];
    assert!(Tolerance::DEFAULT.approx_eq_f64(last[0], 2.0));
    assert!(Tolerance::DEFAULT.approx_eq_f64(last[1], 2.0));
}

#[test]
fn gaussian_mesh_heights_stay_under_peak() {
    let surface = HeightFieldSurface::centered(GaussianField::default(), 2.0).unwrap();
    let mesh = mesh_surface(&surface, 30, 30);
    for p in &mesh.positions {
        assert!(p[2] > 0.0 && p[2] < 2.0, "z = {}", p[2]);
    }
}

#[test]
fn gaussian_mesh_normals_are_unit_and_face_up() {
    let surface = HeightFieldSurface::centered(GaussianField::default(), 2.0).unwrap();
    let mesh = mesh_surface(&surface, 12, 9);
    let normals = mesh.normals.as_ref().expect("normals");
    assert_eq!(normals.len(), mesh.positions.len());

    let tol = Tolerance::LOOSE;
    for (p, n) in mesh.positions.iter().zip(normals) {
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert!(tol.approx_eq_f64(len, 1.0));
        assert!(n[2] > 0.0);

        let expected = surface.field().normal_at(p[0], p[1]).to_array();
        for k in 0..3 {
            assert!(tol.approx_eq_f64(n[k], expected[k]));
        }
    }
}

#[test]
fn triangles_wind_counter_clockwise_seen_from_above() {
    let surface = HeightFieldSurface::centered(GaussianField::default(), 2.0).unwrap();
    let mesh = mesh_surface(&surface, 6, 6);
    for tri in mesh.indices.chunks_exact(3) {
        let a = mesh.positions[tri[0] as usize];
        let b = mesh.positions[tri[1] as usize];
        let c = mesh.positions[tri[2] as usize];
        let cross_z = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
        assert!(cross_z > 0.0);
    }
}

#[test]
fn tiny_resolution_is_clamped() {
    let surface = HeightFieldSurface::centered(GaussianField::default(), 1.0).unwrap();
    let mesh = mesh_surface(&surface, 0, 1);
    mesh.validate().expect("mesh validate");
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangle_count(), 2);
}

#[test]
fn empty_mesh_is_valid() {
    let mesh = GeomMesh::default();
    assert!(mesh.validate().is_ok());
    assert_eq!(mesh.triangle_count(), 0);
}
