use crate::geom::{CornerQuad, Point3, Tolerance, Vec3, quad_grid_lines};

#[test]
fn square_corners_are_ordered_top_left_first() {
    let quad = CornerQuad::square(Point3::new(-3.0, 0.0, 0.0), 3.0);
    assert_eq!(quad.top_left, Point3::new(-4.5, 1.5, 0.0));
    assert_eq!(quad.top_right, Point3::new(-1.5, 1.5, 0.0));
    assert_eq!(quad.bottom_left, Point3::new(-4.5, -1.5, 0.0));
    assert_eq!(quad.bottom_right, Point3::new(-1.5, -1.5, 0.0));
}

#[test]
fn warped_square_offsets_each_corner() {
    let offsets = [
        Vec3::new(-0.3, 0.2, 0.0),
        Vec3::new(0.5, -0.1, 0.0),
        Vec3::new(0.2, -0.3, 0.0),
        Vec3::new(-0.1, 0.4, 0.0),
    ];
    let center = Point3::new(3.0, 0.0, 0.0);
    let base = CornerQuad::square(center, 3.0);
    let warped = CornerQuad::warped(center, 3.0, offsets);

    let tol = Tolerance::DEFAULT;
    for ((b, w), o) in base.corners().iter().zip(warped.corners()).zip(offsets) {
        assert!(tol.approx_eq_vec3(w - *b, o));
    }
}

#[test]
fn grid_has_rows_plus_cols_plus_two_lines() {
    let quad = CornerQuad::square(Point3::ORIGIN, 3.0);
    assert_eq!(quad_grid_lines(&quad, 4, 4).len(), 10);
    assert_eq!(quad_grid_lines(&quad, 2, 5).len(), 9);
}

#[test]
fn grid_outer_lines_are_quad_edges() {
    let quad = CornerQuad::warped(
        Point3::new(3.0, 0.0, 0.0),
        3.0,
        [
            Vec3::new(-0.3, 0.2, 0.0),
            Vec3::new(0.5, -0.1, 0.0),
            Vec3::new(0.2, -0.3, 0.0),
            Vec3::new(-0.1, 0.4, 0.0),
        ],
    );
    let lines = quad_grid_lines(&quad, 4, 4);
    let tol = Tolerance::DEFAULT;
    let same = |a: [f64; 3], b: Point3| tol.approx_eq_point3(Point3::from(a), b);

    assert!(same(lines[0].start, quad.top_left));
    assert!(same(lines[0].end, quad.top_right));
    assert!(same(lines[4].start, quad.bottom_left));
    assert!(same(lines[4].end, quad.bottom_right));

    assert!(same(lines[5].start, quad.top_left));
    assert!(same(lines[5].end, quad.bottom_left));
    assert!(same(lines[9].start, quad.top_right));
    assert!(same(lines[9].end, quad.bottom_right));
}

#[test]
fn inner_grid_lines_are_evenly_spaced() {
    let quad = CornerQuad::square(Point3::ORIGIN, 4.0);
    let lines = quad_grid_lines(&quad, 4, 2);
    let tol = Tolerance::DEFAULT;
    for (i, line) in lines[..5].iter().enumerate() {
        let y = 2.0 - i as f64;
        assert!(tol.approx_eq_f64(line.start[1], y));
        assert!(tol.approx_eq_f64(line.end[1], y));
    }
    assert!(tol.approx_eq_f64(lines[6].start[0], 0.0));
}

#[test]
fn zero_rows_are_clamped_to_one() {
    let quad = CornerQuad::square(Point3::ORIGIN, 1.0);
    assert_eq!(quad_grid_lines(&quad, 0, 0).len(), 4);
}
