mod core;
mod correspondence;
mod grid;
mod heightfield;
mod mesh;
mod surface;
mod tangent;
mod triangulation;

pub use core::{Point3, Tolerance, Transform, Vec3};
pub use correspondence::{
    BilinearWeights, CornerQuad, CorrespondenceError, CorrespondenceOptions, KeypointPair,
    generate_keypoint_pairs, pair_count_from_signed, sample_keypoint_pair,
};
pub use grid::{Segment3, quad_grid_lines};
pub use heightfield::{GaussianField, HeightField, HeightFieldError, HeightFieldSurface};
pub use mesh::{GeomMesh, mesh_surface};
pub use surface::{Surface, tessellate_surface_grid};
pub use tangent::{TangentPatch, TangentPlane, TangentPlaneOptions};
pub use triangulation::triangulate_grid;

#[cfg(test)]
mod tests;
