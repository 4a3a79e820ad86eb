use serde::Serialize;

use super::core::Vec3;
use super::surface::{Surface, tessellate_surface_grid};
use super::triangulation::triangulate_grid;

/// Indexed triangle mesh handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeomMesh {
    pub positions: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normals: Option<Vec<[f64; 3]>>,
}

impl GeomMesh {
    /// Create a new mesh with positions and indices only.
    #[must_use]
    pub fn new(positions: Vec<[f64; 3]>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices,
            normals: None,
        }
    }

    #[must_use]
    pub fn with_normals(mut self, normals: Vec<[f64; 3]>) -> Self {
        self.normals = Some(normals);
        self
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if any vertex position contains NaN or Inf values.
    #[must_use]
    pub fn has_invalid_vertices(&self) -> bool {
        self.positions
            .iter()
            .any(|p| p.iter().any(|c| !c.is_finite()))
    }

    /// Returns true if all vertex indices are within bounds.
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.positions.len() as u32;
        self.indices.iter().all(|&i| i < n)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err("mesh indices are not a triangle list (len % 3 != 0)".to_string());
        }
        if self.has_invalid_vertices() {
            return Err("mesh has invalid vertex coordinates (NaN/Inf)".to_string());
        }
        if !self.has_valid_indices() {
            return Err("mesh has out-of-bounds vertex indices".to_string());
        }
        if self
            .normals
            .as_ref()
            .is_some_and(|normals| normals.len() != self.positions.len())
        {
            return Err("mesh normal buffer does not match vertex count".to_string());
        }
        Ok(())
    }
}

/// Tessellate `surface` on a `u_count × v_count` grid and triangulate it.
///
/// Normals come from [`Surface::normal_at`]; degenerate spots fall back to +Z.
#[must_use]
pub fn mesh_surface(surface: &impl Surface, u_count: usize, v_count: usize) -> GeomMesh {
    let u_count = u_count.max(2);
    let v_count = v_count.max(2);

    let positions: Vec<[f64; 3]> = tessellate_surface_grid(surface, u_count, v_count)
        .into_iter()
        .map(|p| p.to_array())
        .collect();
    let indices = triangulate_grid(u_count, v_count);

    let (u0, u1) = surface.domain_u();
    let (v0, v1) = surface.domain_v();
    let mut normals = Vec::with_capacity(positions.len());
    for v in 0..v_count {
        let v_t = v0 + (v1 - v0) * (v as f64 / (v_count - 1) as f64);
        for u in 0..u_count {
            let u_t = u0 + (u1 - u0) * (u as f64 / (u_count - 1) as f64);
            let n = surface.normal_at(u_t, v_t).unwrap_or(Vec3::Z);
            normals.push(n.to_array());
        }
    }

    log::debug!(
        "meshed surface grid {u_count}x{v_count}: {} vertices, {} triangles",
        positions.len(),
        indices.len() / 3
    );

    GeomMesh::new(positions, indices).with_normals(normals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_flags_out_of_bounds_index() {
        let mesh = GeomMesh::new(vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]], vec![0, 1, 3]);
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn validate_flags_nan_vertex() {
        let mesh = GeomMesh::new(
            vec![[0.0; 3], [f64::NAN, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2],
        );
        assert!(mesh.has_invalid_vertices());
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn validate_flags_normal_length_mismatch() {
        let mesh = GeomMesh::new(vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]], vec![0, 1, 2])
            .with_normals(vec![[0.0, 0.0, 1.0]]);
        assert!(mesh.validate().is_err());
    }
}
