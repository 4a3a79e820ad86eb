use serde::{Deserialize, Serialize};

use super::constellation::{big_dipper, polyline_segments};
use super::{SceneError, require_finite, require_positive};
use crate::geom::{
    CornerQuad, GaussianField, GeomMesh, HeightField, HeightFieldSurface, Point3, Segment3, Surface,
    TangentPlane, TangentPlaneOptions, Transform, mesh_surface,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaussianSceneOptions {
    pub amplitude: f64,
    pub sigma: f64,
    /// The surface is sampled on `[-extent, extent]²`.
    pub extent: f64,
    pub resolution: usize,
    /// `(x0, y0)` of the tangent point.
    pub anchor: [f64; 2],
    pub tangent: TangentPlaneOptions,
    /// Side of the square image plane at z = 0.
    pub image_size: f64,
    /// Scale applied about the anchor when the view zooms in.
    pub zoom: f64,
}

impl Default for GaussianSceneOptions {
    fn default() -> Self {
        Self {
            amplitude: GaussianField::DEFAULT_AMPLITUDE,
            sigma: GaussianField::DEFAULT_SIGMA,
            extent: 2.0,
            resolution: 30,
            anchor: [0.5, -0.5],
            tangent: TangentPlaneOptions::default(),
            image_size: 5.0,
            zoom: 5.0,
        }
    }
}

impl GaussianSceneOptions {
    pub fn validate(&self) -> Result<(), SceneError> {
        require_positive("extent", self.extent)?;
        require_positive("image_size", self.image_size)?;
        require_positive("zoom", self.zoom)?;
        require_finite("anchor", &self.anchor)?;
        if self.resolution < 2 {
            return Err(SceneError::InvalidOption(format!(
                "surface resolution must be at least 2, got {}",
                self.resolution
            )));
        }
        self.tangent.validate().map_err(SceneError::InvalidOption)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaussianTangentScene {
    pub field: GaussianField,
    pub plane: TangentPlane,
    pub surface_mesh: GeomMesh,
    pub tangent_mesh: GeomMesh,
    pub image_plane: CornerQuad,
    pub stars: Vec<Point3>,
    pub star_lines: Vec<Segment3>,
    /// Scale about the anchor point.
    pub zoom: Transform,
}

/// Serializable view of a [`GaussianTangentScene`].
#[derive(Debug, Serialize)]
pub struct GaussianTangentExport<'a> {
    pub surface: &'a GeomMesh,
    pub tangent_patch: &'a GeomMesh,
    pub anchor: [f64; 3],
    pub slopes: [f64; 2],
    pub normal: [f64; 3],
    pub bias: f64,
    pub image_plane: [[f64; 3]; 4],
    pub stars: Vec<[f64; 3]>,
    pub star_lines: &'a [Segment3],
    pub zoom_matrix: [[f64; 4]; 4],
}

impl GaussianTangentScene {
    #[must_use]
    pub fn export(&self) -> GaussianTangentExport<'_> {
        let (dx, dy) = self.plane.slopes();
        GaussianTangentExport {
            surface: &self.surface_mesh,
            tangent_patch: &self.tangent_mesh,
            anchor: self.plane.anchor().to_array(),
            slopes: [dx, dy],
            normal: self.plane.normal().to_array(),
            bias: self.plane.bias(),
            image_plane: self.image_plane.corners().map(Point3::to_array),
            stars: self.stars.iter().map(|p| p.to_array()).collect(),
            star_lines: &self.star_lines,
            zoom_matrix: *self.zoom.as_matrix(),
        }
    }
}

pub fn build_gaussian_tangent_scene(
    options: &GaussianSceneOptions,
) -> Result<GaussianTangentScene, SceneError> {
    options.validate()?;

    let field = GaussianField::new(options.amplitude, options.sigma)?;
    let surface = HeightFieldSurface::centered(field, options.extent)?;
    let surface_mesh = mesh_surface(&surface, options.resolution, options.resolution);

    let [x0, y0] = options.anchor;
    let plane = surface.field().tangent_plane(x0, y0, options.tangent.bias);
    let patch = plane.patch(options.tangent.patch_size);
    let tangent_mesh = mesh_surface(
        &patch,
        options.tangent.resolution,
        options.tangent.resolution,
    );

    let stars = big_dipper();
    let star_lines = polyline_segments(&stars);

    log::debug!(
        "gaussian scene: anchor={:?} tangent normal={:?} zoom={}",
        plane.anchor(),
        patch.normal_at(0.5, 0.5),
        options.zoom
    );

    Ok(GaussianTangentScene {
        field,
        plane,
        surface_mesh,
        tangent_mesh,
        image_plane: CornerQuad::square(Point3::ORIGIN, options.image_size),
        stars,
        star_lines,
        zoom: Transform::scale_about(plane.anchor(), options.zoom),
    })
}
