use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{ColorTag, SceneError, require_finite, require_positive};
use crate::geom::{
    CornerQuad, CorrespondenceOptions, KeypointPair, Point3, Segment3, Vec3,
    generate_keypoint_pairs, pair_count_from_signed, quad_grid_lines,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomographySceneOptions {
    pub rows: usize,
    pub cols: usize,
    /// Side of both grids before warping.
    pub size: f64,
    pub source_center: [f64; 3],
    pub target_center: [f64; 3],
    /// Per-corner displacement of the target grid, ordered
    /// `[top-left, top-right, bottom-left, bottom-right]`.
    pub warp: [[f64; 3]; 4],
    /// Signed so that a negative request from the caller is reported rather
    /// than wrapped.
    pub pair_count: i64,
    pub t_min: f64,
    pub t_max: f64,
}

impl Default for HomographySceneOptions {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 4,
            size: 3.0,
            source_center: [-3.0, 0.0, 0.0],
            target_center: [3.0, 0.0, 0.0],
            warp: [
                [-0.3, 0.2, 0.0],
                [0.5, -0.1, 0.0],
                [0.2, -0.3, 0.0],
                [-0.1, 0.4, 0.0],
            ],
            pair_count: 8,
            t_min: CorrespondenceOptions::DEFAULT_T_MIN,
            t_max: CorrespondenceOptions::DEFAULT_T_MAX,
        }
    }
}

impl HomographySceneOptions {
    pub fn validate(&self) -> Result<(), SceneError> {
        require_positive("size", self.size)?;
        require_finite("source_center", &self.source_center)?;
        require_finite("target_center", &self.target_center)?;
        for offset in &self.warp {
            require_finite("warp", offset)?;
        }
        if self.rows == 0 || self.cols == 0 {
            return Err(SceneError::InvalidOption(format!(
                "grid needs at least one row and column, got {}x{}",
                self.rows, self.cols
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn source_quad(&self) -> CornerQuad {
        CornerQuad::square(Point3::from(self.source_center), self.size)
    }

    #[must_use]
    pub fn target_quad(&self) -> CornerQuad {
        CornerQuad::warped(
            Point3::from(self.target_center),
            self.size,
            self.warp.map(Vec3::from),
        )
    }

    #[must_use]
    pub const fn correspondence(&self) -> CorrespondenceOptions {
        CorrespondenceOptions {
            t_min: self.t_min,
            t_max: self.t_max,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomographyScene {
    pub source_quad: CornerQuad,
    pub target_quad: CornerQuad,
    pub source_grid: Vec<Segment3>,
    pub target_grid: Vec<Segment3>,
    pub pairs: Vec<KeypointPair<ColorTag>>,
}

#[derive(Debug, Serialize)]
pub struct KeypointExport {
    pub source: [f64; 3],
    pub target: [f64; 3],
    pub color: ColorTag,
    pub hex: &'static str,
}

/// Serializable view of a [`HomographyScene`].
#[derive(Debug, Serialize)]
pub struct HomographyExport<'a> {
    pub source_grid: &'a [Segment3],
    pub target_grid: &'a [Segment3],
    pub keypoints: Vec<KeypointExport>,
}

impl HomographyScene {
    #[must_use]
    pub fn export(&self) -> HomographyExport<'_> {
        HomographyExport {
            source_grid: &self.source_grid,
            target_grid: &self.target_grid,
            keypoints: self
                .pairs
                .iter()
                .map(|pair| KeypointExport {
                    source: pair.source.to_array(),
                    target: pair.target.to_array(),
                    color: pair.tag,
                    hex: pair.tag.hex(),
                })
                .collect(),
        }
    }
}

/// Build both grids and draw the keypoint pairs from `rng`.
///
/// Keypoints are interpolated on the same quads the grids are drawn from, so
/// every target point lies inside the warped grid.
pub fn build_homography_scene<R: Rng>(
    rng: &mut R,
    options: &HomographySceneOptions,
) -> Result<HomographyScene, SceneError> {
    options.validate()?;
    let count = pair_count_from_signed(options.pair_count)?;

    let source_quad = options.source_quad();
    let target_quad = options.target_quad();

    let pairs = generate_keypoint_pairs(
        rng,
        &source_quad,
        &target_quad,
        count,
        &ColorTag::PALETTE,
        &options.correspondence(),
    )?;

    log::debug!(
        "homography scene: {}x{} grids, {} keypoint pairs",
        options.rows,
        options.cols,
        pairs.len()
    );

    Ok(HomographyScene {
        source_quad,
        target_quad,
        source_grid: quad_grid_lines(&source_quad, options.rows, options.cols),
        target_grid: quad_grid_lines(&target_quad, options.rows, options.cols),
        pairs,
    })
}
