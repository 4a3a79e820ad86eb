//! Scene builders: everything one visualization needs, assembled from the
//! `geom` primitives and ready to hand to a renderer.
//!
//! - [`gaussian_tangent`]: Gaussian surface, tangent patch at an off-center
//!   anchor, the image plane with its constellation, and the zoom about the
//!   anchor.
//! - [`homography`]: source and warped target grids with colored keypoint
//!   pairs.
//!
//! Options are plain `serde` structs with defaults for every field, so a JS
//! caller can pass a partial object.

pub mod constellation;
pub mod gaussian_tangent;
pub mod homography;

use serde::Serialize;

use crate::geom::{CorrespondenceError, HeightFieldError};

pub use gaussian_tangent::{
    GaussianSceneOptions, GaussianTangentExport, GaussianTangentScene, build_gaussian_tangent_scene,
};
pub use homography::{
    HomographyExport, HomographyScene, HomographySceneOptions, KeypointExport,
    build_homography_scene,
};

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum SceneError {
    #[error(transparent)]
    HeightField(#[from] HeightFieldError),
    #[error(transparent)]
    Correspondence(#[from] CorrespondenceError),
    #[error("invalid scene option: {0}")]
    InvalidOption(String),
}

/// Keypoint colors of the correspondence demo, in assignment order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTag {
    Yellow,
    Green,
    Purple,
    Orange,
    Teal,
    Pink,
    Gold,
    Maroon,
}

impl ColorTag {
    pub const PALETTE: [Self; 8] = [
        Self::Yellow,
        Self::Green,
        Self::Purple,
        Self::Orange,
        Self::Teal,
        Self::Pink,
        Self::Gold,
        Self::Maroon,
    ];

    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Yellow => "#FFFF00",
            Self::Green => "#83C167",
            Self::Purple => "#9A72AC",
            Self::Orange => "#FF862F",
            Self::Teal => "#5CD0B3",
            Self::Pink => "#D147BD",
            Self::Gold => "#F0AC5F",
            Self::Maroon => "#C55F73",
        }
    }
}

pub(crate) fn require_positive(name: &str, value: f64) -> Result<(), SceneError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SceneError::InvalidOption(format!(
            "{name} must be finite and > 0, got {value}"
        )))
    }
}

pub(crate) fn require_finite(name: &str, values: &[f64]) -> Result<(), SceneError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SceneError::InvalidOption(format!(
            "{name} must have finite coordinates, got {values:?}"
        )))
    }
}
