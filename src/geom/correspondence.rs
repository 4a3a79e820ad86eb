//! Synthetic keypoint correspondences between two corner quads.
//!
//! A point is placed inside the source quad by bilinear interpolation of its
//! four corners with parameters `(t1, t2)`. The exact same corner weights are
//! then applied to the target quad, so each pair sits at the same normalized
//! position in both regions. This mimics how a homography carries interior
//! points along with its corner mapping without solving for the projective
//! matrix.
//!
//! Randomness comes from a caller-supplied [`Rng`], so seeding it makes the
//! output reproducible.

use rand::Rng;

use super::core::Point3;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum CorrespondenceError {
    #[error("{quad} quad corner {corner} has non-finite coordinates")]
    NonFiniteCorner { quad: &'static str, corner: usize },
    #[error("keypoint count must be non-negative, got {0}")]
    NegativeCount(i64),
    #[error("cannot tag {count} keypoint pairs from an empty palette")]
    EmptyPalette { count: usize },
    #[error("interpolation range [{min}, {max}] must be finite and within [0, 1] with min <= max")]
    InvalidRange { min: f64, max: f64 },
}

/// Four corners ordered `[top-left, top-right, bottom-left, bottom-right]`.
///
/// No convexity check is made; degenerate or self-intersecting quads are
/// accepted as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerQuad {
    pub top_left: Point3,
    pub top_right: Point3,
    pub bottom_left: Point3,
    pub bottom_right: Point3,
}

impl CornerQuad {
    #[must_use]
    pub const fn new(
        top_left: Point3,
        top_right: Point3,
        bottom_left: Point3,
        bottom_right: Point3,
    ) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    #[must_use]
    pub const fn from_corners(corners: [Point3; 4]) -> Self {
        Self::new(corners[0], corners[1], corners[2], corners[3])
    }

    #[must_use]
    pub const fn corners(&self) -> [Point3; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    /// Rejects quads with NaN or infinite coordinates. `label` names the quad
    /// in the error.
    pub fn validate(&self, label: &'static str) -> Result<(), CorrespondenceError> {
        match self.corners().iter().position(|c| !c.is_finite()) {
            Some(corner) => Err(CorrespondenceError::NonFiniteCorner {
                quad: label,
                corner,
            }),
            None => Ok(()),
        }
    }

    /// Blend the corners with precomputed weights.
    #[must_use]
    pub fn interpolate(&self, weights: &BilinearWeights) -> Point3 {
        Point3::weighted_sum(&self.corners(), &weights.0)
    }

    /// Point at normalized position `(t1, t2)`; `t1` runs left to right,
    /// `t2` top to bottom.
    #[must_use]
    pub fn point_at(&self, t1: f64, t2: f64) -> Point3 {
        self.interpolate(&BilinearWeights::new(t1, t2))
    }
}

/// Corner weights `[(1−t1)(1−t2), t1(1−t2), (1−t1)t2, t1·t2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BilinearWeights(pub [f64; 4]);

impl BilinearWeights {
    #[must_use]
    pub fn new(t1: f64, t2: f64) -> Self {
        let s1 = 1.0 - t1;
        let s2 = 1.0 - t2;
        Self([s1 * s2, t1 * s2, s1 * t2, t1 * t2])
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

/// A source point, its matching target point, and a display tag.
#[derive(Debug, Clone, PartialEq)]
pub struct KeypointPair<T> {
    pub source: Point3,
    pub target: Point3,
    pub tag: T,
}

/// Range the interpolation parameters are drawn from.
///
/// The default `[0.2, 0.8]` keeps keypoints off the quad edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrespondenceOptions {
    pub t_min: f64,
    pub t_max: f64,
}

impl CorrespondenceOptions {
    pub const DEFAULT_T_MIN: f64 = 0.2;
    pub const DEFAULT_T_MAX: f64 = 0.8;

    pub fn validate(&self) -> Result<(), CorrespondenceError> {
        let Self { t_min, t_max } = *self;
        let in_unit = |t: f64| t.is_finite() && (0.0..=1.0).contains(&t);
        if !in_unit(t_min) || !in_unit(t_max) || t_min > t_max {
            return Err(CorrespondenceError::InvalidRange {
                min: t_min,
                max: t_max,
            });
        }
        Ok(())
    }
}

impl Default for CorrespondenceOptions {
    fn default() -> Self {
        Self {
            t_min: Self::DEFAULT_T_MIN,
            t_max: Self::DEFAULT_T_MAX,
        }
    }
}

/// Convert a signed request into a pair count, rejecting negatives.
pub fn pair_count_from_signed(count: i64) -> Result<usize, CorrespondenceError> {
    usize::try_from(count).map_err(|_| CorrespondenceError::NegativeCount(count))
}

/// Build one pair at `(t1, t2)` using identical weights for both quads.
#[must_use]
pub fn sample_keypoint_pair<T>(
    source: &CornerQuad,
    target: &CornerQuad,
    t1: f64,
    t2: f64,
    tag: T,
) -> KeypointPair<T> {
    let weights = BilinearWeights::new(t1, t2);
    KeypointPair {
        source: source.interpolate(&weights),
        target: target.interpolate(&weights),
        tag,
    }
}

/// Generate `count` keypoint pairs between `source` and `target`.
///
/// Pair `i` is tagged with `palette[i % palette.len()]`. Pairs are returned in
/// generation order.
pub fn generate_keypoint_pairs<R, T>(
    rng: &mut R,
    source: &CornerQuad,
    target: &CornerQuad,
    count: usize,
    palette: &[T],
    options: &CorrespondenceOptions,
) -> Result<Vec<KeypointPair<T>>, CorrespondenceError>
where
    R: Rng,
    T: Clone,
{
    source.validate("source")?;
    target.validate("target")?;
    options.validate()?;
    if count > 0 && palette.is_empty() {
        return Err(CorrespondenceError::EmptyPalette { count });
    }

    let range = options.t_min..=options.t_max;
    let mut pairs = Vec::with_capacity(count);
    for i in 0..count {
        let t1 = rng.random_range(range.clone());
        let t2 = rng.random_range(range.clone());
        let tag = palette[i % palette.len()].clone();
        pairs.push(sample_keypoint_pair(source, target, t1, t2, tag));
    }

    log::debug!(
        "generated {count} keypoint pairs (t in [{}, {}])",
        options.t_min,
        options.t_max
    );
    Ok(pairs)
}
