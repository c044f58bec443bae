use crate::error::ParamError;
use clap::ValueEnum;
use strum::Display;

/// Smallest disc / neighbourhood radius, in meters
pub const MIN_RADIUS_METERS: f64 = 1.0;

/// Largest radius the slider allows, in meters
pub const MAX_RADIUS_METERS: f64 = 200.0;

pub const DEFAULT_RADIUS_METERS: f64 = 25.0;

pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.3;

/// Which clustering algorithm to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, ValueEnum)]
#[strum(serialize_all = "kebab-case")]
pub enum Algorithm {
    /// DBSCAN over degree distances, then stitching of nearby clusters
    Density,
    /// Per-tree discs merged by overlap ratio
    #[default]
    CircleUnion,
}

/// Parameters of one clustering run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterParams {
    pub algorithm: Algorithm,
    pub radius_meters: f64,
    /// Only used by [`Algorithm::CircleUnion`]
    pub overlap_threshold: f64,
}

impl Default for ClusterParams {
    fn default() -> Self {
        ClusterParams {
            algorithm: Algorithm::default(),
            radius_meters: DEFAULT_RADIUS_METERS,
            overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
        }
    }
}

impl ClusterParams {
    pub fn new(algorithm: Algorithm, radius_meters: f64, overlap_threshold: f64) -> Self {
        ClusterParams {
            algorithm,
            radius_meters,
            overlap_threshold,
        }
    }

    /// Rejects non-finite values and clamps the rest into their allowed ranges
    ///
    /// Radius ends up in `[1, 200]` meters and the overlap threshold in `[0, 1]`.
    pub fn validate(self) -> Result<Self, ParamError> {
        if !self.radius_meters.is_finite() {
            return Err(ParamError::Radius(self.radius_meters));
        }
        if !self.overlap_threshold.is_finite() {
            return Err(ParamError::Overlap(self.overlap_threshold));
        }

        Ok(ClusterParams {
            algorithm: self.algorithm,
            radius_meters: self
                .radius_meters
                .clamp(MIN_RADIUS_METERS, MAX_RADIUS_METERS),
            overlap_threshold: self.overlap_threshold.clamp(0.0, 1.0),
        })
    }
}

/// Clamps a radius to at least [`MIN_RADIUS_METERS`]; NaN becomes the minimum
pub fn clamp_radius(radius_meters: f64) -> f64 {
    radius_meters.max(MIN_RADIUS_METERS)
}

/// Clamps an overlap threshold into `[0, 1]`; NaN becomes the default
pub fn clamp_overlap(overlap_threshold: f64) -> f64 {
    if overlap_threshold.is_nan() {
        DEFAULT_OVERLAP_THRESHOLD
    } else {
        overlap_threshold.clamp(0.0, 1.0)
    }
}
