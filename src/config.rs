//! Immutable run configuration.
//!
//! A configuration is validated once, before any buffer is allocated.
//! Invalid values are rejected, never clamped.

use crate::domain::*;
use crate::util::*;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("axis {axis} has extent {extent}, at least 3 cells are needed")]
    ExtentTooSmall { axis: usize, extent: usize },
    #[error("axis {axis} has extent {extent}, coordinates must fit in i32")]
    ExtentTooLarge { axis: usize, extent: usize },
    #[error("step limit must be positive")]
    ZeroSteps,
    #[error("convergence threshold must be positive and finite, got {0}")]
    InvalidThreshold(f64),
    #[error("tau_sq = {tau_sq} is outside the stable range [0, {limit})")]
    UnstableCourant { tau_sq: f64, limit: f64 },
    #[error("output cadence must be positive")]
    ZeroCadence,
    #[error("chunk size must be positive")]
    ZeroChunkSize,
    #[error("boundary face on axis {axis}, but the grid has {dimension} axes")]
    FaceAxis { axis: usize, dimension: usize },
    #[error("initial field {found} does not match the configured grid {expected}")]
    ShapeMismatch { expected: String, found: String },
}

fn validate_extents<const GRID_DIMENSION: usize>(
    extents: &[usize; GRID_DIMENSION],
) -> Result<(), ConfigError> {
    for (axis, &extent) in extents.iter().enumerate() {
        if extent < 3 {
            return Err(ConfigError::ExtentTooSmall { axis, extent });
        }
        if extent > i32::MAX as usize {
            return Err(ConfigError::ExtentTooLarge { axis, extent });
        }
    }
    Ok(())
}

/// Check that a field built elsewhere has the configured shape.
pub fn check_shape<const GRID_DIMENSION: usize>(
    expected: &AABB<GRID_DIMENSION>,
    found: &AABB<GRID_DIMENSION>,
) -> Result<(), ConfigError> {
    if expected != found {
        return Err(ConfigError::ShapeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        });
    }
    Ok(())
}

/// Steady state (Jacobi relaxation) run.
#[derive(Clone, Debug, PartialEq)]
pub struct RelaxationConfig<const GRID_DIMENSION: usize> {
    /// Cells per axis, boundary included.
    pub extents: [usize; GRID_DIMENSION],
    pub max_iterations: usize,
    /// Stop once the max change of a pass drops below this.
    pub threshold: f64,
    /// Value every cell starts from before faces are assigned.
    pub initial_value: f64,
    /// Faces clamped to a constant.
    pub faces: Vec<BoundaryFace>,
    pub chunk_size: usize,
    /// Record the first step whose field holds NaN or infinity.
    pub divergence_check: bool,
}

impl<const GRID_DIMENSION: usize> RelaxationConfig<GRID_DIMENSION> {
    /// The "west" face (axis 0, index 0) held at 100 and
    /// everything else starting at zero.
    pub fn new(extents: [usize; GRID_DIMENSION]) -> Self {
        RelaxationConfig {
            extents,
            max_iterations: 10_000,
            threshold: 1e-5,
            initial_value: 0.0,
            faces: vec![BoundaryFace::new(0, Side::Low, 100.0)],
            chunk_size: 1000,
            divergence_check: false,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_extents(&self.extents)?;
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        for face in &self.faces {
            if face.axis >= GRID_DIMENSION {
                return Err(ConfigError::FaceAxis {
                    axis: face.axis,
                    dimension: GRID_DIMENSION,
                });
            }
        }
        Ok(())
    }

    pub fn aabb(&self) -> AABB<GRID_DIMENSION> {
        AABB::from_extents(&self.extents)
    }

    /// Allocate the starting field, faces applied.
    pub fn initial_field(
        &self,
    ) -> Result<OwnedDomain<GRID_DIMENSION>, ConfigError> {
        self.validate()?;
        let mut field = OwnedDomain::filled(self.aabb(), self.initial_value);
        apply_faces(&self.faces, &mut field, self.chunk_size);
        Ok(field)
    }
}

impl Default for RelaxationConfig<3> {
    fn default() -> Self {
        Self::new([100, 100, 100])
    }
}

/// Time marching (leapfrog wave) run.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveConfig<const GRID_DIMENSION: usize> {
    /// Cells per axis, boundary included.
    pub extents: [usize; GRID_DIMENSION],
    pub total_steps: usize,
    /// Squared Courant number `(c dt / dx)^2`.
    pub tau_sq: f64,
    /// Snapshot every this many steps.
    pub output_every: usize,
    pub chunk_size: usize,
    /// Record the first step whose field holds NaN or infinity.
    pub divergence_check: bool,
}

impl<const GRID_DIMENSION: usize> WaveConfig<GRID_DIMENSION> {
    pub fn new(extents: [usize; GRID_DIMENSION]) -> Self {
        WaveConfig {
            extents,
            total_steps: 10_000,
            tau_sq: 0.4,
            output_every: 5,
            chunk_size: 1000,
            divergence_check: false,
        }
    }

    /// Explicit leapfrog is stable for `tau_sq < 1 / dimension`,
    /// i.e. `0.5` on a 2D grid.
    pub fn stability_limit() -> f64 {
        1.0 / GRID_DIMENSION as f64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_extents(&self.extents)?;
        if self.total_steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        let limit = Self::stability_limit();
        if !(self.tau_sq >= 0.0 && self.tau_sq < limit) {
            return Err(ConfigError::UnstableCourant {
                tau_sq: self.tau_sq,
                limit,
            });
        }
        if self.output_every == 0 {
            return Err(ConfigError::ZeroCadence);
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        Ok(())
    }

    pub fn aabb(&self) -> AABB<GRID_DIMENSION> {
        AABB::from_extents(&self.extents)
    }
}

impl Default for WaveConfig<2> {
    fn default() -> Self {
        Self::new([500, 500])
    }
}
