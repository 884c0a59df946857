//! Day/night illumination of the globe surface.
//!
//! Two interchangeable strategies implement [`IlluminationSampler`]:
//!
//! - [`GridSampler`] produces a [`DaySideGrid`] of weighted day-side points
//!   for renderers that bin or splat overlay data.
//! - [`ShaderSampler`] produces a [`NightOverlayUniform`] so the overlay is
//!   evaluated per fragment on the GPU.
//!
//! Both take a [`SubSolarPoint`] and share the projection in [`crate::geo`],
//! so a backend can switch strategy without touching the solar math.

pub mod grid;
pub mod line;
pub mod shader;

pub use grid::{day_side_samples, intensity_for_zenith, DaySideGrid, DaySideSamples, GridSampler, IlluminationSample};
pub use line::{terminator_line, terminator_points, TerminatorSegment};
pub use shader::{smoothstep, NightOverlayUniform, ShaderSampler};

use crate::geo::DirectionVector;
use crate::solar::SubSolarPoint;

/// Common capability of the illumination strategies.
pub trait IlluminationSampler {
    /// What the renderer receives on each refresh.
    type Overlay;

    /// Full recomputation for one sub-solar point. Nothing carries over
    /// between calls.
    fn refresh(&self, sub: SubSolarPoint) -> Self::Overlay;

    /// How lit a surface direction is, from 0 (night) to 1 (fully lit).
    fn daylight(&self, direction: DirectionVector, sub: SubSolarPoint) -> f64;
}

/// Overlay produced by whichever strategy the configuration selects.
#[derive(Clone, Debug, PartialEq)]
pub enum IlluminationOverlay {
    Grid(Vec<IlluminationSample>),
    Shader(NightOverlayUniform),
}

impl IlluminationOverlay {
    /// Number of day-side samples (grid) or 0 (shader).
    pub fn sample_count(&self) -> usize {
        match self {
            Self::Grid(samples) => samples.len(),
            Self::Shader(_) => 0,
        }
    }
}
