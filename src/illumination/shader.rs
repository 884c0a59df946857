//! Continuous night overlay for shader-based shading.
//!
//! Instead of discrete samples the renderer gets the sun direction and
//! evaluates the overlay per fragment. [`ShaderSampler::illumination_at`] is
//! the CPU reference of that fragment function: a smoothstep of
//! `dot(normal, sun)` across a narrow band around the terminator, scaled by a
//! maximum opacity. Day side is transparent, night side reaches the maximum.

use bytemuck::{Pod, Zeroable};

use crate::core::{Error, Result};
use crate::geo::DirectionVector;
use crate::illumination::IlluminationSampler;
use crate::solar::SubSolarPoint;

/// Half-width of the soft terminator edge, in dot-product units (a few degrees).
pub const DEFAULT_TERMINATOR_BAND: f64 = 0.06;

/// Opacity of the night overlay far from the terminator.
pub const DEFAULT_NIGHT_OPACITY: f64 = 0.7;

/// Hermite smoothstep between `edge0` and `edge1`.
#[inline]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Shader-mode sampler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShaderSampler {
    band: f64,
    max_opacity: f64,
}

impl Default for ShaderSampler {
    fn default() -> Self {
        Self {
            band: DEFAULT_TERMINATOR_BAND,
            max_opacity: DEFAULT_NIGHT_OPACITY,
        }
    }
}

impl ShaderSampler {
    /// `band` must be in `(0, 1]`, `max_opacity` in `[0, 1]`.
    pub fn new(band: f64, max_opacity: f64) -> Result<Self> {
        if !(band.is_finite() && band > 0.0 && band <= 1.0) {
            return Err(Error::Config(format!("terminator band {band} must be in (0, 1]")));
        }
        if !(0.0..=1.0).contains(&max_opacity) {
            return Err(Error::Config(format!("night opacity {max_opacity} must be in [0, 1]")));
        }
        Ok(Self { band, max_opacity })
    }

    #[inline]
    pub fn band(&self) -> f64 {
        self.band
    }

    #[inline]
    pub fn max_opacity(&self) -> f64 {
        self.max_opacity
    }

    /// Night overlay alpha for a surface direction.
    ///
    /// 0 on the lit side beyond the band, `max_opacity` on the dark side
    /// beyond the band, `max_opacity / 2` exactly on the terminator.
    pub fn illumination_at(&self, direction: DirectionVector, sub: SubSolarPoint) -> f64 {
        self.alpha_for_dot(direction.dot(&sub.direction()))
    }

    /// Overlay alpha from a precomputed `dot(direction, sun)`.
    #[inline]
    pub fn alpha_for_dot(&self, sun_dot: f64) -> f64 {
        self.max_opacity * (1.0 - smoothstep(-self.band, self.band, sun_dot))
    }
}

impl IlluminationSampler for ShaderSampler {
    type Overlay = NightOverlayUniform;

    fn refresh(&self, sub: SubSolarPoint) -> NightOverlayUniform {
        NightOverlayUniform {
            sun_direction: sub.direction().to_f32_array(),
            band: self.band as f32,
            max_opacity: self.max_opacity as f32,
            _pad: [0.0; 3],
        }
    }

    fn daylight(&self, direction: DirectionVector, sub: SubSolarPoint) -> f64 {
        smoothstep(-self.band, self.band, direction.dot(&sub.direction()))
    }
}

// ---------------------------------------------------------------------------
// GPU uniform
// ---------------------------------------------------------------------------

/// GPU-ready night overlay uniform.
///
/// Layout matches a WGSL struct of `vec3<f32>, f32, f32` padded to 32 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct NightOverlayUniform {
    pub sun_direction: [f32; 3],
    pub band: f32,
    pub max_opacity: f32,
    pub _pad: [f32; 3],
}

impl Default for NightOverlayUniform {
    fn default() -> Self {
        Self {
            sun_direction: [0.0, 0.0, -1.0],
            band: DEFAULT_TERMINATOR_BAND as f32,
            max_opacity: DEFAULT_NIGHT_OPACITY as f32,
            _pad: [0.0; 3],
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
