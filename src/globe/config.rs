//! Globe overlay configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::illumination::shader::{DEFAULT_NIGHT_OPACITY, DEFAULT_TERMINATOR_BAND};
use crate::illumination::{GridSampler, ShaderSampler};
use crate::markers::DEFAULT_MARKER_ALTITUDE;

/// Which illumination strategy the renderer consumes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IlluminationMode {
    /// Weighted day-side lattice points.
    Grid,
    /// Sun direction uniform for a per-fragment night overlay.
    #[default]
    Shader,
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Full configuration for the terminator overlay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// Seconds between full recomputations. The terminator moves about
    /// 0.25° of longitude per minute, so 60 s is plenty.
    pub refresh_interval_secs: u64,
    /// Illumination strategy.
    pub mode: IlluminationMode,
    /// Grid-mode parameters.
    pub grid: GridConfig,
    /// Shader-mode parameters.
    pub shader: ShaderConfig,
    /// Marker height above the surface in globe radii.
    pub marker_altitude: f64,
    /// Segments in the terminator line.
    pub terminator_segments: usize,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 60,
            mode: IlluminationMode::default(),
            grid: GridConfig::default(),
            shader: ShaderConfig::default(),
            marker_altitude: DEFAULT_MARKER_ALTITUDE,
            terminator_segments: 72,
        }
    }
}

impl GlobeConfig {
    /// Refresh cadence as a duration.
    #[inline]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Check every value the samplers would otherwise reject later.
    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval_secs == 0 {
            return Err(Error::Config("refresh_interval_secs must be > 0".to_string()));
        }
        if !(self.marker_altitude.is_finite() && self.marker_altitude >= 0.0) {
            return Err(Error::Config(format!(
                "marker_altitude {} must be finite and >= 0",
                self.marker_altitude
            )));
        }
        self.grid.sampler()?;
        self.shader.sampler()?;
        Ok(())
    }

    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        log::debug!("Loaded globe config from {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Grid config
// ---------------------------------------------------------------------------

/// Lattice resolution for grid mode, in degrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub lat_step: f64,
    pub lng_step: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            lat_step: 2.0,
            lng_step: 2.0,
        }
    }
}

impl GridConfig {
    pub fn sampler(&self) -> Result<GridSampler> {
        GridSampler::new(self.lat_step, self.lng_step)
    }
}

// ---------------------------------------------------------------------------
// Shader config
// ---------------------------------------------------------------------------

/// Soft-edge parameters for shader mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    /// Half-width of the terminator edge in dot-product units.
    pub band: f64,
    /// Night overlay opacity away from the edge.
    pub max_opacity: f64,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            band: DEFAULT_TERMINATOR_BAND,
            max_opacity: DEFAULT_NIGHT_OPACITY,
        }
    }
}

impl ShaderConfig {
    pub fn sampler(&self) -> Result<ShaderSampler> {
        ShaderSampler::new(self.band, self.max_opacity)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
