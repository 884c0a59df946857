//! Refresh driver for the globe's day/night overlay.
//!
//! [`TerminatorSystem`] is ticked by the host application's own timer with
//! the current time. It recomputes a [`TerminatorFrame`] from scratch when the
//! refresh interval has elapsed and returns `None` otherwise. There is no
//! internal clock and no retained samples; only the instant of the last
//! refresh is kept, so tests drive it with fixed timestamps.

pub mod config;

pub use config::{GlobeConfig, GridConfig, IlluminationMode, ShaderConfig};

use crate::core::{Result, Timestamp};
use crate::geo::{DirectionVector, GeoCoordinate};
use crate::illumination::{
    terminator_line, GridSampler, IlluminationOverlay, IlluminationSampler, ShaderSampler, TerminatorSegment,
};
use crate::solar::{sub_solar_point, SubSolarPoint};

// ---------------------------------------------------------------------------
// TerminatorFrame
// ---------------------------------------------------------------------------

/// Everything the renderer needs for one refresh.
#[derive(Clone, Debug, PartialEq)]
pub struct TerminatorFrame {
    pub timestamp: Timestamp,
    pub sub_solar: SubSolarPoint,
    pub sun_direction: DirectionVector,
    pub illumination: IlluminationOverlay,
    pub terminator: Vec<TerminatorSegment>,
}

impl TerminatorFrame {
    /// Whether the sun is above the horizon at `coord` in this frame.
    pub fn is_daylit(&self, coord: &GeoCoordinate) -> bool {
        self.sub_solar.zenith_angle(coord) < 90.0
    }
}

// ---------------------------------------------------------------------------
// TerminatorSystem
// ---------------------------------------------------------------------------

/// Periodic recomputation of the sub-solar point and illumination overlay.
pub struct TerminatorSystem {
    config: GlobeConfig,
    grid: GridSampler,
    shader: ShaderSampler,
    last_refresh: Option<Timestamp>,
}

impl TerminatorSystem {
    /// Create a system from a configuration, validating it first.
    pub fn new(config: GlobeConfig) -> Result<Self> {
        config.validate()?;
        let grid = config.grid.sampler()?;
        let shader = config.shader.sampler()?;
        Ok(Self {
            config,
            grid,
            shader,
            last_refresh: None,
        })
    }

    /// Immutable reference to the configuration.
    #[inline]
    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    /// Instant of the most recent refresh, if any.
    #[inline]
    pub fn last_refresh(&self) -> Option<Timestamp> {
        self.last_refresh
    }

    /// Switch illumination strategy. The next tick refreshes immediately.
    pub fn set_mode(&mut self, mode: IlluminationMode) {
        if self.config.mode != mode {
            self.config.mode = mode;
            self.last_refresh = None;
        }
    }

    /// Whether a tick at `now` would recompute.
    ///
    /// True before the first refresh, once the interval has elapsed, and
    /// whenever the clock has gone backwards.
    pub fn is_due(&self, now: Timestamp) -> bool {
        let Some(prev) = self.last_refresh else {
            return true;
        };
        let elapsed_ms = (now - prev).num_milliseconds();
        // Intervals past i64 milliseconds saturate, i.e. never due again.
        let interval_ms = i64::try_from(self.config.refresh_interval_secs)
            .ok()
            .and_then(|secs| secs.checked_mul(1000))
            .unwrap_or(i64::MAX);
        elapsed_ms < 0 || elapsed_ms >= interval_ms
    }

    /// Cooperative timer hook: recompute if due, otherwise do nothing.
    pub fn tick(&mut self, now: Timestamp) -> Option<TerminatorFrame> {
        if !self.is_due(now) {
            return None;
        }
        if let Some(prev) = self.last_refresh {
            if now < prev {
                log::warn!("Clock went backwards ({prev} -> {now}), forcing terminator refresh");
            }
        }
        Some(self.refresh(now))
    }

    /// Unconditionally recompute the frame for `now`.
    pub fn refresh(&mut self, now: Timestamp) -> TerminatorFrame {
        if self.last_refresh.is_none() {
            log::info!(
                "Terminator refresh started: mode={:?}, interval={}s",
                self.config.mode,
                self.config.refresh_interval_secs
            );
        }
        self.last_refresh = Some(now);

        let sub_solar = sub_solar_point(&now);
        let illumination = match self.config.mode {
            IlluminationMode::Grid => IlluminationOverlay::Grid(self.grid.refresh(sub_solar).collect_par()),
            IlluminationMode::Shader => IlluminationOverlay::Shader(self.shader.refresh(sub_solar)),
        };

        log::debug!(
            "Sub-solar point at {now}: declination={:.3}, longitude={:.3}, samples={}",
            sub_solar.declination(),
            sub_solar.longitude(),
            illumination.sample_count()
        );

        TerminatorFrame {
            timestamp: now,
            sub_solar,
            sun_direction: sub_solar.direction(),
            illumination,
            terminator: terminator_line(sub_solar, self.config.terminator_segments),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
