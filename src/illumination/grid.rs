//! Discretized day-side sampling.
//!
//! [`DaySideGrid`] walks a regular latitude/longitude lattice and yields an
//! [`IlluminationSample`] for every lattice point whose solar zenith angle is
//! below 90°. Night-side points are skipped entirely. The grid is `Copy` and
//! can be iterated any number of times; each pass recomputes from scratch.

use rayon::prelude::*;
use serde::Serialize;

use crate::core::{Error, Result};
use crate::geo::{DirectionVector, GeoCoordinate};
use crate::illumination::IlluminationSampler;
use crate::solar::SubSolarPoint;

/// Zenith angle (degrees) at which the sun sits on the horizon.
pub const HORIZON_ZENITH_DEG: f64 = 90.0;

/// Largest lattice a grid may hold, day and night points together.
///
/// Fits a 0.05° lattice; anything finer fails with [`Error::InvalidStep`].
pub const MAX_GRID_POINTS: usize = 1 << 25;

/// A single day-side lattice point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct IlluminationSample {
    pub coord: GeoCoordinate,
    /// Solar zenith angle in degrees, always `< 90`.
    pub zenith: f64,
    /// `cos(zenith)` clamped to `[0, 1]`: 1 under the sun, 0 at the terminator.
    pub intensity: f64,
}

/// Illumination weight for a solar zenith angle in degrees.
///
/// Returns exactly 0 at or beyond the horizon.
#[inline]
pub fn intensity_for_zenith(zenith_deg: f64) -> f64 {
    if zenith_deg >= HORIZON_ZENITH_DEG {
        return 0.0;
    }
    zenith_deg.to_radians().cos().clamp(0.0, 1.0)
}

fn validate_step(step: f64) -> Result<f64> {
    if step.is_finite() && step > 0.0 {
        Ok(step)
    } else {
        Err(Error::InvalidStep(step))
    }
}

/// Row and column counts for a pair of validated steps.
///
/// Counts are computed in `f64` and bounded by [`MAX_GRID_POINTS`] before any
/// integer conversion, so arbitrarily small steps cannot overflow.
fn lattice_counts(lat_step: f64, lng_step: f64) -> Result<(usize, usize)> {
    let lat_step = validate_step(lat_step)?;
    let lng_step = validate_step(lng_step)?;

    // Small epsilon so steps that divide the range evenly keep their end point.
    let lat_count = (180.0 / lat_step + 1e-9).floor() + 1.0;
    let lng_count = (360.0 / lng_step - 1e-9).ceil().max(1.0);

    let max = MAX_GRID_POINTS as f64;
    if lat_count > max {
        return Err(Error::InvalidStep(lat_step));
    }
    if lng_count > max {
        return Err(Error::InvalidStep(lng_step));
    }
    let (lat_count, lng_count) = (lat_count as usize, lng_count as usize);
    match lat_count.checked_mul(lng_count) {
        Some(n) if n <= MAX_GRID_POINTS => Ok((lat_count, lng_count)),
        _ => Err(Error::InvalidStep(lat_step.min(lng_step))),
    }
}

// ---------------------------------------------------------------------------
// DaySideGrid
// ---------------------------------------------------------------------------

/// Lattice of day-side samples for one sub-solar point.
///
/// Latitudes run from -90 to 90 inclusive, longitudes from -180 up to (but
/// not including) 180, since 180 and -180 are the same meridian.
#[derive(Clone, Copy, Debug)]
pub struct DaySideGrid {
    sub: SubSolarPoint,
    lat_step: f64,
    lng_step: f64,
    lat_count: usize,
    lng_count: usize,
}

impl DaySideGrid {
    /// Create a grid, validating that both steps are finite and positive and
    /// that the lattice holds at most [`MAX_GRID_POINTS`] points.
    pub fn new(sub: SubSolarPoint, lat_step: f64, lng_step: f64) -> Result<Self> {
        let (lat_count, lng_count) = lattice_counts(lat_step, lng_step)?;
        Ok(Self {
            sub,
            lat_step,
            lng_step,
            lat_count,
            lng_count,
        })
    }

    #[inline]
    pub fn sub_solar_point(&self) -> SubSolarPoint {
        self.sub
    }

    /// Number of latitude rows.
    #[inline]
    pub fn lat_count(&self) -> usize {
        self.lat_count
    }

    /// Number of longitude columns.
    #[inline]
    pub fn lng_count(&self) -> usize {
        self.lng_count
    }

    /// Total lattice points, day and night.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.lat_count * self.lng_count
    }

    /// Iterate over the day-side samples, row by row from the south pole.
    pub fn iter(&self) -> DaySideSamples {
        DaySideSamples {
            grid: *self,
            lat_idx: 0,
            lng_idx: 0,
        }
    }

    /// Day-side samples of one latitude row.
    pub fn row(&self, lat_idx: usize) -> impl Iterator<Item = IlluminationSample> + '_ {
        (0..self.lng_count).filter_map(move |lng_idx| self.sample_at(lat_idx, lng_idx))
    }

    /// Evaluate the whole grid with rows spread across the rayon pool.
    ///
    /// Produces the same samples in the same order as [`iter`](Self::iter).
    pub fn collect_par(&self) -> Vec<IlluminationSample> {
        (0..self.lat_count)
            .into_par_iter()
            .flat_map_iter(|lat_idx| self.row(lat_idx))
            .collect()
    }

    /// Fraction of lattice points on the day side.
    pub fn daylit_fraction(&self) -> f64 {
        let total = self.point_count();
        if total == 0 {
            return 0.0;
        }
        self.iter().count() as f64 / total as f64
    }

    fn coord_at(&self, lat_idx: usize, lng_idx: usize) -> GeoCoordinate {
        let lat = (-90.0 + lat_idx as f64 * self.lat_step).min(90.0);
        let lng = -180.0 + lng_idx as f64 * self.lng_step;
        GeoCoordinate::from_degrees_unchecked(lat, lng)
    }

    fn sample_at(&self, lat_idx: usize, lng_idx: usize) -> Option<IlluminationSample> {
        let coord = self.coord_at(lat_idx, lng_idx);
        let zenith = self.sub.zenith_angle(&coord);
        if zenith >= HORIZON_ZENITH_DEG {
            return None;
        }
        Some(IlluminationSample {
            coord,
            zenith,
            intensity: intensity_for_zenith(zenith),
        })
    }
}

impl<'a> IntoIterator for &'a DaySideGrid {
    type Item = IlluminationSample;
    type IntoIter = DaySideSamples;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the day-side samples of a [`DaySideGrid`].
#[derive(Clone, Debug)]
pub struct DaySideSamples {
    grid: DaySideGrid,
    lat_idx: usize,
    lng_idx: usize,
}

impl Iterator for DaySideSamples {
    type Item = IlluminationSample;

    fn next(&mut self) -> Option<Self::Item> {
        while self.lat_idx < self.grid.lat_count {
            let (lat_idx, lng_idx) = (self.lat_idx, self.lng_idx);
            self.lng_idx += 1;
            if self.lng_idx >= self.grid.lng_count {
                self.lng_idx = 0;
                self.lat_idx += 1;
            }
            if let Some(sample) = self.grid.sample_at(lat_idx, lng_idx) {
                return Some(sample);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Bounded by MAX_GRID_POINTS at construction.
        let visited = self.lat_idx * self.grid.lng_count + self.lng_idx;
        (0, Some(self.grid.point_count().saturating_sub(visited)))
    }
}

impl std::iter::FusedIterator for DaySideSamples {}

/// Build the day-side grid for `sub` at the given steps (degrees).
pub fn day_side_samples(sub: SubSolarPoint, lat_step: f64, lng_step: f64) -> Result<DaySideGrid> {
    DaySideGrid::new(sub, lat_step, lng_step)
}

// ---------------------------------------------------------------------------
// GridSampler
// ---------------------------------------------------------------------------

/// Grid-mode sampler: hands the renderer weighted day-side points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSampler {
    lat_step: f64,
    lng_step: f64,
    lat_count: usize,
    lng_count: usize,
}

impl GridSampler {
    /// Validates the steps up front so every later refresh is infallible.
    pub fn new(lat_step: f64, lng_step: f64) -> Result<Self> {
        let (lat_count, lng_count) = lattice_counts(lat_step, lng_step)?;
        Ok(Self {
            lat_step,
            lng_step,
            lat_count,
            lng_count,
        })
    }

    #[inline]
    pub fn lat_step(&self) -> f64 {
        self.lat_step
    }

    #[inline]
    pub fn lng_step(&self) -> f64 {
        self.lng_step
    }
}

impl IlluminationSampler for GridSampler {
    type Overlay = DaySideGrid;

    fn refresh(&self, sub: SubSolarPoint) -> DaySideGrid {
        DaySideGrid {
            sub,
            lat_step: self.lat_step,
            lng_step: self.lng_step,
            lat_count: self.lat_count,
            lng_count: self.lng_count,
        }
    }

    fn daylight(&self, direction: DirectionVector, sub: SubSolarPoint) -> f64 {
        // cos(zenith), dark side clamped to 0
        direction.dot(&sub.direction()).clamp(0.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
