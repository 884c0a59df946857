//! Device markers on the globe.
//!
//! Markers are placed with the same [`project`] used for illumination so a
//! marker sitting on the terminator is drawn exactly on the shading edge.

pub mod status;

pub use status::DeviceStatus;

use serde::{Deserialize, Serialize};

use crate::core::DVec3;
use crate::geo::{project, GeoCoordinate};
use crate::solar::SubSolarPoint;

/// Default marker height above the surface, in globe radii.
pub const DEFAULT_MARKER_ALTITUDE: f64 = 0.01;

/// A device location and its status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeviceMarker {
    pub coord: GeoCoordinate,
    pub status: DeviceStatus,
}

impl DeviceMarker {
    pub fn new(coord: GeoCoordinate, status: DeviceStatus) -> Self {
        Self { coord, status }
    }

    /// Render-space position for a unit globe, lifted by `altitude` radii.
    pub fn position(&self, altitude: f64) -> DVec3 {
        project(self.coord).as_dvec3() * (1.0 + altitude)
    }

    /// Whether the sun is above the horizon at this marker.
    pub fn is_daylit(&self, sub: SubSolarPoint) -> bool {
        sub.zenith_angle(&self.coord) < 90.0
    }

    /// Only active devices emit ring pulses.
    #[inline]
    pub fn pulses(&self) -> bool {
        self.status == DeviceStatus::Active
    }
}
