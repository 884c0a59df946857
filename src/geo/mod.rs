//! Geographic coordinates and the globe projection.
//!
//! [`project`] is the one mapping from latitude/longitude to render space.
//! Marker placement and illumination sampling both depend on it.

pub mod coordinate;
pub mod projection;

pub use coordinate::{wrap_longitude, DirectionVector, GeoCoordinate};
pub use projection::{project, unproject};
