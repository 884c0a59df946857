//! Solar position model.
//!
//! Turns a UTC timestamp into the [`SubSolarPoint`], the place on the globe
//! where the sun is overhead. Everything here is a pure function of the
//! timestamp; there is no clock state.

pub mod position;

pub use position::{
    day_of_year, solar_declination, solar_longitude, sub_solar_point, sun_direction, utc_hours,
    SubSolarPoint, AXIAL_TILT_DEG,
};
