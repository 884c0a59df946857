//! Sub-solar point calculation.
//!
//! Computes where the sun is directly overhead from the UTC fields of a
//! timestamp. This is a simplified model (cosine declination, uniform 15°/h
//! rotation), not an ephemeris; repeated calls with the same instant always
//! return the same point.

use chrono::{Datelike, Timelike};

use crate::core::{Error, Result, Timestamp};
use crate::geo::{project, DirectionVector, GeoCoordinate};

/// Earth's axial tilt in degrees.
pub const AXIAL_TILT_DEG: f64 = 23.44;

/// Days added to the day-of-year so the cosine bottoms out near the December solstice.
pub const SOLSTICE_PHASE_DAYS: f64 = 10.0;

/// Degrees of longitude the sub-solar point moves westward per hour.
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// Point on the globe where the sun is at the zenith.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubSolarPoint(GeoCoordinate);

impl SubSolarPoint {
    /// Build from a declination and solar longitude, both in degrees.
    ///
    /// Declination is clamped to `[-AXIAL_TILT_DEG, AXIAL_TILT_DEG]`, so an
    /// out-of-range value silently becomes the nearest tropic; longitude is
    /// wrapped into `(-180, 180]`. Use [`try_new`](Self::try_new) to reject
    /// such input instead.
    pub fn new(declination: f64, longitude: f64) -> Self {
        let lat = declination.clamp(-AXIAL_TILT_DEG, AXIAL_TILT_DEG);
        // Keep +180 as-is so midnight reads as 180 rather than -180.
        let lng = if longitude == 180.0 {
            180.0
        } else {
            crate::geo::wrap_longitude(longitude)
        };
        Self(GeoCoordinate::from_degrees_unchecked(lat, lng))
    }

    /// Like [`new`](Self::new), but fails with [`Error::InvalidCoordinate`]
    /// when the declination lies outside the tilt range or either value is
    /// not finite.
    pub fn try_new(declination: f64, longitude: f64) -> Result<Self> {
        if !(declination.is_finite() && longitude.is_finite())
            || declination.abs() > AXIAL_TILT_DEG
        {
            return Err(Error::InvalidCoordinate {
                lat: declination,
                lng: longitude,
            });
        }
        Ok(Self::new(declination, longitude))
    }

    /// Solar declination (latitude of the sub-solar point) in degrees.
    #[inline]
    pub fn declination(&self) -> f64 {
        self.0.lat()
    }

    /// Longitude of the sub-solar point in degrees.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.0.lng()
    }

    /// The sub-solar point as a plain coordinate.
    #[inline]
    pub fn coordinate(&self) -> GeoCoordinate {
        self.0
    }

    /// Direction from the globe centre towards the sun, in render space.
    #[inline]
    pub fn direction(&self) -> DirectionVector {
        project(self.0)
    }

    /// Solar zenith angle in degrees at `coord`.
    #[inline]
    pub fn zenith_angle(&self, coord: &GeoCoordinate) -> f64 {
        coord.angular_distance(&self.0)
    }
}

impl From<SubSolarPoint> for GeoCoordinate {
    fn from(s: SubSolarPoint) -> Self {
        s.0
    }
}

/// Zero-based day of the UTC year (1 January = 0).
#[inline]
pub fn day_of_year(t: &Timestamp) -> u32 {
    t.ordinal0()
}

/// UTC time of day as fractional hours, to whole-second resolution.
#[inline]
pub fn utc_hours(t: &Timestamp) -> f64 {
    t.hour() as f64 + t.minute() as f64 / 60.0 + t.second() as f64 / 3600.0
}

/// Solar declination in degrees for a zero-based day of year.
pub fn solar_declination(day_of_year: u32) -> f64 {
    let year_angle = std::f64::consts::TAU / 365.0 * (day_of_year as f64 + SOLSTICE_PHASE_DAYS);
    -AXIAL_TILT_DEG * year_angle.cos()
}

/// Longitude of the sub-solar point for a UTC time of day in hours.
///
/// Longitude 0 is overhead at 12:00 UTC and the point moves 15° west per
/// hour, so midnight maps to 180 and the result stays in `(-180, 180]` for
/// hours in `[0, 24)`.
pub fn solar_longitude(hours: f64) -> f64 {
    (hours - 12.0) * -DEGREES_PER_HOUR
}

/// Compute the sub-solar point for an instant.
pub fn sub_solar_point(t: &Timestamp) -> SubSolarPoint {
    let declination = solar_declination(day_of_year(t));
    let longitude = solar_longitude(utc_hours(t));
    SubSolarPoint::new(declination, longitude)
}

/// Direction towards the sun for an instant.
pub fn sun_direction(t: &Timestamp) -> DirectionVector {
    sub_solar_point(t).direction()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_day_of_year_zero_based() {
        assert_eq!(day_of_year(&utc(2024, 1, 1, 0, 0, 0)), 0);
        assert_eq!(day_of_year(&utc(2024, 1, 1, 23, 59, 59)), 0);
        assert_eq!(day_of_year(&utc(2024, 6, 21, 12, 0, 0)), 172);
        assert_eq!(day_of_year(&utc(2024, 12, 21, 0, 0, 0)), 355);
        assert_eq!(day_of_year(&utc(2023, 12, 31, 0, 0, 0)), 364);
    }

    #[test]
    fn test_declination_solstices() {
        let june = solar_declination(172);
        assert!((june - AXIAL_TILT_DEG).abs() < 0.05, "June solstice declination = {june}");

        let december = solar_declination(355);
        assert!((december + AXIAL_TILT_DEG).abs() < 0.05, "December solstice declination = {december}");
    }

    #[test]
    fn test_declination_equinoxes() {
        for day in [80, 266] {
            let d = solar_declination(day);
            assert!(d.abs() < 1.0, "equinox day {day} declination = {d}");
        }
    }

    #[test]
    fn test_declination_bounded() {
        for day in 0..366 {
            let d = solar_declination(day);
            assert!(d.abs() <= AXIAL_TILT_DEG + 1e-9, "day {day}: {d}");
        }
    }

    #[test]
    fn test_new_clamps_declination() {
        let s = SubSolarPoint::new(40.0, 0.0);
        assert_eq!(s.declination(), AXIAL_TILT_DEG);
        let s = SubSolarPoint::new(-90.0, 190.0);
        assert_eq!(s.declination(), -AXIAL_TILT_DEG);
        assert!((s.longitude() + 170.0).abs() < 1e-12, "longitude = {}", s.longitude());
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert!(matches!(
            SubSolarPoint::try_new(40.0, 0.0),
            Err(Error::InvalidCoordinate { .. })
        ));
        assert!(SubSolarPoint::try_new(-23.5, 0.0).is_err());
        assert!(SubSolarPoint::try_new(f64::NAN, 0.0).is_err());
        assert!(SubSolarPoint::try_new(0.0, f64::INFINITY).is_err());

        let s = SubSolarPoint::try_new(-AXIAL_TILT_DEG, 180.0).unwrap();
        assert_eq!(s, SubSolarPoint::new(-AXIAL_TILT_DEG, 180.0));
        assert_eq!(s.longitude(), 180.0);
    }

    #[test]
    fn test_longitude_at_noon_and_midnight() {
        for (y, m, d) in [(2024, 3, 20), (2024, 6, 21), (2025, 11, 2)] {
            let noon = sub_solar_point(&utc(y, m, d, 12, 0, 0));
            assert_eq!(noon.longitude(), 0.0);

            let midnight = sub_solar_point(&utc(y, m, d, 0, 0, 0));
            assert_eq!(midnight.longitude().abs(), 180.0);
        }
    }

    #[test]
    fn test_longitude_moves_west() {
        assert_eq!(solar_longitude(13.0), -15.0);
        assert_eq!(solar_longitude(6.0), 90.0);
        assert_eq!(solar_longitude(18.0), -90.0);
        assert!((solar_longitude(utc_hours(&utc(2024, 1, 1, 12, 30, 0))) - -7.5).abs() < 1e-12);
        assert!((solar_longitude(utc_hours(&utc(2024, 1, 1, 12, 0, 36))) - -0.15).abs() < 1e-12);
    }

    #[test]
    fn test_longitude_range() {
        for minute in 0..(24 * 60) {
            let t = utc(2024, 5, 1, minute / 60, minute % 60, 0);
            let lng = sub_solar_point(&t).longitude();
            assert!(lng > -180.0 && lng <= 180.0, "minute {minute}: lng {lng}");
        }
    }

    #[test]
    fn test_deterministic() {
        let t = utc(2024, 9, 14, 7, 42, 13);
        assert_eq!(sub_solar_point(&t), sub_solar_point(&t));
        assert_eq!(sun_direction(&t), sun_direction(&t));
    }

    #[test]
    fn test_june_solstice_noon() {
        let s = sub_solar_point(&utc(2024, 6, 21, 12, 0, 0));
        assert!((s.declination() - 23.4).abs() < 0.1, "declination = {}", s.declination());
        assert!(s.longitude().abs() < 1e-9);
    }

    #[test]
    fn test_zenith_at_sub_solar_point() {
        let s = sub_solar_point(&utc(2024, 4, 2, 9, 15, 0));
        assert!(s.zenith_angle(&s.coordinate()) < 1e-5);
    }

    #[test]
    fn test_sun_direction_matches_projection() {
        let s = sub_solar_point(&utc(2024, 6, 21, 12, 0, 0));
        let dir = s.direction();
        assert_eq!(dir, project(s.coordinate()));
        // Sun over lng 0 in the northern summer: -Z hemisphere, tilted up
        assert!(dir.z() < -0.9, "dir = {dir:?}");
        assert!(dir.y() > 0.39, "dir = {dir:?}");
    }
}
