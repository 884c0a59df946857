//! Geographic coordinates and render-space directions.

use serde::{Deserialize, Serialize};

use crate::core::{DVec3, Error, Result};

/// Latitude/longitude pair in degrees.
///
/// Latitude is in `[-90, 90]` and longitude in `[-180, 180]`. Values outside
/// those ranges are rejected by [`GeoCoordinate::new`] so they never reach
/// the trigonometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct GeoCoordinate {
    lat: f64,
    lng: f64,
}

impl GeoCoordinate {
    /// Create a coordinate, failing with [`Error::InvalidCoordinate`] when out of range.
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        if !valid {
            return Err(Error::InvalidCoordinate { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    /// Create a coordinate by clamping latitude and wrapping longitude.
    ///
    /// Non-finite components become 0.
    pub fn clamped(lat: f64, lng: f64) -> Self {
        let lat = if lat.is_finite() { lat.clamp(-90.0, 90.0) } else { 0.0 };
        let lng = if lng.is_finite() { wrap_longitude(lng) } else { 0.0 };
        Self { lat, lng }
    }

    /// Construct without validation. Callers guarantee the range.
    #[inline]
    pub(crate) const fn from_degrees_unchecked(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Latitude in degrees.
    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[inline]
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Great-circle angle to `other` in degrees (spherical law of cosines).
    pub fn angular_distance(&self, other: &GeoCoordinate) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let dlng = (other.lng - self.lng).to_radians();
        let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * dlng.cos();
        // Rounding can push the argument just past +-1.
        cos_angle.clamp(-1.0, 1.0).acos().to_degrees()
    }
}

impl TryFrom<(f64, f64)> for GeoCoordinate {
    type Error = Error;

    fn try_from((lat, lng): (f64, f64)) -> Result<Self> {
        Self::new(lat, lng)
    }
}

#[derive(Serialize, Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinate> for GeoCoordinate {
    type Error = Error;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Self::new(raw.lat, raw.lng)
    }
}

impl From<GeoCoordinate> for RawCoordinate {
    fn from(c: GeoCoordinate) -> Self {
        Self { lat: c.lat, lng: c.lng }
    }
}

/// Wrap a longitude into `[-180, 180)`.
#[inline]
pub fn wrap_longitude(lng: f64) -> f64 {
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

// ---------------------------------------------------------------------------
// DirectionVector
// ---------------------------------------------------------------------------

/// Unit vector in render space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionVector(DVec3);

impl DirectionVector {
    /// Normalize `v` into a direction. Zero or non-finite vectors are rejected.
    pub fn new(v: DVec3) -> Result<Self> {
        v.try_normalize()
            .map(Self)
            .ok_or(Error::InvalidDirection(v.to_array()))
    }

    /// Wrap a vector the caller knows to be unit length.
    #[inline]
    pub(crate) const fn from_unit(v: DVec3) -> Self {
        Self(v)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Underlying vector.
    #[inline]
    pub fn as_dvec3(&self) -> DVec3 {
        self.0
    }

    /// Dot product with another direction (cosine of the angle between them).
    #[inline]
    pub fn dot(&self, other: &DirectionVector) -> f64 {
        self.0.dot(other.0)
    }

    /// Single-precision components for GPU upload.
    pub fn to_f32_array(&self) -> [f32; 3] {
        self.0.as_vec3().to_array()
    }
}

impl From<DirectionVector> for DVec3 {
    fn from(d: DirectionVector) -> Self {
        d.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_bounds() {
        assert!(GeoCoordinate::new(90.0, 180.0).is_ok());
        assert!(GeoCoordinate::new(-90.0, -180.0).is_ok());
        assert!(GeoCoordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(matches!(
            GeoCoordinate::new(90.5, 0.0),
            Err(Error::InvalidCoordinate { .. })
        ));
        assert!(GeoCoordinate::new(0.0, 181.0).is_err());
        assert!(GeoCoordinate::new(f64::NAN, 0.0).is_err());
        assert!(GeoCoordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_try_from_tuple() {
        let c = GeoCoordinate::try_from((-33.8688, 151.2093)).unwrap();
        assert_eq!(c, GeoCoordinate::new(-33.8688, 151.2093).unwrap());
        assert!(matches!(
            GeoCoordinate::try_from((0.0, -180.5)),
            Err(Error::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_clamped() {
        let c = GeoCoordinate::clamped(120.0, 190.0);
        assert_eq!(c.lat(), 90.0);
        assert!((c.lng() - -170.0).abs() < 1e-9, "lng = {}", c.lng());

        let c = GeoCoordinate::clamped(f64::NAN, -540.0);
        assert_eq!(c.lat(), 0.0);
        assert_eq!(c.lng(), -180.0);
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(180.0), -180.0);
        assert_eq!(wrap_longitude(-180.0), -180.0);
        assert_eq!(wrap_longitude(0.0), 0.0);
        assert!((wrap_longitude(359.0) - -1.0).abs() < 1e-9);
        assert!((wrap_longitude(-190.0) - 170.0).abs() < 1e-9);
    }

    #[test]
    fn test_angular_distance() {
        let a = GeoCoordinate::new(0.0, 0.0).unwrap();
        let b = GeoCoordinate::new(0.0, 90.0).unwrap();
        assert!((a.angular_distance(&b) - 90.0).abs() < 1e-9);
        assert_eq!(a.angular_distance(&a), 0.0);

        let n = GeoCoordinate::new(90.0, 0.0).unwrap();
        let s = GeoCoordinate::new(-90.0, 45.0).unwrap();
        assert!((n.angular_distance(&s) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_serde_validates() {
        let c: GeoCoordinate = serde_json::from_str(r#"{"lat": 51.5, "lng": -0.12}"#).unwrap();
        assert_eq!(c.lat(), 51.5);
        assert!(serde_json::from_str::<GeoCoordinate>(r#"{"lat": 95.0, "lng": 0.0}"#).is_err());
    }

    #[test]
    fn test_direction_rejects_zero() {
        assert!(matches!(
            DirectionVector::new(DVec3::ZERO),
            Err(Error::InvalidDirection(_))
        ));
        let d = DirectionVector::new(DVec3::new(0.0, 3.0, 0.0)).unwrap();
        assert_eq!(d.as_dvec3(), DVec3::Y);
    }
}
