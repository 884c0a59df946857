//! Geographic to render-space projection.
//!
//! Latitude becomes a polar angle measured from the north pole and longitude
//! an azimuth offset by 180 degrees from the reference meridian:
//!
//! ```text
//! phi   = (90 - lat)  in radians
//! theta = (lng + 180) in radians
//! x = sin(phi) * sin(theta)
//! y = cos(phi)
//! z = sin(phi) * cos(theta)
//! ```
//!
//! Device markers, illumination samples and the terminator line all go
//! through [`project`]; any second convention would make markers and the
//! terminator drift apart on the globe.

use crate::core::DVec3;
use crate::geo::coordinate::{wrap_longitude, DirectionVector, GeoCoordinate};

/// Project a geographic coordinate onto the unit sphere.
///
/// Longitude is wrapped into `[-180, 180)` first, so `-180` and `180` give
/// bit-identical vectors.
pub fn project(coord: GeoCoordinate) -> DirectionVector {
    let phi = (90.0 - coord.lat()).to_radians();
    let theta = (wrap_longitude(coord.lng()) + 180.0).to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();

    DirectionVector::from_unit(DVec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta))
}

/// Inverse of [`project`].
///
/// At the poles longitude is undefined; whatever `atan2` yields is returned.
pub fn unproject(direction: DirectionVector) -> GeoCoordinate {
    let v = direction.as_dvec3();
    let lat = 90.0 - v.y.clamp(-1.0, 1.0).acos().to_degrees();
    let lng = wrap_longitude(v.x.atan2(v.z).to_degrees() - 180.0);
    GeoCoordinate::from_degrees_unchecked(lat.clamp(-90.0, 90.0), lng)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> GeoCoordinate {
        GeoCoordinate::new(lat, lng).unwrap()
    }

    fn approx_eq(a: DirectionVector, b: DVec3, eps: f64) -> bool {
        (a.x() - b.x).abs() < eps && (a.y() - b.y).abs() < eps && (a.z() - b.z).abs() < eps
    }

    #[test]
    fn test_deterministic() {
        for lat in (-90..=90).step_by(15) {
            for lng in (-180..=180).step_by(30) {
                let c = coord(lat as f64, lng as f64);
                let a = project(c);
                let b = project(c);
                assert_eq!(a.as_dvec3().to_array().map(f64::to_bits), b.as_dvec3().to_array().map(f64::to_bits));
            }
        }
    }

    #[test]
    fn test_unit_length() {
        for lat in (-90..=90).step_by(10) {
            for lng in (-180..180).step_by(20) {
                let d = project(coord(lat as f64, lng as f64));
                assert!((d.as_dvec3().length() - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_poles() {
        for lng in [-180.0, -97.5, 0.0, 45.0, 180.0] {
            let north = project(coord(90.0, lng));
            assert!(approx_eq(north, DVec3::Y, 1e-12), "north pole at lng {lng}: {north:?}");

            let south = project(coord(-90.0, lng));
            assert!(approx_eq(south, DVec3::NEG_Y, 1e-12), "south pole at lng {lng}: {south:?}");
        }
    }

    #[test]
    fn test_longitude_wraparound_identical() {
        for lat in (-90..=90).step_by(5) {
            let west = project(coord(lat as f64, -180.0));
            let east = project(coord(lat as f64, 180.0));
            assert_eq!(west, east, "wrap mismatch at lat {lat}");
        }
    }

    #[test]
    fn test_reference_meridians() {
        // lng = 0 faces -Z, lng = 90 faces -X under the 180 degree offset
        assert!(approx_eq(project(coord(0.0, 0.0)), DVec3::NEG_Z, 1e-12));
        assert!(approx_eq(project(coord(0.0, 90.0)), DVec3::NEG_X, 1e-12));
        assert!(approx_eq(project(coord(0.0, -90.0)), DVec3::X, 1e-12));
        assert!(approx_eq(project(coord(0.0, 180.0)), DVec3::Z, 1e-12));
    }

    #[test]
    fn test_unproject_inverts_project() {
        for lat in (-85..=85).step_by(5) {
            for lng in (-180..180).step_by(15) {
                let c = coord(lat as f64, lng as f64);
                let back = unproject(project(c));
                assert!((back.lat() - c.lat()).abs() < 1e-9, "lat {} -> {}", c.lat(), back.lat());
                let dlng = wrap_longitude(back.lng() - c.lng());
                assert!(dlng.abs() < 1e-9, "lng {} -> {}", c.lng(), back.lng());
            }
        }
    }
}
