//! Terminator line as great-circle arc segments.
//!
//! The terminator is the great circle 90° away from the sub-solar point.
//! It is traced in render space (two vectors spanning the plane normal to the
//! sun direction) and mapped back through [`unproject`] so renderers that
//! draw arcs from lat/lng pairs line up with the markers.

use serde::Serialize;

use crate::core::DVec3;
use crate::geo::{unproject, DirectionVector, GeoCoordinate};
use crate::solar::SubSolarPoint;

/// Fewest segments a closed terminator loop is split into.
pub const MIN_TERMINATOR_SEGMENTS: usize = 3;

/// One arc of the terminator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TerminatorSegment {
    pub start: GeoCoordinate,
    pub end: GeoCoordinate,
}

/// Points evenly spaced around the terminator, `segments` of them.
pub fn terminator_points(sub: SubSolarPoint, segments: usize) -> Vec<GeoCoordinate> {
    let n = segments.max(MIN_TERMINATOR_SEGMENTS);
    let sun = sub.direction().as_dvec3();

    // Any axis not parallel to the sun gives a valid basis
    let reference = if sun.y.abs() < 0.99 { DVec3::Y } else { DVec3::X };
    let u = reference.cross(sun).normalize();
    let v = sun.cross(u);

    (0..n)
        .map(|k| {
            let t = std::f64::consts::TAU * k as f64 / n as f64;
            let (sin_t, cos_t) = t.sin_cos();
            unproject(DirectionVector::from_unit(u * cos_t + v * sin_t))
        })
        .collect()
}

/// The closed terminator loop as `segments` arcs.
pub fn terminator_line(sub: SubSolarPoint, segments: usize) -> Vec<TerminatorSegment> {
    let points = terminator_points(sub, segments);
    let n = points.len();
    (0..n)
        .map(|i| TerminatorSegment {
            start: points[i],
            end: points[(i + 1) % n],
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
