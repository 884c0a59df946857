//! Terminus - sub-solar point, day/night terminator and globe projection
//! for device-map globes

pub mod core;
pub mod geo;
pub mod solar;
pub mod illumination;
pub mod markers;
pub mod globe;
