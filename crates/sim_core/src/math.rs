//! 2D math aliases and angle helpers shared across the workspace.
//!
//! Everything simulation-facing works in `f32`; positions are points,
//! displacements and velocities are vectors, headings are angles in
//! radians measured counter-clockwise from the positive x axis.

use nalgebra::{Rotation2, Vector2};

/// 2D vector of f32 (displacements, velocities, accelerations).
pub type Vec2 = Vector2<f32>;

/// 2D point of f32 (positions).
pub type Point2 = nalgebra::Point2<f32>;

/// 2D rotation of f32.
pub type Rot2 = Rotation2<f32>;

/// Converts degrees to radians.
#[must_use]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Converts radians to degrees.
#[must_use]
pub fn rad_to_deg(radians: f32) -> f32 {
    radians.to_degrees()
}

/// Unit vector pointing along `heading` radians.
#[must_use]
pub fn heading_vector(heading: f32) -> Vec2 {
    Rot2::new(heading) * Vec2::x()
}

/// Angle of a vector in radians, counter-clockwise from positive x.
///
/// Returns 0.0 for the zero vector.
#[must_use]
pub fn angle_of(v: Vec2) -> f32 {
    if v == Vec2::zeros() {
        0.0
    } else {
        v.y.atan2(v.x)
    }
}
