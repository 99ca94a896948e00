// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Rotations are stored in degrees, clockwise in screen space (y grows
//! downward). These helpers keep that convention in one place.

use crate::vec2::Vec2;

/// Wraps `angle` (degrees) into `[0, 360)`.
///
/// The result is congruent to `angle` modulo 360. Non-finite input yields NaN.
#[must_use]
pub fn normalize_degrees(angle: f32) -> f32 {
    let mut r = angle % 360.0;
    if r < 0.0 {
        r += 360.0;
    }
    // A tiny negative remainder rounds up to exactly 360.0 after the shift.
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Converts degrees to radians.
#[must_use]
pub fn deg_to_rad(angle: f32) -> f32 {
    angle.to_radians()
}

/// Converts radians to degrees.
#[must_use]
pub fn rad_to_deg(angle: f32) -> f32 {
    angle.to_degrees()
}

/// Unit vector pointing up (`-y`) rotated clockwise by `angle` degrees.
#[must_use]
pub fn direction(angle: f32) -> Vec2 {
    let (sin, cos) = deg_to_rad(angle).sin_cos();
    Vec2::new(sin, -cos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_negative_and_large_angles() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(450.0), 90.0);
        assert_eq!(normalize_degrees(359.5), 359.5);
    }

    #[test]
    fn tiny_negative_does_not_reach_360() {
        let r = normalize_degrees(-1.0e-8);
        assert!((0.0..360.0).contains(&r), "got {r}");
    }

    #[test]
    fn nan_propagates() {
        assert!(normalize_degrees(f32::NAN).is_nan());
        assert!(normalize_degrees(f32::INFINITY).is_nan());
    }

    #[test]
    fn direction_points_up_then_right() {
        let up = direction(0.0);
        assert!((up.x).abs() < 1e-6 && (up.y + 1.0).abs() < 1e-6);
        let right = direction(90.0);
        assert!((right.x - 1.0).abs() < 1e-6 && right.y.abs() < 1e-6);
    }
}
