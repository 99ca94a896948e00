// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
//! Property tests for rotation normalization and transform inversion.

use kyanite_math::{normalize_degrees, Transform2D, Vec2};
use proptest::prelude::*;

fn assert_near_identity(m: [f32; 9], tol: f32) -> Result<(), TestCaseError> {
    let id = Transform2D::IDENTITY.to_array();
    for i in 0..9 {
        prop_assert!(
            (m[i] - id[i]).abs() <= tol,
            "index {i}: {m:?} is not identity within {tol}"
        );
    }
    Ok(())
}

// Scales away from zero keep the matrix well-conditioned enough for f32.
fn scale_component() -> impl Strategy<Value = f32> {
    prop_oneof![0.5_f32..4.0, -4.0_f32..-0.5]
}

proptest! {
    #[test]
    fn normalized_rotation_is_in_range_and_congruent(r in -1.0e5_f32..1.0e5) {
        let n = normalize_degrees(r);
        prop_assert!((0.0..360.0).contains(&n), "normalize({r}) = {n}");
        let turns = (f64::from(n) - f64::from(r)) / 360.0;
        // f32 remainder of large inputs carries ulp-scale error.
        prop_assert!((turns - turns.round()).abs() < 1e-3, "normalize({r}) = {n}");
    }

    #[test]
    fn transform_times_inverse_is_identity(
        px in -100.0_f32..100.0,
        py in -100.0_f32..100.0,
        rot in 0.0_f32..360.0,
        sx in scale_component(),
        sy in scale_component(),
        ox in -20.0_f32..20.0,
        oy in -20.0_f32..20.0,
    ) {
        let t = Transform2D::from_parts(Vec2::new(px, py), rot, Vec2::new(sx, sy), Vec2::new(ox, oy));
        let inv = t.inverse();
        assert_near_identity(t.combine(&inv).to_array(), 1e-2)?;
        assert_near_identity(inv.combine(&t).to_array(), 1e-2)?;
    }

    #[test]
    fn inverse_maps_points_back(
        rot in 0.0_f32..360.0,
        sx in scale_component(),
        sy in scale_component(),
        x in -100.0_f32..100.0,
        y in -100.0_f32..100.0,
    ) {
        let t = Transform2D::from_parts(Vec2::new(12.0, -7.0), rot, Vec2::new(sx, sy), Vec2::new(3.0, 4.0));
        let p = Vec2::new(x, y);
        let back = t.inverse().transform_point(t.transform_point(p));
        prop_assert!(back.distance(p) < 1e-2, "{p:?} -> {back:?}");
    }
}

#[test]
fn identity_parts_give_identity_matrix() {
    let t = Transform2D::from_parts(Vec2::ZERO, 0.0, Vec2::ONE, Vec2::ZERO);
    assert_eq!(t.to_array(), Transform2D::IDENTITY.to_array());
    assert_eq!(t.inverse().to_array(), Transform2D::IDENTITY.to_array());
}
