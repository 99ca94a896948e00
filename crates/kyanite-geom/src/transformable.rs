// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Objects placed in a 2D scene by position, rotation, scale and origin.
//!
//! The composed matrix is only rebuilt when it is read after a mutation, so
//! a burst of setter calls within a frame costs one recomputation.

use core::cell::Cell;

use kyanite_math::{normalize_degrees, Transform2D, Vec2};

/// Anything that can be moved, rotated and scaled around an origin.
///
/// Rotation is in degrees, clockwise on screen, and always reported in
/// `[0, 360)`.
pub trait Transformable {
    /// Position of the origin in the parent space.
    fn position(&self) -> Vec2;
    /// Sets the position.
    fn set_position(&mut self, position: Vec2);
    /// Rotation in degrees, `[0, 360)`.
    fn rotation(&self) -> f32;
    /// Sets the rotation; the angle is normalized into `[0, 360)`.
    fn set_rotation(&mut self, angle: f32);
    /// Scale factors.
    fn scale(&self) -> Vec2;
    /// Sets the scale factors.
    fn set_scale(&mut self, factors: Vec2);
    /// Local point that rotation and scaling pivot around.
    fn origin(&self) -> Vec2;
    /// Sets the origin.
    fn set_origin(&mut self, origin: Vec2);
    /// Local-to-parent matrix.
    fn transform(&self) -> Transform2D;
    /// Parent-to-local matrix.
    fn inverse_transform(&self) -> Transform2D;

    /// Offsets the position.
    fn move_by(&mut self, offset: Vec2) {
        let position = self.position();
        self.set_position(position + offset);
    }

    /// Adds `angle` degrees to the rotation.
    fn rotate(&mut self, angle: f32) {
        let rotation = self.rotation();
        self.set_rotation(rotation + angle);
    }

    /// Multiplies the scale component-wise.
    fn scale_by(&mut self, factors: Vec2) {
        let scale = self.scale();
        self.set_scale(scale.mul_elem(factors));
    }
}

/// Reference [`Transformable`] holding its own state and matrix cache.
///
/// Cache semantics:
/// - Every setter drops both the cached matrix and its inverse.
/// - `transform()` rebuilds the matrix on the first read after a mutation.
/// - `inverse_transform()` is derived from `transform()` and cached separately.
///
/// The caches use `Cell`, so this type is `!Sync`; wrap it in a lock to share it.
#[derive(Debug, Clone)]
pub struct BasicTransformable {
    position: Vec2,
    rotation: f32,
    scale: Vec2,
    origin: Vec2,
    transform: Cell<Option<Transform2D>>,
    inverse: Cell<Option<Transform2D>>,
}

impl Default for BasicTransformable {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            origin: Vec2::ZERO,
            transform: Cell::new(Some(Transform2D::IDENTITY)),
            inverse: Cell::new(Some(Transform2D::IDENTITY)),
        }
    }
}

impl BasicTransformable {
    /// Identity placement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Placement from explicit components.
    #[must_use]
    pub fn with_parts(position: Vec2, rotation: f32, scale: Vec2, origin: Vec2) -> Self {
        let mut t = Self::default();
        t.set_position(position);
        t.set_rotation(rotation);
        t.set_scale(scale);
        t.set_origin(origin);
        t
    }

    /// Returns `true` while the cached matrix is stale.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.transform.get().is_none()
    }

    fn invalidate(&mut self) {
        *self.transform.get_mut() = None;
        *self.inverse.get_mut() = None;
    }
}

impl Transformable for BasicTransformable {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.invalidate();
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f32) {
        self.rotation = normalize_degrees(angle);
        self.invalidate();
    }

    fn scale(&self) -> Vec2 {
        self.scale
    }

    fn set_scale(&mut self, factors: Vec2) {
        self.scale = factors;
        self.invalidate();
    }

    fn origin(&self) -> Vec2 {
        self.origin
    }

    fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
        self.invalidate();
    }

    fn transform(&self) -> Transform2D {
        if let Some(t) = self.transform.get() {
            return t;
        }
        let t = Transform2D::from_parts(self.position, self.rotation, self.scale, self.origin);
        self.transform.set(Some(t));
        t
    }

    fn inverse_transform(&self) -> Transform2D {
        if let Some(t) = self.inverse.get() {
            return t;
        }
        let t = self.transform().inverse();
        self.inverse.set(Some(t));
        t
    }
}
