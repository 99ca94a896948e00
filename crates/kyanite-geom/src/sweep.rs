// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Contact prediction for axis-aligned bodies moving with constant velocity.
//!
//! [`GravityBody`] adds a downward pull: [`stop_at_barrier_grounded`] lands
//! falling bodies flush on surfaces and [`is_on_ground`] tells whether a
//! body is standing on one.
//!
//! The stationary side is always a plain [`FloatRect`]; pass
//! `shape.global_bounds()` to use a shape as a barrier.

use core::time::Duration;

use kyanite_math::{Axis, Direction, FloatRect, Vec2};
use tracing::trace;

use crate::shape::Shape;
use crate::transformable::Transformable;

/// An axis-aligned body with a velocity (units per second).
pub trait MovingBody {
    /// Current velocity.
    fn velocity(&self) -> Vec2;
    /// Replaces the velocity.
    fn set_velocity(&mut self, velocity: Vec2);
    /// Translates the body.
    fn move_by(&mut self, offset: Vec2);
    /// World-space bounds.
    fn bounds(&self) -> FloatRect;
}

/// A [`MovingBody`] pulled downward (+y) by a constant acceleration.
pub trait GravityBody: MovingBody {
    /// Downward acceleration in units per second squared.
    fn gravity(&self) -> f32;
}

/// A [`Shape`] paired with a velocity.
#[derive(Debug, Clone)]
pub struct MovingShape {
    /// The moving outline.
    pub shape: Shape,
    /// Velocity in units per second.
    pub velocity: Vec2,
}

impl MovingShape {
    /// Wraps `shape` with the given velocity.
    #[must_use]
    pub fn new(shape: Shape, velocity: Vec2) -> Self {
        Self { shape, velocity }
    }

    /// Adds a downward acceleration; the shape then implements [`GravityBody`].
    #[must_use]
    pub fn with_gravity(self, gravity: f32) -> GravityShape {
        GravityShape {
            body: self,
            gravity,
        }
    }

    /// Advances the shape by `velocity * dt`.
    pub fn step(&mut self, dt: Duration) {
        let offset = self.velocity * dt.as_secs_f32();
        Transformable::move_by(&mut self.shape, offset);
    }
}

impl MovingBody for MovingShape {
    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn move_by(&mut self, offset: Vec2) {
        Transformable::move_by(&mut self.shape, offset);
    }

    fn bounds(&self) -> FloatRect {
        self.shape.global_bounds()
    }
}

/// A [`MovingShape`] with gravity.
#[derive(Debug, Clone)]
pub struct GravityShape {
    /// The moving shape.
    pub body: MovingShape,
    /// Downward acceleration in units per second squared.
    pub gravity: f32,
}

impl GravityShape {
    /// Accelerates by gravity, then advances by the new velocity.
    pub fn step(&mut self, dt: Duration) {
        apply_gravity(self, dt);
        self.body.step(dt);
    }
}

impl MovingBody for GravityShape {
    fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.body.velocity = velocity;
    }

    fn move_by(&mut self, offset: Vec2) {
        MovingBody::move_by(&mut self.body, offset);
    }

    fn bounds(&self) -> FloatRect {
        self.body.bounds()
    }
}

impl GravityBody for GravityShape {
    fn gravity(&self) -> f32 {
        self.gravity
    }
}

fn collides_horizontally(a: &FloatRect, dx: f32, b: &FloatRect) -> bool {
    a.left + dx < b.right()
        && a.right() + dx > b.left
        && !(a.top >= b.bottom() || a.bottom() <= b.top)
}

fn collides_vertically(a: &FloatRect, dy: f32, b: &FloatRect) -> bool {
    a.top + dy < b.bottom()
        && a.bottom() + dy > b.top
        && !(a.left >= b.right() || a.right() <= b.left)
}

/// Predicts whether `moving` hits `stationary` during the next `dt`.
///
/// Returns the axis perpendicular to the touching sides (the direction of
/// the reaction force), [`Axis::Both`] if the bodies already overlap, or
/// `None` if they stay apart.
#[must_use]
pub fn check_aabb_collision<M>(moving: &M, stationary: &FloatRect, dt: Duration) -> Option<Axis>
where
    M: MovingBody + ?Sized,
{
    let offset = moving.velocity() * dt.as_secs_f32();
    let bounds = moving.bounds();
    let horizontal = collides_horizontally(&bounds, offset.x, stationary);
    let vertical = collides_vertically(&bounds, offset.y, stationary);
    match (horizontal, vertical) {
        (true, true) => Some(Axis::Both),
        (true, false) => Some(Axis::X),
        (false, true) => Some(Axis::Y),
        (false, false) => None,
    }
}

/// Moves `moving` the shortest distance that makes its bounds just touch
/// `stationary`.
///
/// Overlapping bodies are pushed out; separated bodies are pulled in. Ties
/// prefer up, then right, then down, then left.
pub fn shift_to_edge<M>(moving: &mut M, stationary: &FloatRect)
where
    M: MovingBody + ?Sized,
{
    let m = moving.bounds();
    let shifts = [
        (m.bottom() - stationary.top, Direction::North),
        (stationary.right() - m.left, Direction::East),
        (stationary.bottom() - m.top, Direction::South),
        (m.right() - stationary.left, Direction::West),
    ];
    let Some((distance, direction)) = shifts.into_iter().min_by(|a, b| a.0.total_cmp(&b.0)) else {
        return;
    };
    trace!(?direction, distance, "shifting body to barrier edge");
    moving.move_by(direction.offset() * distance);
}

/// Stops `moving` at `barrier`: the colliding velocity component is zeroed,
/// or the body is pushed out when it already overlaps.
///
/// Returns the collision axis reported by [`check_aabb_collision`].
pub fn stop_at_barrier<M>(moving: &mut M, barrier: &FloatRect, dt: Duration) -> Option<Axis>
where
    M: MovingBody + ?Sized,
{
    let axis = check_aabb_collision(moving, barrier, dt);
    let v = moving.velocity();
    match axis {
        Some(Axis::X) => moving.set_velocity(Vec2::new(0.0, v.y)),
        Some(Axis::Y) => moving.set_velocity(Vec2::new(v.x, 0.0)),
        Some(Axis::Both) => shift_to_edge(moving, barrier),
        None => {}
    }
    axis
}

/// Adds `gravity * dt` to the vertical velocity.
pub fn apply_gravity<G>(body: &mut G, dt: Duration)
where
    G: GravityBody + ?Sized,
{
    let v = body.velocity();
    let dv = body.gravity() * dt.as_secs_f32();
    body.set_velocity(Vec2::new(v.x, v.y + dv));
}

/// [`stop_at_barrier`] for bodies under gravity.
///
/// A vertical contact also snaps the body onto the barrier's nearest side,
/// so a falling body lands flush instead of hovering above the surface.
pub fn stop_at_barrier_grounded<G>(body: &mut G, barrier: &FloatRect, dt: Duration) -> Option<Axis>
where
    G: GravityBody + ?Sized,
{
    let axis = check_aabb_collision(body, barrier, dt);
    let v = body.velocity();
    match axis {
        Some(Axis::X) => body.set_velocity(Vec2::new(0.0, v.y)),
        Some(Axis::Y) => {
            body.set_velocity(Vec2::new(v.x, 0.0));
            shift_to_edge(body, barrier);
        }
        Some(Axis::Both) => shift_to_edge(body, barrier),
        None => {}
    }
    axis
}

/// Returns `true` if `body` rests on top of `ground`.
///
/// Tests a 1 ms downward nudge at unit speed; the velocity is restored
/// afterwards.
pub fn is_on_ground<G>(body: &mut G, ground: &FloatRect) -> bool
where
    G: GravityBody + ?Sized,
{
    let velocity = body.velocity();
    body.set_velocity(Vec2::new(velocity.x, 1.0));
    let axis = check_aabb_collision(body, ground, Duration::from_millis(1));
    body.set_velocity(velocity);
    axis == Some(Axis::Y) && body.bounds().bottom() <= ground.top
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(left: f32, top: f32, velocity: Vec2) -> MovingShape {
        let mut shape = Shape::rectangle(Vec2::new(10.0, 10.0));
        shape.set_position(Vec2::new(left, top));
        MovingShape::new(shape, velocity)
    }

    const FLOOR: FloatRect = FloatRect::new(0.0, 100.0, 200.0, 20.0);
    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn falling_body_hits_floor_vertically() {
        let b = body(50.0, 85.0, Vec2::new(0.0, 10.0));
        assert_eq!(check_aabb_collision(&b, &FLOOR, SECOND), Some(Axis::Y));
    }

    #[test]
    fn slow_body_stays_clear() {
        let b = body(50.0, 85.0, Vec2::new(0.0, 2.0));
        assert_eq!(check_aabb_collision(&b, &FLOOR, SECOND), None);
    }

    #[test]
    fn overlapping_body_reports_both() {
        let b = body(50.0, 95.0, Vec2::ZERO);
        assert_eq!(check_aabb_collision(&b, &FLOOR, SECOND), Some(Axis::Both));
    }

    #[test]
    fn wall_stops_horizontal_motion() {
        let wall = FloatRect::new(100.0, 0.0, 10.0, 200.0);
        let mut b = body(85.0, 50.0, Vec2::new(10.0, 3.0));
        assert_eq!(stop_at_barrier(&mut b, &wall, SECOND), Some(Axis::X));
        assert_eq!(b.velocity, Vec2::new(0.0, 3.0));
    }

    #[test]
    fn landing_zeroes_vertical_velocity() {
        let mut b = body(50.0, 85.0, Vec2::new(4.0, 10.0));
        assert_eq!(stop_at_barrier(&mut b, &FLOOR, SECOND), Some(Axis::Y));
        assert_eq!(b.velocity, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn sunk_body_is_pushed_back_up() {
        let mut b = body(50.0, 95.0, Vec2::ZERO);
        assert_eq!(stop_at_barrier(&mut b, &FLOOR, SECOND), Some(Axis::Both));
        assert_eq!(b.bounds(), FloatRect::new(50.0, 90.0, 10.0, 10.0));
    }

    #[test]
    fn separated_body_is_pulled_to_nearest_side() {
        let mut b = body(-30.0, 105.0, Vec2::ZERO);
        shift_to_edge(&mut b, &FLOOR);
        assert_eq!(b.bounds(), FloatRect::new(-10.0, 105.0, 10.0, 10.0));
    }

    fn falling(left: f32, top: f32, velocity: Vec2) -> GravityShape {
        body(left, top, velocity).with_gravity(9.81)
    }

    #[test]
    fn grounded_stop_lands_flush_on_the_floor() {
        let mut b = falling(50.0, 85.0, Vec2::new(3.0, 10.0));
        assert_eq!(stop_at_barrier_grounded(&mut b, &FLOOR, SECOND), Some(Axis::Y));
        assert_eq!(b.velocity(), Vec2::new(3.0, 0.0));
        assert_eq!(b.bounds(), FloatRect::new(50.0, 90.0, 10.0, 10.0));
        assert!(is_on_ground(&mut b, &FLOOR));
    }

    #[test]
    fn grounded_stop_leaves_wall_contact_unshifted() {
        let wall = FloatRect::new(100.0, 0.0, 10.0, 200.0);
        let mut b = falling(85.0, 50.0, Vec2::new(10.0, 3.0));
        assert_eq!(stop_at_barrier_grounded(&mut b, &wall, SECOND), Some(Axis::X));
        assert_eq!(b.velocity(), Vec2::new(0.0, 3.0));
        assert_eq!(b.bounds().position(), Vec2::new(85.0, 50.0));
    }

    #[test]
    fn ground_check_restores_velocity() {
        let mut b = falling(50.0, 90.0, Vec2::new(-2.0, -7.0));
        assert!(is_on_ground(&mut b, &FLOOR));
        assert_eq!(b.velocity(), Vec2::new(-2.0, -7.0));
    }

    #[test]
    fn hovering_or_hanging_bodies_are_not_grounded() {
        let mut above = falling(50.0, 80.0, Vec2::ZERO);
        assert!(!is_on_ground(&mut above, &FLOOR));
        // Touching the underside of a ledge is not standing on it.
        let mut below = falling(50.0, 120.0, Vec2::ZERO);
        assert!(!is_on_ground(&mut below, &FLOOR));
    }

    #[test]
    fn gravity_accelerates_downward() {
        let mut b = body(0.0, 0.0, Vec2::new(1.0, 0.0)).with_gravity(10.0);
        b.step(Duration::from_millis(500));
        assert_eq!(b.velocity(), Vec2::new(1.0, 5.0));
        assert_eq!(b.bounds().position(), Vec2::new(0.5, 2.5));
    }

    #[test]
    fn step_applies_velocity() {
        let mut b = body(0.0, 0.0, Vec2::new(4.0, -2.0));
        b.step(Duration::from_millis(500));
        assert_eq!(b.bounds().position(), Vec2::new(2.0, -1.0));
    }
}
