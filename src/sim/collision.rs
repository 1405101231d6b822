//! Circle-circle collision detection and push-apart response
//!
//! Every entity in the arena is a collision circle. Detection is symmetric;
//! response is not: the mover yields and the anchor stays put.

use glam::DVec2;

use crate::consts::PUSH_MARGIN;

/// Anything with a collision circle
pub trait Collidable {
    /// Center of the collision circle
    fn position(&self) -> DVec2;
    /// Radius of the collision circle
    fn radius(&self) -> f64;

    /// Detached copy of the collision circle
    fn circle(&self) -> Circle {
        Circle::new(self.position(), self.radius())
    }
}

/// A bare collision circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub pos: DVec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(pos: DVec2, radius: f64) -> Self {
        Self { pos, radius }
    }
}

impl Collidable for Circle {
    fn position(&self) -> DVec2 {
        self.pos
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

/// Result of a collision check
#[derive(Debug, Clone, Copy)]
pub struct CollisionResult {
    /// Whether the circles overlap (including the buffer)
    pub collided: bool,
    /// Sum of both radii
    pub sum_of_radii: f64,
    /// Distance between centers
    pub distance: f64,
    /// Offset from b's center to a's center
    pub delta: DVec2,
}

impl CollisionResult {
    /// Unit vector from b toward a, zero when the centers coincide
    pub fn unit(&self) -> DVec2 {
        if self.distance > 0.0 {
            self.delta / self.distance
        } else {
            DVec2::ZERO
        }
    }
}

/// Check whether two circles overlap
///
/// `buffer` widens the test, so circles closer than `sum_of_radii + buffer`
/// count as colliding (used for obstacle spacing).
pub fn check_collision<A, B>(a: &A, b: &B, buffer: f64) -> CollisionResult
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    let delta = a.position() - b.position();
    let distance = delta.length();
    let sum_of_radii = a.radius() + b.radius();

    CollisionResult {
        collided: distance < sum_of_radii + buffer,
        sum_of_radii,
        distance,
        delta,
    }
}

/// Place `mover` just outside `anchor`'s boundary along the line joining the centers
///
/// Returns the mover's new center. Coincident centers have no direction to push
/// along, so the mover keeps its position.
pub fn resolve_push<M, A>(mover: &M, anchor: &A) -> DVec2
where
    M: Collidable + ?Sized,
    A: Collidable + ?Sized,
{
    let result = check_collision(mover, anchor, 0.0);
    if result.distance == 0.0 {
        return mover.position();
    }
    anchor.position() + (result.sum_of_radii + PUSH_MARGIN) * result.unit()
}

/// Whether a circle overlaps any circle in `others`
pub fn overlaps_any<'a, M, I, O>(mover: &M, others: I) -> bool
where
    M: Collidable + ?Sized,
    I: IntoIterator<Item = &'a O>,
    O: Collidable + 'a,
{
    others
        .into_iter()
        .any(|other| check_collision(mover, other, 0.0).collided)
}
