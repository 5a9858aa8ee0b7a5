//! Direct O(N²) Newtonian gravity
//!
//! Unsoftened: two bodies at the same position give a non-finite result.
//! Collision resolution merges overlapping bodies long before that happens.

use crate::body::Body;
use crate::vector::Vector2D;

/// Acceleration of `target` caused by every other body of `bodies`
///
/// Sums `G · m · r / |r|³` with `r` pointing from `target` to the other body.
/// A body never attracts itself; identity is the body name.
pub fn acceleration_on<'a, I>(target: &Body, bodies: I, gravitational_constant: f64) -> Vector2D
where
    I: IntoIterator<Item = &'a Body>,
{
    let sum: Vector2D = bodies
        .into_iter()
        .filter(|other| *other != target)
        .map(|other| {
            let r = other.position() - target.position();
            let distance = r.magnitude();
            &r * (other.mass() / (distance * distance * distance))
        })
        .sum();

    &sum * gravitational_constant
}

/// Gravitational potential energy of a set of bodies, `-Σ G·mᵢ·mⱼ / rᵢⱼ` over pairs
pub fn potential_energy(bodies: &[&Body], gravitational_constant: f64) -> f64 {
    let n = bodies.len();

    (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .map(|(i, j)| {
            let (a, b) = (bodies[i], bodies[j]);
            let distance = (b.position() - a.position()).magnitude();
            -gravitational_constant * a.mass() * b.mass() / distance
        })
        .sum()
}
