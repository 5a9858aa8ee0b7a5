use approx::assert_relative_eq;

use crate::body::Body;
use crate::gravity::{acceleration_on, potential_energy};
use crate::vector::Vector2D;

fn body(name: &str, x: f64, y: f64, mass: f64) -> Body {
    Body::planet(name, Vector2D::new(x, y), Vector2D::zeros(), mass).unwrap()
}

#[test]
fn test_inverse_square_law() {
    let target = body("target", 0.0, 0.0, 1.0);
    let near = [body("near", 1.0, 0.0, 1.0)];
    let far = [body("far", 2.0, 0.0, 1.0)];

    let a_near = acceleration_on(&target, &near, 1.0);
    let a_far = acceleration_on(&target, &far, 1.0);

    assert_relative_eq!(a_near.magnitude() / a_far.magnitude(), 4.0, epsilon = 1e-12);
}

#[test]
fn test_target_is_skipped_by_name() {
    let target = body("me", 0.0, 0.0, 1.0);
    let bodies = [body("me", 0.0, 0.0, 1.0), body("other", 0.0, 3.0, 9.0)];

    // A same-position namesake would otherwise divide by zero
    let a = acceleration_on(&target, &bodies, 1.0);
    assert_relative_eq!(a.x(), 0.0);
    assert_relative_eq!(a.y(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_contributions_add_up() {
    let target = body("target", 0.0, 0.0, 1.0);
    let bodies = [body("left", -1.0, 0.0, 2.0), body("right", 1.0, 0.0, 2.0)];

    // Symmetric pull cancels out
    let a = acceleration_on(&target, &bodies, 10.0);
    assert_relative_eq!(a.x(), 0.0, epsilon = 1e-12);
    assert_relative_eq!(a.y(), 0.0, epsilon = 1e-12);
}

#[test]
fn test_acceleration_scales_with_constant() {
    let target = body("target", 0.0, 0.0, 1.0);
    let bodies = [body("other", 0.0, -2.0, 4.0)];

    let a = acceleration_on(&target, &bodies, 3.0);
    // 3 * 4 / 2²
    assert_relative_eq!(a.y(), -3.0, epsilon = 1e-12);
}

#[test]
fn test_pairwise_potential_energy() {
    let a = body("a", 0.0, 0.0, 2.0);
    let b = body("b", 4.0, 0.0, 3.0);
    let c = body("c", 0.0, 3.0, 1.0);

    // -(2·3/4 + 2·1/3 + 3·1/5)
    let expected = -(1.5 + 2.0 / 3.0 + 0.6);
    assert_relative_eq!(potential_energy(&[&a, &b, &c], 1.0), expected, epsilon = 1e-12);
    assert_relative_eq!(potential_energy(&[&a, &b, &c], 2.0), 2.0 * expected, epsilon = 1e-12);
    assert_eq!(potential_energy(&[&a], 1.0), 0.0);
}
