use std::f64::consts::FRAC_1_SQRT_2;

use approx::assert_relative_eq;

use crate::body::Body;
use crate::integrator::{Integrator, Leapfrog, SubstepSchedule};
use crate::vector::Vector2D;
use crate::world::World;

/// Two small planets on a circular orbit of radius 0.5 around their centre of mass
///
/// With G = 1000 and m = 1e-3 each body needs v² = G·m / (4·r) = 0.5.
fn binary() -> World {
    World::with_bodies(
        1000.0,
        [
            Body::planet(
                "left",
                Vector2D::new(-0.5, 0.0),
                Vector2D::new(0.0, -FRAC_1_SQRT_2),
                1e-3,
            )
            .unwrap(),
            Body::planet(
                "right",
                Vector2D::new(0.5, 0.0),
                Vector2D::new(0.0, FRAC_1_SQRT_2),
                1e-3,
            )
            .unwrap(),
        ],
    )
    .unwrap()
}

#[test]
fn test_schedule_tiers() {
    let small = SubstepSchedule::for_population(10, 1000.0);
    assert_eq!(small.dt_min, 1.0);
    assert_eq!(small.trajectory_limit, 100);

    let medium = SubstepSchedule::for_population(11, 1000.0);
    assert_eq!(medium.dt_min, 10.0);
    assert_eq!(medium.trajectory_limit, 10);

    let large = SubstepSchedule::for_population(101, 1000.0);
    assert_eq!(large.dt_min, 100.0);
    assert_eq!(large.trajectory_limit, 5);

    assert_eq!(SubstepSchedule::for_population(0, 1000.0), small);
    assert_eq!(SubstepSchedule::for_population(100, 1000.0), medium);
}

#[test]
fn test_advance_covers_time_in_bounded_substeps() {
    let mut world = binary();

    assert_eq!(Leapfrog.advance(&mut world, 0.25, 0.1), 3);
    assert_eq!(Leapfrog.advance(&mut world, 0.0, 0.1), 0);
    assert_eq!(Leapfrog.advance(&mut world, 1.0, 0.0), 0);
    assert_eq!(Leapfrog.advance(&mut world, f64::INFINITY, 0.1), 0);
}

#[test]
fn test_free_body_moves_in_a_straight_line() {
    let mut world = World::with_bodies(
        1.0,
        [Body::comet("drifter", Vector2D::new(1.0, 1.0), Vector2D::new(2.0, -1.0), 1.0).unwrap()],
    )
    .unwrap();

    Leapfrog.advance(&mut world, 3.0, 0.5);

    let body = world.body("drifter").unwrap();
    assert_relative_eq!(body.position().x(), 7.0, epsilon = 1e-12);
    assert_relative_eq!(body.position().y(), -2.0, epsilon = 1e-12);
    assert_eq!(body.velocity(), &Vector2D::new(2.0, -1.0));
}

#[test]
fn test_both_kicks_use_the_opening_acceleration() {
    let mut world = World::with_bodies(
        1.0,
        [
            Body::planet("a", Vector2D::new(-10.0, 0.0), Vector2D::zeros(), 1.0).unwrap(),
            Body::planet("b", Vector2D::new(10.0, 0.0), Vector2D::zeros(), 1.0).unwrap(),
        ],
    )
    .unwrap();

    Leapfrog.step(&mut world, 1.0);

    // a = 1 / 20² for the whole sub-step
    let a = world.body("a").unwrap();
    assert_relative_eq!(a.position().x(), -9.99875, epsilon = 1e-12);
    assert_relative_eq!(a.velocity().x(), 0.0025, epsilon = 1e-15);

    let b = world.body("b").unwrap();
    assert_relative_eq!(b.position().x(), 9.99875, epsilon = 1e-12);
    assert_relative_eq!(b.velocity().x(), -0.0025, epsilon = 1e-15);
}

#[test]
fn test_momentum_is_conserved() {
    let mut world = binary();
    let before = world.total_momentum();

    Leapfrog.advance(&mut world, 5.0, 1e-3);

    let after = world.total_momentum();
    assert_relative_eq!(after.x(), before.x(), epsilon = 1e-12);
    assert_relative_eq!(after.y(), before.y(), epsilon = 1e-12);
}

fn orbit_energy_drift(dt_min: f64) -> f64 {
    let mut world = binary();
    let initial_energy = world.total_energy();

    // Period 2π·r / v ≈ 4.44
    Leapfrog.advance(&mut world, 4.5, dt_min);

    (world.total_energy() - initial_energy) / initial_energy
}

#[test]
fn test_circular_orbit_is_kept() {
    let mut world = binary();

    Leapfrog.advance(&mut world, 4.5, 1e-3);

    let left = world.body("left").unwrap().position().clone();
    let right = world.body("right").unwrap().position().clone();
    let separation = (&right - &left).magnitude();
    assert_relative_eq!(separation, 1.0, max_relative = 2e-2);

    let drift = orbit_energy_drift(1e-3);
    assert!(drift.abs() < 2e-2, "relative energy drift {drift}");
}

#[test]
fn test_energy_drift_shrinks_with_substep() {
    let coarse = orbit_energy_drift(1e-3).abs();
    let fine = orbit_energy_drift(5e-4).abs();

    assert!(fine < 0.6 * coarse, "coarse {coarse}, fine {fine}");
}
