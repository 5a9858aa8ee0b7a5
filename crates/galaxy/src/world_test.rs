use approx::assert_relative_eq;

use crate::body::{Body, BodyKind};
use crate::error::SimulationError;
use crate::vector::Vector2D;
use crate::world::{World, WorldSnapshot};

fn planet(name: &str, x: f64, y: f64, vx: f64, vy: f64, mass: f64) -> Body {
    Body::planet(name, Vector2D::new(x, y), Vector2D::new(vx, vy), mass).unwrap()
}

fn three_bodies() -> World {
    World::with_bodies(
        1.0,
        [
            planet("a", 0.0, 0.0, 1.0, 0.0, 1.0),
            planet("b", 10.0, 0.0, 0.0, 2.0, 2.0),
            planet("c", 0.0, 10.0, -1.0, -1.0, 3.0),
        ],
    )
    .unwrap()
}

#[test]
fn test_insert_attaches_bodies() {
    let world = three_bodies();

    assert_eq!(world.body_count(), 3);
    assert!(!world.is_empty());
    assert_eq!(world.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    for body in world.bodies() {
        assert_eq!(body.world(), Some(world.id()));
    }
}

#[test]
fn test_worlds_have_distinct_ids() {
    assert_ne!(World::new(1.0).id(), World::new(1.0).id());
}

#[test]
fn test_duplicate_names_are_rejected() {
    let mut world = three_bodies();

    let err = world.insert(planet("b", 50.0, 50.0, 0.0, 0.0, 1.0)).unwrap_err();
    assert_eq!(err, SimulationError::DuplicateName("b".to_owned()));

    // The live body is untouched
    assert_eq!(world.body("b").unwrap().mass(), 2.0);
}

#[test]
fn test_remove_keeps_order() {
    let mut world = three_bodies();

    let removed = world.remove("b").unwrap();
    assert_eq!(removed.name(), "b");
    assert!(!world.contains("b"));
    assert_eq!(world.names().collect::<Vec<_>>(), vec!["a", "c"]);
    assert!(world.remove("b").is_none());
}

#[test]
fn test_removed_body_can_return_home() {
    let mut world = three_bodies();

    let body = world.remove("a").unwrap();
    world.insert(body).unwrap();

    assert!(world.contains("a"));
    assert!(world.body("a").unwrap().acceleration(&world).is_ok());
}

#[test]
fn test_totals() {
    let world = three_bodies();

    assert_relative_eq!(world.total_mass(), 6.0);

    let momentum = world.total_momentum();
    assert_relative_eq!(momentum.x(), 1.0 - 3.0);
    assert_relative_eq!(momentum.y(), 4.0 - 3.0);

    // ½·1·1 + ½·2·4 + ½·3·2
    assert_relative_eq!(world.kinetic_energy(), 0.5 + 4.0 + 3.0, epsilon = 1e-12);

    let r_bc = 200.0_f64.sqrt();
    let expected_potential = -(2.0 / 10.0 + 3.0 / 10.0 + 6.0 / r_bc);
    assert_relative_eq!(world.potential_energy(), expected_potential, epsilon = 1e-12);
    assert_relative_eq!(
        world.total_energy(),
        7.5 + expected_potential,
        epsilon = 1e-12
    );
}

#[test]
fn test_accelerations_follow_body_order() {
    let world = three_bodies();
    let accelerations = world.accelerations();

    assert_eq!(accelerations.len(), 3);
    for (body, acceleration) in world.bodies().zip(&accelerations) {
        assert_eq!(&body.acceleration(&world).unwrap(), acceleration);
    }
}

#[test]
fn test_bounding_rectangle_encloses_every_body() {
    let world = three_bodies();
    let rect = world.bounding_rectangle().unwrap();

    for body in world.bodies() {
        let bounds = body.bounding_rectangle();
        assert!(rect.x <= bounds.x && rect.y <= bounds.y);
        assert!(rect.max_x() >= bounds.max_x() && rect.max_y() >= bounds.max_y());
    }
    assert!(World::new(1.0).bounding_rectangle().is_none());
}

#[test]
fn test_hit_test() {
    let world = three_bodies();

    assert_eq!(world.hit_test(&Vector2D::new(10.1, 0.1)).map(Body::name), Some("b"));
    assert!(world.hit_test(&Vector2D::new(5.0, 5.0)).is_none());
}

#[test]
fn test_snapshot_serializes() {
    let world = three_bodies();
    let snapshot = world.snapshot();

    assert_eq!(snapshot.bodies.len(), 3);
    assert_eq!(snapshot.bodies[1].name, "b");
    assert_eq!(snapshot.bodies[1].kind, BodyKind::Planet);

    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: WorldSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, snapshot);
}

#[test]
fn test_collisions_through_world() {
    let mut world = World::with_bodies(
        1.0,
        [
            planet("x", 0.0, 0.0, 1.0, 0.0, 10.0),
            planet("y", 0.5, 0.0, -1.0, 0.0, 10.0),
            planet("far", 100.0, 0.0, 0.0, 0.0, 1.0),
        ],
    )
    .unwrap();

    let clusters = world.detect_collisions();
    assert_eq!(clusters.len(), 1);

    let resolved = world.resolve_collisions(clusters);
    assert_eq!(resolved.len(), 1);
    assert_eq!(world.body_count(), 2);
    assert!(world.contains("far"));
    assert_relative_eq!(world.total_mass(), 21.0);

    let merged = world.body("x").unwrap();
    assert_eq!(merged.world(), Some(world.id()));
    assert!(merged.acceleration(&world).is_ok());
}
