use crate::body::{Body, BodySnapshot};
use crate::collisions::{self, Cluster, Resolutions};
use crate::error::{Result, SimulationError};
use crate::geometry::Rect;
use crate::gravity;
use crate::vector::Vector2D;
use ahash::RandomState;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_WORLD_ID: AtomicU64 = AtomicU64::new(0);

/// Handle a body keeps to the world it was attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorldId(u64);

impl WorldId {
    fn next() -> Self {
        WorldId(NEXT_WORLD_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The live bodies and the gravitational constant governing them
///
/// Bodies are keyed by name, so no two live bodies can share one. The set
/// only changes through [`World::insert`] and collision resolution.
#[derive(Debug)]
pub struct World {
    id: WorldId,
    gravitational_constant: f64,
    bodies: IndexMap<String, Body, RandomState>,
}

impl World {
    /// Creates an empty world
    pub fn new(gravitational_constant: f64) -> Self {
        Self {
            id: WorldId::next(),
            gravitational_constant,
            bodies: IndexMap::default(),
        }
    }

    /// Creates a world and attaches every body of `bodies` to it
    ///
    /// # Examples
    ///
    /// ```
    /// use galaxy::body::Body;
    /// use galaxy::vector::Vector2D;
    /// use galaxy::world::World;
    ///
    /// let world = World::with_bodies(
    ///     6.674e-11,
    ///     [
    ///         Body::planet("Earth", Vector2D::zeros(), Vector2D::zeros(), 5.972e24).unwrap(),
    ///         Body::planet("Moon", Vector2D::new(3.844e8, 0.0), Vector2D::zeros(), 7.342e22).unwrap(),
    ///     ],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(world.body_count(), 2);
    /// ```
    pub fn with_bodies<I>(gravitational_constant: f64, bodies: I) -> Result<Self>
    where
        I: IntoIterator<Item = Body>,
    {
        let mut world = Self::new(gravitational_constant);
        for body in bodies {
            world.insert(body)?;
        }
        Ok(world)
    }

    pub fn id(&self) -> WorldId {
        self.id
    }

    pub fn gravitational_constant(&self) -> f64 {
        self.gravitational_constant
    }

    /// Attaches `body` and adds it to the live set
    ///
    /// # Errors
    ///
    /// [`SimulationError::DuplicateName`] if a live body already has the name,
    /// [`SimulationError::AlreadyAttached`] if the body belongs to another world.
    pub fn insert(&mut self, mut body: Body) -> Result<()> {
        if self.bodies.contains_key(body.name()) {
            return Err(SimulationError::DuplicateName(body.name().to_owned()));
        }
        if body.world() != Some(self.id) {
            body.attach(self.id)?;
        }
        self.bodies.insert(body.name().to_owned(), body);
        Ok(())
    }

    /// Removes a body from the live set, keeping the order of the others
    pub fn remove(&mut self, name: &str) -> Option<Body> {
        self.bodies.shift_remove(name)
    }

    /// Adds a body created by collision resolution, replacing any namesake
    pub(crate) fn adopt(&mut self, body: Body) {
        let body = body.into_attached(self.id);
        self.bodies.insert(body.name().to_owned(), body);
    }

    pub fn body(&self, name: &str) -> Option<&Body> {
        self.bodies.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bodies.contains_key(name)
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.values()
    }

    pub(crate) fn bodies_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.values_mut()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bodies.keys().map(String::as_str)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Acceleration of every body, in iteration order, from one consistent state
    pub fn accelerations(&self) -> Vec<Vector2D> {
        self.bodies
            .values()
            .map(|body| gravity::acceleration_on(body, self.bodies.values(), self.gravitational_constant))
            .collect()
    }

    /// Rectangle enclosing the bounding boxes of every live body
    pub fn bounding_rectangle(&self) -> Option<Rect> {
        Self::bounding_rectangle_of(self.bodies.values())
    }

    pub fn bounding_rectangle_of<'a, I>(bodies: I) -> Option<Rect>
    where
        I: IntoIterator<Item = &'a Body>,
    {
        Rect::union_of(bodies.into_iter().map(Body::bounding_rectangle))
    }

    /// First body whose shape contains `point`
    pub fn hit_test(&self, point: &Vector2D) -> Option<&Body> {
        self.bodies
            .values()
            .find(|body| body.shape().contains(body.position(), point))
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.values().map(Body::mass).sum()
    }

    pub fn total_momentum(&self) -> Vector2D {
        self.bodies.values().map(Body::momentum).sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.values().map(Body::kinetic_energy).sum()
    }

    pub fn potential_energy(&self) -> f64 {
        let bodies: Vec<&Body> = self.bodies.values().collect();
        gravity::potential_energy(&bodies, self.gravitational_constant)
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }

    /// Groups of bodies colliding in the current state
    pub fn detect_collisions(&self) -> Vec<Cluster> {
        collisions::detect_clusters(self)
    }

    /// Merges every cluster into one body and reports what replaced what
    pub fn resolve_collisions(&mut self, clusters: Vec<Cluster>) -> Resolutions {
        collisions::resolve_clusters(self, clusters)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            gravitational_constant: self.gravitational_constant,
            bodies: self.bodies.values().map(Body::snapshot).collect(),
        }
    }
}

/// Serializable copy of a world's state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub gravitational_constant: f64,
    pub bodies: Vec<BodySnapshot>,
}
