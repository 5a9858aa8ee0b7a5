use crate::error::{Result, SimulationError};
use crate::geometry::{Rect, ellipse_intersects_rect};
use crate::gravity;
use crate::history::History;
use crate::vector::Vector2D;
use crate::world::{World, WorldId};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::hash::{Hash, Hasher};

/// Smallest comet side length, keeps tiny comets from degenerating to a point
pub const MIN_COMET_SIDE: f64 = 1e-9;

/// Trajectory of a body: its sampled centre positions
pub type Trajectory = History<Body, Vector2D>;

/// Sampled velocities of a body
pub type VelocityHistory = History<Body, Vector2D>;

/// The closed set of body variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    Planet,
    Comet,
}

/// Collision geometry derived from a body's variant and mass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Disc of the radius of a unit-density sphere of the same mass
    Planet { radius: f64 },
    /// Axis-aligned square with side cbrt(mass)
    Comet { side_length: f64 },
}

impl Shape {
    pub fn new(kind: BodyKind, mass: f64) -> Self {
        match kind {
            BodyKind::Planet => Shape::Planet {
                radius: (0.75 * mass / PI).cbrt(),
            },
            BodyKind::Comet => {
                let side = mass.cbrt();
                Shape::Comet {
                    side_length: if side > 0.0 { side } else { MIN_COMET_SIDE },
                }
            }
        }
    }

    pub fn kind(&self) -> BodyKind {
        match self {
            Shape::Planet { .. } => BodyKind::Planet,
            Shape::Comet { .. } => BodyKind::Comet,
        }
    }

    pub fn bounding_rectangle(&self, center: &Vector2D) -> Rect {
        match *self {
            Shape::Planet { radius } => Rect::centered_square(center, 2.0 * radius),
            Shape::Comet { side_length } => Rect::centered_square(center, side_length),
        }
    }

    /// Whether `point` lies within the shape placed at `center`
    pub fn contains(&self, center: &Vector2D, point: &Vector2D) -> bool {
        match *self {
            Shape::Planet { radius } => (point - center).magnitude() <= radius,
            Shape::Comet { .. } => self.bounding_rectangle(center).contains(point),
        }
    }
}

/// A planet or comet moving under the gravity of its world
///
/// The name is the identity of a body: two bodies with the same name compare
/// equal whatever their state. Each body owns one trajectory and one velocity
/// history, both sampling this body.
#[derive(Debug)]
pub struct Body {
    name: String,
    mass: f64,
    shape: Shape,
    position: Vector2D,
    velocity: Vector2D,
    world: Option<WorldId>,
    trajectory: Trajectory,
    velocity_history: VelocityHistory,
}

impl Body {
    /// Creates a detached body
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidMass`] unless `mass` is positive and finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use galaxy::body::{Body, BodyKind};
    /// use galaxy::vector::Vector2D;
    ///
    /// let earth = Body::new(
    ///     "Earth",
    ///     BodyKind::Planet,
    ///     Vector2D::new(1.496e11, 0.0),
    ///     Vector2D::new(0.0, 29_780.0),
    ///     5.972e24,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(earth.kind(), BodyKind::Planet);
    /// assert!(!earth.is_attached());
    /// ```
    pub fn new(
        name: impl Into<String>,
        kind: BodyKind,
        position: Vector2D,
        velocity: Vector2D,
        mass: f64,
    ) -> Result<Self> {
        let name = name.into();
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimulationError::InvalidMass { name, mass });
        }
        Ok(Self::from_parts(name, kind, position, velocity, mass))
    }

    pub fn planet(
        name: impl Into<String>,
        position: Vector2D,
        velocity: Vector2D,
        mass: f64,
    ) -> Result<Self> {
        Self::new(name, BodyKind::Planet, position, velocity, mass)
    }

    pub fn comet(
        name: impl Into<String>,
        position: Vector2D,
        velocity: Vector2D,
        mass: f64,
    ) -> Result<Self> {
        Self::new(name, BodyKind::Comet, position, velocity, mass)
    }

    /// Unchecked constructor for values already known to be valid (merged masses)
    pub(crate) fn from_parts(
        name: String,
        kind: BodyKind,
        position: Vector2D,
        velocity: Vector2D,
        mass: f64,
    ) -> Self {
        Self {
            name,
            mass,
            shape: Shape::new(kind, mass),
            position,
            velocity,
            world: None,
            trajectory: History::new(|body: &Body| body.position.clone()),
            velocity_history: History::new(|body: &Body| body.velocity.clone()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn kind(&self) -> BodyKind {
        self.shape.kind()
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Radius of a planet, `None` for comets
    pub fn radius(&self) -> Option<f64> {
        match self.shape {
            Shape::Planet { radius } => Some(radius),
            Shape::Comet { .. } => None,
        }
    }

    /// Side length of a comet, `None` for planets
    pub fn side_length(&self) -> Option<f64> {
        match self.shape {
            Shape::Comet { side_length } => Some(side_length),
            Shape::Planet { .. } => None,
        }
    }

    pub fn position(&self) -> &Vector2D {
        &self.position
    }

    pub fn velocity(&self) -> &Vector2D {
        &self.velocity
    }

    pub fn momentum(&self) -> Vector2D {
        &self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        let speed = self.velocity.magnitude();
        0.5 * self.mass * speed * speed
    }

    pub fn bounding_rectangle(&self) -> Rect {
        self.shape.bounding_rectangle(&self.position)
    }

    pub fn world(&self) -> Option<WorldId> {
        self.world
    }

    pub fn is_attached(&self) -> bool {
        self.world.is_some()
    }

    /// Binds the body to a world; a body can be bound only once
    pub(crate) fn attach(&mut self, world: WorldId) -> Result<()> {
        match self.world {
            None => {
                self.world = Some(world);
                Ok(())
            }
            Some(_) => Err(SimulationError::AlreadyAttached {
                name: self.name.clone(),
            }),
        }
    }

    /// Binds a body built by collision resolution, which no world has seen yet
    pub(crate) fn into_attached(mut self, world: WorldId) -> Self {
        debug_assert!(self.world.is_none(), "merged body `{}` already attached", self.name);
        self.world = Some(world);
        self
    }

    /// Gravitational acceleration exerted on this body by every other body of `world`
    ///
    /// # Errors
    ///
    /// [`SimulationError::NotAttached`] if the body was never attached to
    /// `world`.
    pub fn acceleration(&self, world: &World) -> Result<Vector2D> {
        if self.world != Some(world.id()) {
            return Err(SimulationError::NotAttached {
                name: self.name.clone(),
            });
        }
        Ok(gravity::acceleration_on(
            self,
            world.bodies(),
            world.gravitational_constant(),
        ))
    }

    /// Whether this body hits `other`
    ///
    /// Only a planet detects collisions: planet against planet compares
    /// centre distance with the sum of radii, planet against comet intersects
    /// the planet's disc with the comet's square. A comet never reports a
    /// collision, whatever it is tested against.
    pub fn collides_with(&self, other: &Body) -> bool {
        match (self.shape, other.shape) {
            (Shape::Planet { radius }, Shape::Planet { radius: other_radius }) => {
                (&other.position - &self.position).magnitude() <= radius + other_radius
            }
            (Shape::Planet { .. }, Shape::Comet { .. }) => {
                ellipse_intersects_rect(&self.bounding_rectangle(), &other.bounding_rectangle())
            }
            (Shape::Comet { .. }, _) => false,
        }
    }

    pub(crate) fn change_velocity_by(&mut self, change: &Vector2D) {
        self.velocity = &self.velocity + change;
    }

    pub(crate) fn change_position_by(&mut self, change: &Vector2D) {
        self.position = &self.position + change;
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn velocity_history(&self) -> &VelocityHistory {
        &self.velocity_history
    }

    /// Appends the current position to the trajectory
    pub fn record_trajectory(&self) {
        self.trajectory.add_current_value(self);
    }

    /// Appends the current velocity to the velocity history
    pub fn record_velocity(&self) {
        self.velocity_history.add_current_value(self);
    }

    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            name: self.name.clone(),
            kind: self.kind(),
            mass: self.mass,
            position: self.position.clone(),
            velocity: self.velocity.clone(),
        }
    }
}

impl PartialEq for Body {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Body {}

impl Hash for Body {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Plain copy of a body's physical state, detached from any world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub name: String,
    pub kind: BodyKind,
    pub mass: f64,
    pub position: Vector2D,
    pub velocity: Vector2D,
}

impl BodySnapshot {
    pub fn shape(&self) -> Shape {
        Shape::new(self.kind, self.mass)
    }

    pub fn momentum(&self) -> Vector2D {
        &self.velocity * self.mass
    }

    pub fn bounding_rectangle(&self) -> Rect {
        self.shape().bounding_rectangle(&self.position)
    }
}
