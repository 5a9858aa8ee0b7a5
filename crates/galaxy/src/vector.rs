//! Immutable 2D vectors with a memoised magnitude

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::sync::OnceLock;

/// An immutable 2D vector
///
/// Every operation returns a new value. The magnitude is computed on first
/// request and cached for the lifetime of the value.
///
/// # Examples
///
/// ```
/// use galaxy::vector::Vector2D;
///
/// let a = Vector2D::new(3.0, 0.0);
/// let b = Vector2D::new(0.0, 4.0);
///
/// let sum = &a + &b;
/// assert_eq!(sum.magnitude(), 5.0);
/// assert_eq!((&sum * 2.0).x(), 6.0);
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Vector2D {
    coords: Vector2<f64>,
    magnitude: OnceLock<f64>,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self::from(Vector2::new(x, y))
    }

    /// The neutral vector
    pub fn zeros() -> Self {
        Self::from(Vector2::zeros())
    }

    pub fn x(&self) -> f64 {
        self.coords.x
    }

    pub fn y(&self) -> f64 {
        self.coords.y
    }

    /// Euclidean length, computed once and then reused
    pub fn magnitude(&self) -> f64 {
        *self.magnitude.get_or_init(|| self.coords.magnitude())
    }

    pub fn dot(&self, other: &Vector2D) -> f64 {
        self.coords.dot(&other.coords)
    }

    pub fn as_nalgebra(&self) -> &Vector2<f64> {
        &self.coords
    }
}

impl Default for Vector2D {
    fn default() -> Self {
        Self::zeros()
    }
}

impl From<Vector2<f64>> for Vector2D {
    fn from(coords: Vector2<f64>) -> Self {
        Self {
            coords,
            magnitude: OnceLock::new(),
        }
    }
}

impl From<[f64; 2]> for Vector2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Vector2D> for [f64; 2] {
    fn from(v: Vector2D) -> Self {
        [v.coords.x, v.coords.y]
    }
}

impl PartialEq for Vector2D {
    fn eq(&self, other: &Self) -> bool {
        self.coords == other.coords
    }
}

impl fmt::Debug for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector2D({}, {})", self.coords.x, self.coords.y)
    }
}

impl Add<&Vector2D> for &Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: &Vector2D) -> Vector2D {
        Vector2D::from(self.coords + rhs.coords)
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        &self + &rhs
    }
}

impl Sub<&Vector2D> for &Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: &Vector2D) -> Vector2D {
        Vector2D::from(self.coords - rhs.coords)
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        &self - &rhs
    }
}

impl Mul<f64> for &Vector2D {
    type Output = Vector2D;

    fn mul(self, rhs: f64) -> Vector2D {
        Vector2D::from(self.coords * rhs)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, rhs: f64) -> Vector2D {
        &self * rhs
    }
}

impl std::iter::Sum for Vector2D {
    fn sum<I: Iterator<Item = Vector2D>>(iter: I) -> Self {
        iter.fold(Vector2D::zeros(), |acc, v| &acc + &v)
    }
}
