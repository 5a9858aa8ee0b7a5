//! Axis-aligned rectangles and the shape tests used for collision geometry

use crate::vector::Vector2D;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle described by its minimum corner and extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `side` centred on `center`
    pub fn centered_square(center: &Vector2D, side: f64) -> Self {
        Self::new(
            center.x() - 0.5 * side,
            center.y() - 0.5 * side,
            side,
            side,
        )
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Vector2D {
        Vector2D::new(self.x + 0.5 * self.width, self.y + 0.5 * self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains(&self, point: &Vector2D) -> bool {
        point.x() >= self.x
            && point.y() >= self.y
            && point.x() < self.max_x()
            && point.y() < self.max_y()
    }

    /// Smallest rectangle enclosing every rectangle of `rects`
    ///
    /// Returns `None` for an empty iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use galaxy::geometry::Rect;
    ///
    /// let union = Rect::union_of([
    ///     Rect::new(0.0, 0.0, 1.0, 1.0),
    ///     Rect::new(2.0, -1.0, 1.0, 1.0),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(union, Rect::new(0.0, -1.0, 3.0, 2.0));
    /// ```
    pub fn union_of<I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = Rect>,
    {
        rects
            .into_iter()
            .map(|r| (r.x, r.y, r.max_x(), r.max_y()))
            .reduce(|(min_x, min_y, max_x, max_y), (x0, y0, x1, y1)| {
                (min_x.min(x0), min_y.min(y0), max_x.max(x1), max_y.max(y1))
            })
            .map(|(min_x, min_y, max_x, max_y)| {
                Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
            })
    }
}

/// Whether the ellipse inscribed in `ellipse_bounds` intersects `rect`
///
/// Works in coordinates normalised to the ellipse's bounding box: the point of
/// the rectangle nearest to the ellipse centre must lie strictly inside the
/// unit-diameter circle. Degenerate shapes never intersect.
pub fn ellipse_intersects_rect(ellipse_bounds: &Rect, rect: &Rect) -> bool {
    if ellipse_bounds.is_empty() || rect.is_empty() {
        return false;
    }

    let near = |rect_min: f64, rect_extent: f64, ell_min: f64, ell_extent: f64| {
        let lo = (rect_min - ell_min) / ell_extent - 0.5;
        let hi = lo + rect_extent / ell_extent;
        if lo > 0.0 {
            lo
        } else if hi < 0.0 {
            hi
        } else {
            0.0
        }
    };

    let near_x = near(rect.x, rect.width, ellipse_bounds.x, ellipse_bounds.width);
    let near_y = near(rect.y, rect.height, ellipse_bounds.y, ellipse_bounds.height);

    near_x * near_x + near_y * near_y < 0.25
}
