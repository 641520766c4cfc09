//! Integer pixel geometry shared by the grid layout, the walls and the moving agents.
//!
//! `Rect` is a plain `Copy` value and every operation hands back a new rectangle.

use std::ops::{Add, Sub};

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from(x_y_pair: (i32, i32)) -> Point {
        Point::new(x_y_pair.0, x_y_pair.1)
    }
}

/// Movement intent. Not necessarily unit length until `normalized` is called.
#[derive(PartialEq, Copy, Clone, Debug, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub fn new(x: f32, y: f32) -> Vector2 {
        Vector2 { x, y }
    }

    pub fn zero() -> Vector2 {
        Vector2::default()
    }

    #[inline]
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit length copy of the vector, or the zero vector unchanged.
    pub fn normalized(&self) -> Vector2 {
        let length = self.magnitude();
        if length > 0.0 {
            Vector2::new(self.x / length, self.y / length)
        } else {
            *self
        }
    }
}

impl From<Point> for Vector2 {
    fn from(p: Point) -> Vector2 {
        Vector2::new(p.x as f32, p.y as f32)
    }
}

/// Axis aligned rectangle, top left origin with y growing downwards.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect { x, y, w, h }
    }

    /// A `w * h` rectangle whose centre is `centre`.
    pub fn centred_on(centre: Point, w: i32, h: i32) -> Rect {
        Rect::new(0, 0, w, h).with_centre(centre)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn top_left(&self) -> Point {
        Point::new(self.left(), self.top())
    }

    #[inline]
    pub fn top_right(&self) -> Point {
        Point::new(self.right(), self.top())
    }

    #[inline]
    pub fn bottom_left(&self) -> Point {
        Point::new(self.left(), self.bottom())
    }

    #[inline]
    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    #[inline]
    pub fn centre(&self) -> Point {
        Point::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn with_centre(&self, centre: Point) -> Rect {
        Rect::new(centre.x - self.w / 2, centre.y - self.h / 2, self.w, self.h)
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Do the rectangles overlap by at least one pixel? Touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right() && other.left() < self.right() &&
        self.top() < other.bottom() && other.top() < self.bottom()
    }

    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// Shift the rectangle so it lies inside `bounds`. A rectangle larger than the bounds
    /// keeps its top left pinned to the bounds' top left.
    pub fn clamped_within(&self, bounds: &Rect) -> Rect {
        let mut clamped = *self;
        if clamped.right() > bounds.right() {
            clamped.x = bounds.right() - clamped.w;
        }
        if clamped.bottom() > bounds.bottom() {
            clamped.y = bounds.bottom() - clamped.h;
        }
        if clamped.x < bounds.x {
            clamped.x = bounds.x;
        }
        if clamped.y < bounds.y {
            clamped.y = bounds.y;
        }
        clamped
    }
}
