use crate::geometry::{Point, Rect, Vector2};

/// Anything an entity can bump into.
pub trait Obstacles {
    /// May an entity occupying `old` move to occupy `new`?
    fn can_move(&self, old: &Rect, new: &Rect) -> bool;

    /// The area entities are kept inside.
    fn bounds(&self) -> Rect;
}

/// Move `rect` by `dx` then by `dy`, each axis on its own.
///
/// A blocked axis keeps its old position and reports a collision, the other axis still
/// moves, so an entity pressing diagonally into a wall slides along it. An axis with no
/// displacement is not tested. The result is clamped inside the obstacles' bounds.
pub fn resolve_move<O>(obstacles: &O, rect: Rect, dx: i32, dy: i32) -> (Rect, bool)
    where O: Obstacles + ?Sized
{
    let mut resolved = rect;
    let mut collided = false;

    if dx != 0 {
        let proposed = resolved.translated(dx, 0);
        if obstacles.can_move(&resolved, &proposed) {
            resolved = proposed;
        } else {
            collided = true;
        }
    }

    if dy != 0 {
        let proposed = resolved.translated(0, dy);
        if obstacles.can_move(&resolved, &proposed) {
            resolved = proposed;
        } else {
            collided = true;
        }
    }

    (resolved.clamped_within(&obstacles.bounds()), collided)
}

/// Keys held down this tick.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Position, heading and speed of something that walks the maze.
#[derive(Debug, Clone, PartialEq)]
pub struct Mover {
    rect: Rect,
    direction: Vector2,
    speed: f32,
    collided: bool,
}

impl Mover {
    pub fn new(rect: Rect, speed: f32) -> Mover {
        Mover {
            rect,
            direction: Vector2::zero(),
            speed,
            collided: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn centre(&self) -> Point {
        self.rect.centre()
    }

    #[inline]
    pub fn direction(&self) -> Vector2 {
        self.direction
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Did the last movement tick hit something?
    #[inline]
    pub fn has_collided(&self) -> bool {
        self.collided
    }

    pub fn place_at(&mut self, centre: Point) {
        self.rect = self.rect.with_centre(centre);
    }

    /// Heading from held arrow keys. Right wins over left and up wins over down.
    pub fn steer(&mut self, keys: HeldKeys) {
        let x = if keys.right {
            1.0
        } else if keys.left {
            -1.0
        } else {
            0.0
        };
        let y = if keys.up {
            -1.0
        } else if keys.down {
            1.0
        } else {
            0.0
        };
        self.direction = Vector2::new(x, y);
    }

    /// Advance one tick along `direction` at this mover's speed.
    ///
    /// Displacements are truncated towards zero to whole pixels. Returns the new rectangle and
    /// whether either axis was blocked.
    pub fn tick_movement<O>(&mut self, obstacles: &O, delta_time: f32, direction: Vector2) -> (Rect, bool)
        where O: Obstacles + ?Sized
    {
        self.direction = direction.normalized();
        let distance = self.speed * delta_time;
        let dx = (self.direction.x * distance) as i32;
        let dy = (self.direction.y * distance) as i32;
        self.apply(obstacles, dx, dy)
    }

    /// Advance one tick towards `target`, never stepping past it on either axis.
    pub fn step_towards<O>(&mut self, obstacles: &O, delta_time: f32, target: Point) -> (Rect, bool)
        where O: Obstacles + ?Sized
    {
        let offset = target - self.centre();
        self.direction = Vector2::from(offset).normalized();
        let distance = self.speed * delta_time;
        let dx = clamp_step((self.direction.x * distance) as i32, offset.x);
        let dy = clamp_step((self.direction.y * distance) as i32, offset.y);
        self.apply(obstacles, dx, dy)
    }

    /// Stop moving this tick.
    pub fn hold(&mut self) {
        self.direction = Vector2::zero();
        self.collided = false;
    }

    fn apply<O>(&mut self, obstacles: &O, dx: i32, dy: i32) -> (Rect, bool)
        where O: Obstacles + ?Sized
    {
        let (rect, collided) = resolve_move(obstacles, self.rect, dx, dy);
        self.rect = rect;
        self.collided = collided;
        (rect, collided)
    }
}

/// Limit a step to the remaining offset. A non-zero offset always moves at least a pixel.
fn clamp_step(step: i32, remaining: i32) -> i32 {
    if remaining == 0 {
        0
    } else if step == 0 {
        remaining.signum()
    } else if step.abs() > remaining.abs() {
        remaining
    } else {
        step
    }
}
