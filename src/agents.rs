//! The two entities of a chase: a player steered by held keys and a pursuer that walks an
//! A* path towards the player.

use crate::cells::GridCoordinate;
use crate::geometry::{Point, Rect, Vector2};
use crate::grid::Maze;
use crate::movement::{HeldKeys, Mover};
use crate::path_tracker::{PathTracker, PathUpdate};

#[derive(Debug, Clone)]
pub struct Player {
    mover: Mover,
}

impl Player {
    /// A `size` x `size` player centred on `centre`.
    pub fn new(centre: Point, size: i32, speed: f32) -> Player {
        Player { mover: Mover::new(Rect::centred_on(centre, size, size), speed) }
    }

    #[inline]
    pub fn mover(&self) -> &Mover {
        &self.mover
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.mover.rect()
    }

    /// The cell under the player's centre.
    pub fn cell(&self, maze: &Maze) -> Option<GridCoordinate> {
        maze.cell_at(self.mover.centre()).map(|cell| cell.coord())
    }

    /// Move one tick in the direction of the held keys. Returns whether a wall was hit.
    pub fn update(&mut self, maze: &Maze, keys: HeldKeys, delta_time: f32) -> bool {
        self.mover.steer(keys);
        let direction = self.mover.direction();
        let (_, collided) = self.mover.tick_movement(maze, delta_time, direction);
        collided
    }
}

#[derive(Debug, Clone)]
pub struct Pursuer {
    mover: Mover,
    tracker: PathTracker,
}

impl Pursuer {
    pub fn new(centre: Point, size: i32, speed: f32, edit_limit: u32) -> Pursuer {
        Pursuer {
            mover: Mover::new(Rect::centred_on(centre, size, size), speed),
            tracker: PathTracker::new(edit_limit),
        }
    }

    #[inline]
    pub fn mover(&self) -> &Mover {
        &self.mover
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.mover.rect()
    }

    #[inline]
    pub fn tracker(&self) -> &PathTracker {
        &self.tracker
    }

    pub fn cell(&self, maze: &Maze) -> Option<GridCoordinate> {
        maze.cell_at(self.mover.centre()).map(|cell| cell.coord())
    }

    /// Refresh the path towards `target` and take one step along it.
    ///
    /// The pursuer heads for the centre of the next cell on its path. With no path, or when
    /// either entity is off the grid, it holds its position.
    pub fn update(&mut self, maze: &Maze, target: Rect, delta_time: f32) -> PathUpdate {
        let own_cell = self.cell(maze);
        let target_cell = maze.cell_at(target.centre()).map(|cell| cell.coord());

        let (own_cell, target_cell) = match (own_cell, target_cell) {
            (Some(own), Some(target)) => (own, target),
            _ => {
                self.mover.hold();
                return PathUpdate::Unchanged;
            }
        };

        let outcome = self.tracker.update(maze, own_cell, target_cell, self.mover.centre());

        match self.tracker.next_waypoint().and_then(|coord| maze.cell(coord)) {
            Some(waypoint) => {
                let _ = self.mover.step_towards(maze, delta_time, waypoint.rect().centre());
            }
            None => self.mover.hold(),
        }
        outcome
    }

    /// Heading taken on the last update.
    pub fn direction(&self) -> Vector2 {
        self.mover.direction()
    }

    /// Has the pursuer caught up with `target`?
    pub fn has_caught(&self, target: Rect) -> bool {
        self.rect().intersects(&target)
    }
}
