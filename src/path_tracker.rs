use std::collections::VecDeque;

use log::trace;

use crate::cells::GridCoordinate;
use crate::geometry::Point;
use crate::grid::Maze;
use crate::pathing::find_path;

/// Cheap extensions allowed before a full search is forced again.
pub const DEFAULT_PATH_EDIT_LIMIT: u32 = 3;

/// What an update did to the stored path.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PathUpdate {
    /// The target stepped back onto the path, the tail past it was cut off.
    Truncated,
    /// The target moved into an open neighbour of the path's end, which was appended.
    Extended,
    /// A fresh A* search replaced the path.
    Recomputed,
    /// The agent reached the centre of the path's first cell, which was dropped.
    Advanced,
    Unchanged,
}

/// Keeps an agent's path to a moving target up to date, preferring small edits over new
/// searches.
#[derive(Debug, Clone)]
pub struct PathTracker {
    path: VecDeque<GridCoordinate>,
    edits: u32,
    edit_limit: u32,
    recomputes: usize,
}

impl Default for PathTracker {
    fn default() -> PathTracker {
        PathTracker::new(DEFAULT_PATH_EDIT_LIMIT)
    }
}

impl PathTracker {
    pub fn new(edit_limit: u32) -> PathTracker {
        PathTracker {
            path: VecDeque::new(),
            edits: 0,
            edit_limit,
            recomputes: 0,
        }
    }

    /// Start tracking from an already known path.
    pub fn with_path(path: Vec<GridCoordinate>, edit_limit: u32) -> PathTracker {
        PathTracker { path: path.into(), ..PathTracker::new(edit_limit) }
    }

    /// Remaining cells to walk through, the next one first.
    #[inline]
    pub fn waypoints(&self) -> &VecDeque<GridCoordinate> {
        &self.path
    }

    #[inline]
    pub fn next_waypoint(&self) -> Option<GridCoordinate> {
        self.path.front().cloned()
    }

    /// Extensions made since the last full search.
    #[inline]
    pub fn edits(&self) -> u32 {
        self.edits
    }

    #[inline]
    pub fn edit_limit(&self) -> u32 {
        self.edit_limit
    }

    /// Full searches run so far.
    #[inline]
    pub fn recomputes(&self) -> usize {
        self.recomputes
    }

    /// Bring the path in line with the agent and target cells for this tick.
    ///
    /// When the path does not end on the target:
    ///
    /// - a target already somewhere on the path truncates the path just after it,
    /// - a target in an open neighbour of the path's end is appended, at most `edit_limit`
    ///   times in a row,
    /// - anything else runs a new search from the agent's cell. If the agent was not on the
    ///   old path, the new path's first cell (the agent's own) is dropped so it carries on
    ///   forwards instead of first walking back to its cell centre.
    ///
    /// Then, unless the path was just cut or extended, the first cell is dropped once the
    /// agent's centre sits exactly on that cell's centre.
    pub fn update(&mut self,
                  maze: &Maze,
                  agent_cell: GridCoordinate,
                  target_cell: GridCoordinate,
                  agent_centre: Point)
                  -> PathUpdate {

        let mut outcome = PathUpdate::Unchanged;

        if self.path.back() != Some(&target_cell) {

            if let Some(position) = self.path.iter().position(|&coord| coord == target_cell) {
                self.path.truncate(position + 1);
                trace!("target {:?} back on the path, {} waypoints left", target_cell, self.path.len());
                return PathUpdate::Truncated;
            }

            if self.edits < self.edit_limit {
                if let Some(&last) = self.path.back() {
                    if maze.is_linked(last, target_cell) {
                        self.path.push_back(target_cell);
                        self.edits += 1;
                        trace!("extended path to {:?}, edit {}", target_cell, self.edits);
                        return PathUpdate::Extended;
                    }
                }
            }

            let agent_was_on_path = self.path.contains(&agent_cell);
            self.edits = 0;
            self.path = find_path(maze, agent_cell, target_cell).into();
            self.recomputes += 1;
            trace!("searched {:?} -> {:?}, {} cells", agent_cell, target_cell, self.path.len());

            // A one cell path is the target itself and is kept.
            if !agent_was_on_path && self.path.len() > 1 {
                let _ = self.path.pop_front();
            }
            outcome = PathUpdate::Recomputed;
        }

        let arrived = self.path
            .front()
            .and_then(|&coord| maze.cell(coord))
            .map_or(false, |cell| cell.rect().centre() == agent_centre);
        if arrived {
            let _ = self.path.pop_front();
            if outcome == PathUpdate::Unchanged {
                outcome = PathUpdate::Advanced;
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::GridDirection;
    use crate::grid_layout::GridLayout;
    use crate::units::{ColumnsCount, Height, RowsCount, Width};

    fn gc(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    fn corridor(length: usize) -> Maze {
        let layout = GridLayout::configure(Width(1280), Height(720),
                                           RowsCount(1), ColumnsCount(length))
            .expect("valid layout");
        let mut maze = Maze::new(layout);
        for x in 0..(length as u32 - 1) {
            maze.link(gc(x, 0), GridDirection::East).expect("link failed");
        }
        maze
    }

    fn centre_of(maze: &Maze, coord: GridCoordinate) -> Point {
        maze.cell(coord).expect("cell on grid").rect().centre()
    }

    fn waypoints(tracker: &PathTracker) -> Vec<GridCoordinate> {
        tracker.waypoints().iter().cloned().collect()
    }

    // Somewhere inside cell (0, 0) but away from its centre.
    fn off_centre(maze: &Maze) -> Point {
        centre_of(maze, gc(0, 0)) + Point::new(3, 2)
    }

    #[test]
    fn target_back_on_path_truncates() {
        let maze = corridor(5);
        let mut tracker = PathTracker::with_path(vec![gc(0, 0), gc(1, 0), gc(2, 0)],
                                                 DEFAULT_PATH_EDIT_LIMIT);
        let outcome = tracker.update(&maze, gc(0, 0), gc(1, 0), off_centre(&maze));
        assert_eq!(outcome, PathUpdate::Truncated);
        assert_eq!(waypoints(&tracker), vec![gc(0, 0), gc(1, 0)]);
        assert_eq!(tracker.recomputes(), 0);
    }

    #[test]
    fn first_update_searches_and_skips_own_cell() {
        let maze = corridor(5);
        let mut tracker = PathTracker::default();
        let outcome = tracker.update(&maze, gc(0, 0), gc(3, 0), off_centre(&maze));
        assert_eq!(outcome, PathUpdate::Recomputed);
        assert_eq!(waypoints(&tracker), vec![gc(1, 0), gc(2, 0), gc(3, 0)]);
        assert_eq!(tracker.recomputes(), 1);
    }

    #[test]
    fn extensions_are_capped() {
        let maze = corridor(7);
        let mut tracker = PathTracker::default();
        let agent = off_centre(&maze);

        assert_eq!(tracker.update(&maze, gc(0, 0), gc(1, 0), agent), PathUpdate::Recomputed);
        for (step, x) in (2..5).enumerate() {
            assert_eq!(tracker.update(&maze, gc(0, 0), gc(x, 0), agent), PathUpdate::Extended);
            assert_eq!(tracker.edits(), step as u32 + 1);
        }
        assert_eq!(tracker.recomputes(), 1);
        assert_eq!(waypoints(&tracker), vec![gc(1, 0), gc(2, 0), gc(3, 0), gc(4, 0)]);

        // A fourth move forces a full search.
        assert_eq!(tracker.update(&maze, gc(0, 0), gc(5, 0), agent), PathUpdate::Recomputed);
        assert_eq!(tracker.edits(), 0);
        assert_eq!(tracker.recomputes(), 2);
        assert_eq!(waypoints(&tracker), vec![gc(1, 0), gc(2, 0), gc(3, 0), gc(4, 0), gc(5, 0)]);
    }

    #[test]
    fn target_jumping_away_forces_a_search() {
        let maze = corridor(6);
        let mut tracker = PathTracker::with_path(vec![gc(1, 0), gc(2, 0)], DEFAULT_PATH_EDIT_LIMIT);
        let outcome = tracker.update(&maze, gc(1, 0), gc(5, 0), off_centre(&maze));
        assert_eq!(outcome, PathUpdate::Recomputed);
        // The agent was on the old path, so its own cell is kept.
        assert_eq!(waypoints(&tracker), vec![gc(1, 0), gc(2, 0), gc(3, 0), gc(4, 0), gc(5, 0)]);
    }

    #[test]
    fn closed_neighbour_is_not_appended() {
        let layout = GridLayout::configure(Width(1280), Height(720), RowsCount(2), ColumnsCount(2))
            .expect("valid layout");
        let mut maze = Maze::new(layout);
        maze.link(gc(0, 0), GridDirection::East).unwrap();
        maze.link(gc(1, 0), GridDirection::South).unwrap();
        maze.link(gc(1, 1), GridDirection::West).unwrap();

        // (0, 0) and (0, 1) are adjacent but walled off from each other.
        let mut tracker = PathTracker::with_path(vec![gc(1, 0), gc(0, 0)], DEFAULT_PATH_EDIT_LIMIT);
        let outcome = tracker.update(&maze, gc(1, 0), gc(0, 1), Point::new(-100, -100));
        assert_eq!(outcome, PathUpdate::Recomputed);
        assert_eq!(waypoints(&tracker), vec![gc(1, 0), gc(1, 1), gc(0, 1)]);
    }

    #[test]
    fn reaching_a_cell_centre_advances() {
        let maze = corridor(3);
        let mut tracker = PathTracker::with_path(vec![gc(0, 0), gc(1, 0), gc(2, 0)],
                                                 DEFAULT_PATH_EDIT_LIMIT);
        let outcome = tracker.update(&maze, gc(0, 0), gc(2, 0), centre_of(&maze, gc(0, 0)));
        assert_eq!(outcome, PathUpdate::Advanced);
        assert_eq!(tracker.next_waypoint(), Some(gc(1, 0)));

        let outcome = tracker.update(&maze, gc(0, 0), gc(2, 0), off_centre(&maze));
        assert_eq!(outcome, PathUpdate::Unchanged);
        assert_eq!(tracker.next_waypoint(), Some(gc(1, 0)));
    }

    #[test]
    fn unreachable_target_leaves_an_empty_path() {
        let layout = GridLayout::configure(Width(1280), Height(720), RowsCount(1), ColumnsCount(3))
            .expect("valid layout");
        let maze = Maze::new(layout);
        let mut tracker = PathTracker::default();
        assert_eq!(tracker.update(&maze, gc(0, 0), gc(2, 0), off_centre(&maze)),
                   PathUpdate::Recomputed);
        assert!(tracker.waypoints().is_empty());
        assert_eq!(tracker.next_waypoint(), None);
    }

    #[test]
    fn zero_edit_limit_always_searches() {
        let maze = corridor(4);
        let mut tracker = PathTracker::new(0);
        let agent = off_centre(&maze);
        let _ = tracker.update(&maze, gc(0, 0), gc(1, 0), agent);
        let _ = tracker.update(&maze, gc(0, 0), gc(2, 0), agent);
        let _ = tracker.update(&maze, gc(0, 0), gc(3, 0), agent);
        assert_eq!(tracker.recomputes(), 3);
    }
}
