// A* over the passages of a maze.
//
// Every step costs 1 and the heuristic is the manhattan distance to the goal, which never
// overestimates on a 4-connected grid, so the first time the goal is popped off the open
// set its path is a shortest one.
//
// Search node records live in a Vec indexed by the row major cell index, so finding the
// record for a neighbour is a direct lookup.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use bit_set::BitSet;
use itertools::Itertools;
use log::debug;

use crate::cells::GridCoordinate;
use crate::grid::Maze;

/// Cells from a start to a goal, consecutive cells joined by an open side.
pub type Path = Vec<GridCoordinate>;

#[derive(Debug, Copy, Clone)]
struct SearchNode {
    g_score: u32,
    previous: Option<usize>,
}

impl Default for SearchNode {
    fn default() -> SearchNode {
        SearchNode {
            g_score: u32::max_value(),
            previous: None,
        }
    }
}

/// Open set entry. Ordered on f score, then on push order so that among equal f scores the
/// earliest enumerated cell is expanded first.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct Frontier {
    f_score: u32,
    sequence: u64,
    index: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Frontier) -> Ordering {
        (self.f_score, self.sequence).cmp(&(other.f_score, other.sequence))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Frontier) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[inline]
fn heuristic(a: GridCoordinate, b: GridCoordinate) -> u32 {
    a.manhattan_distance(b)
}

/// Shortest path from `start` to `goal` through open sides, both ends included.
///
/// `start == goal` gives the single cell path. An empty path means there is no route, or
/// that one of the coordinates is not on the grid.
pub fn find_path(maze: &Maze, start: GridCoordinate, goal: GridCoordinate) -> Path {

    let (start_index, goal_index) = match (maze.grid_coordinate_to_index(start),
                                           maze.grid_coordinate_to_index(goal)) {
        (Some(s), Some(g)) => (s, g),
        _ => return Path::new(),
    };
    if start_index == goal_index {
        return vec![start];
    }

    let mut nodes = vec![SearchNode::default(); maze.size()];
    let mut closed = BitSet::with_capacity(maze.size());
    let mut open = BinaryHeap::new();
    let mut sequence = 0u64;

    nodes[start_index].g_score = 0;
    open.push(Reverse(Frontier {
        f_score: heuristic(start, goal),
        sequence,
        index: start_index,
    }));

    while let Some(Reverse(Frontier { index: current_index, .. })) = open.pop() {

        if current_index == goal_index {
            return reconstruct(maze, &nodes, goal_index);
        }
        // Stale entries left behind by a later, cheaper push.
        if !closed.insert(current_index) {
            continue;
        }

        let current = maze.index_to_grid_coordinate(current_index);
        let g_score = nodes[current_index].g_score + 1;

        for &(neighbour, _) in maze.neighbours(current, true).iter() {
            let neighbour_index = match maze.grid_coordinate_to_index(neighbour) {
                Some(index) => index,
                None => continue,
            };
            if closed.contains(neighbour_index) {
                continue;
            }

            if g_score < nodes[neighbour_index].g_score {
                nodes[neighbour_index] = SearchNode {
                    g_score,
                    previous: Some(current_index),
                };
                sequence += 1;
                open.push(Reverse(Frontier {
                    f_score: g_score + heuristic(neighbour, goal),
                    sequence,
                    index: neighbour_index,
                }));
            }
        }
    }

    debug!("no route from {:?} to {:?}", start, goal);
    Path::new()
}

fn reconstruct(maze: &Maze, nodes: &[SearchNode], goal_index: usize) -> Path {
    let mut path = vec![maze.index_to_grid_coordinate(goal_index)];
    let mut current = goal_index;
    while let Some(previous) = nodes[current].previous {
        path.push(maze.index_to_grid_coordinate(previous));
        current = previous;
    }
    path.reverse();
    path
}

/// Does every consecutive pair of cells in the path share an open side?
pub fn is_connected_path(maze: &Maze, path: &[GridCoordinate]) -> bool {
    path.iter().all(|coord| maze.is_valid_coordinate(*coord)) &&
    path.iter().tuple_windows().all(|(a, b)| maze.is_linked(*a, *b))
}

#[cfg(test)]
mod tests {
    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::cells::GridDirection;
    use crate::grid_layout::GridLayout;
    use crate::units::{ColumnsCount, Height, RowsCount, Width};

    fn closed_maze(cols: usize, rows: usize) -> Maze {
        let layout = GridLayout::configure(Width(1280), Height(720),
                                           RowsCount(rows), ColumnsCount(cols))
            .expect("valid layout");
        Maze::new(layout)
    }

    fn open_maze(cols: usize, rows: usize) -> Maze {
        let mut maze = closed_maze(cols, rows);
        for y in 0..rows as u32 {
            for x in 0..cols as u32 {
                let coord = GridCoordinate::new(x, y);
                let _ = maze.link(coord, GridDirection::East);
                let _ = maze.link(coord, GridDirection::South);
            }
        }
        maze
    }

    fn gc(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    #[test]
    fn same_cell_path() {
        let maze = closed_maze(3, 3);
        assert_eq!(find_path(&maze, gc(1, 1), gc(1, 1)), vec![gc(1, 1)]);
    }

    #[test]
    fn walls_block_the_search() {
        let maze = closed_maze(3, 3);
        assert!(find_path(&maze, gc(0, 0), gc(2, 2)).is_empty());
    }

    #[test]
    fn coordinates_off_the_grid_have_no_path() {
        let maze = open_maze(3, 3);
        assert!(find_path(&maze, gc(0, 0), gc(3, 3)).is_empty());
        assert!(find_path(&maze, gc(7, 0), gc(0, 0)).is_empty());
    }

    #[test]
    fn follows_the_only_corridor() {
        // S-shaped corridor through a 3x2 grid
        let mut maze = closed_maze(3, 2);
        maze.link(gc(0, 0), GridDirection::East).unwrap();
        maze.link(gc(1, 0), GridDirection::East).unwrap();
        maze.link(gc(2, 0), GridDirection::South).unwrap();
        maze.link(gc(2, 1), GridDirection::West).unwrap();
        maze.link(gc(1, 1), GridDirection::West).unwrap();

        assert_eq!(find_path(&maze, gc(0, 0), gc(0, 1)),
                   vec![gc(0, 0), gc(1, 0), gc(2, 0), gc(2, 1), gc(1, 1), gc(0, 1)]);
        assert_eq!(find_path(&maze, gc(0, 1), gc(2, 0)),
                   vec![gc(0, 1), gc(1, 1), gc(2, 1), gc(2, 0)]);
    }

    #[test]
    fn shortest_route_on_an_open_grid() {
        let maze = open_maze(6, 5);
        let path = find_path(&maze, gc(0, 0), gc(5, 4));
        assert_eq!(path.len(), 5 + 4 + 1);
        assert!(is_connected_path(&maze, &path));
    }

    #[test]
    fn takes_the_shorter_loop() {
        // A ring around a 3x3 grid's centre: two ways from (0, 0) to (1, 2).
        let mut maze = closed_maze(3, 3);
        for &(x, y, dir) in &[(0, 0, GridDirection::East),
                              (1, 0, GridDirection::East),
                              (2, 0, GridDirection::South),
                              (2, 1, GridDirection::South),
                              (2, 2, GridDirection::West),
                              (1, 2, GridDirection::West),
                              (0, 2, GridDirection::North),
                              (0, 1, GridDirection::North)] {
            maze.link(gc(x, y), dir).unwrap();
        }
        let path = find_path(&maze, gc(0, 0), gc(1, 2));
        assert_eq!(path, vec![gc(0, 0), gc(0, 1), gc(0, 2), gc(1, 2)]);
    }

    #[test]
    fn ties_are_broken_deterministically() {
        let maze = open_maze(4, 4);
        let first = find_path(&maze, gc(0, 0), gc(3, 3));
        for _ in 0..10 {
            assert_eq!(find_path(&maze, gc(0, 0), gc(3, 3)), first);
        }
    }

    #[test]
    fn paths_in_generated_mazes_are_valid() {
        fn prop(seed: u64, a: u16, b: u16) -> TestResult {
            let layout = GridLayout::configure(Width(1280), Height(720),
                                               RowsCount(10), ColumnsCount(15))
                .expect("valid layout");
            let mut rng = StdRng::seed_from_u64(seed);
            let maze = match Maze::generate(layout, gc(0, 0), 20, &mut rng) {
                Ok(maze) => maze,
                Err(_) => return TestResult::failed(),
            };
            let start = maze.index_to_grid_coordinate(a as usize % maze.size());
            let goal = maze.index_to_grid_coordinate(b as usize % maze.size());

            let path = find_path(&maze, start, goal);
            TestResult::from_bool(path.first() == Some(&start) &&
                                  path.last() == Some(&goal) &&
                                  is_connected_path(&maze, &path))
        }
        quickcheck(prop as fn(u64, u16, u16) -> TestResult);
    }

    #[test]
    fn perfect_maze_path_is_the_unique_route() {
        // In a spanning tree the path never revisits a cell.
        let layout = GridLayout::configure(Width(1280), Height(720),
                                           RowsCount(8), ColumnsCount(8))
            .unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let maze = Maze::generate(layout, gc(0, 0), 0, &mut rng).unwrap();
        let path = find_path(&maze, gc(0, 0), gc(7, 7));
        let unique = path.iter().unique().count();
        assert_eq!(unique, path.len());
    }
}
