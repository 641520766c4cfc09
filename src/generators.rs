use bit_set::BitSet;
use error_chain::bail;
use log::{debug, trace};
use rand::Rng;
use rand::seq::SliceRandom;
use smallvec::SmallVec;

use crate::cells::{GridCoordinate, GridDirection};
use crate::errors::*;
use crate::grid::Maze;

/// Share of carving steps, in percent, that may link back into already visited cells.
pub const DEFAULT_LOOP_PERCENT: u8 = 20;

/// Apply the recursive backtracker maze generation algorithm to a grid, with loop injection.
///
/// A random walk carves passages from `start`, always moving from the cell on top of the
/// history stack to a random neighbour and pushing it. When the top cell has no candidate
/// neighbours the walk backtracks by popping the stack.
///
/// Each step flips a coin: with probability `(100 - loop_percent) / 100` only unvisited
/// neighbours are candidates, which on its own gives a perfect maze (a spanning tree).
/// Otherwise visited neighbours stay candidates too, so the walk can punch a passage back
/// into carved territory and braid the maze with loops. A `loop_percent` of 0 always gives a
/// perfect maze.
///
/// Any existing passages are closed first. Finishes once every cell has been visited.
pub fn recursive_backtracker<R: Rng>(maze: &mut Maze,
                                     start: GridCoordinate,
                                     loop_percent: u8,
                                     rng: &mut R)
                                     -> Result<()> {

    let start_index = match maze.grid_coordinate_to_index(start) {
        Some(index) => index,
        None => bail!(ErrorKind::InvalidStartCell(start)),
    };
    let loop_percent = loop_percent.min(100);
    let cells_count = maze.size();

    debug!("carving {}x{} maze from {:?}, loop percent {}",
           maze.columns().0,
           maze.rows().0,
           start,
           loop_percent);

    maze.close_all();

    let mut visited = BitSet::with_capacity(cells_count);
    let _ = visited.insert(start_index);
    let mut history = vec![start];

    while visited.len() < cells_count {

        let current = match history.last() {
            Some(coord) => *coord,
            None => bail!(ErrorKind::GenerationStalled(visited.len(), cells_count)),
        };

        let allow_loops = rng.gen_range(0..100) < loop_percent;
        let candidates = maze.neighbours(current, false)
            .into_iter()
            .filter(|&(neighbour, _)| {
                allow_loops || !is_visited(maze, &visited, neighbour)
            })
            .collect::<SmallVec<[(GridCoordinate, GridDirection); 4]>>();

        match candidates.choose(rng) {
            None => {
                trace!("backtracking from {:?}", current);
                let _ = history.pop();
            }
            Some(&(neighbour, direction)) => {
                let linked = maze.link(current, direction)
                    .map_err(|_| Error::from(ErrorKind::InvalidDirection(direction.token())))?;
                debug_assert_eq!(linked, neighbour);

                if let Some(index) = maze.grid_coordinate_to_index(neighbour) {
                    let _ = visited.insert(index);
                }
                history.push(neighbour);
            }
        }
    }

    maze.rebuild_walls();
    debug!("maze carved with {} passages", maze.links_count());
    Ok(())
}

fn is_visited(maze: &Maze, visited: &BitSet, coord: GridCoordinate) -> bool {
    maze.grid_coordinate_to_index(coord).map_or(false, |index| visited.contains(index))
}
