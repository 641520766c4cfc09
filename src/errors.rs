// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules in the crate `use crate::errors::*;` to get them.
use error_chain::error_chain;

use crate::cells::GridCoordinate;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        Json(::serde_json::Error);
    }

    errors {
        InvalidDirection(token: char) {
            description("invalid direction")
            display("Invalid Direction -> {}", token)
        }
        GenerationStalled(visited: usize, total: usize) {
            description("maze generation backtracked out of the grid")
            display("Maze generation ran out of history with {} of {} cells visited", visited, total)
        }
        InvalidGridDimensions(rows: usize, cols: usize) {
            description("invalid grid dimensions")
            display("Cannot lay out a {} row by {} column grid", rows, cols)
        }
        InvalidStartCell(coord: GridCoordinate) {
            description("start cell outside the grid")
            display("Start cell ({}, {}) is outside the grid", coord.x, coord.y)
        }
    }
}
