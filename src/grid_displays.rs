use crate::cells::GridCoordinate;
use crate::utils::{self, FnvHashSet};

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: GridCoordinate) -> String {
        String::from("   ")
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: Vec<GridCoordinate>,
    end_coordinates: Vec<GridCoordinate>,
}
impl StartEndPointsDisplay {
    pub fn new(starts: Vec<GridCoordinate>, ends: Vec<GridCoordinate>) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts,
            end_coordinates: ends,
        }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if self.start_coordinates.contains(&coord) {
            String::from(" S ")
        } else if self.end_coordinates.contains(&coord) {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}

/// Marks every cell of a path with a dot, and its two ends with `S` and `E`.
#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
    ends: StartEndPointsDisplay,
}
impl PathDisplay {
    pub fn new(path: &[GridCoordinate]) -> Self {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        let starts = path.first().cloned().into_iter().collect();
        let ends = path.last().cloned().into_iter().collect();
        PathDisplay {
            on_path_coordinates,
            ends: StartEndPointsDisplay::new(starts, ends),
        }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        let end_marker = self.ends.render_cell_body(coord);
        if end_marker.trim().is_empty() && self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            end_marker
        }
    }
}
