use std::fmt;
use std::rc::Rc;
use std::slice;

use petgraph::graph::{NodeIndex, UnGraph};
use rand::Rng;
use smallvec::SmallVec;

use crate::cells::{Cell, GridCoordinate, GridDirection};
use crate::errors;
use crate::generators;
use crate::geometry::{Point, Rect};
use crate::grid_displays::GridDisplay;
use crate::grid_layout::GridLayout;
use crate::movement::Obstacles;
use crate::pathing::{self, Path};
use crate::units::{CellsCount, ColumnsCount, RowsCount};

pub type NeighbourSmallVec = SmallVec<[(GridCoordinate, GridDirection); 4]>;

/// Pixel thickness of a wall segment, centred on the cell edge it closes.
pub const WALL_THICKNESS: i32 = 3;

/// A grid of cells with open or closed sides, laid out on a display.
///
/// Cells are stored row major. The wall rectangles used for collision tests are cached and
/// rebuilt whenever passages or the layout change.
#[derive(Clone)]
pub struct Maze {
    layout: GridLayout,
    cells: Vec<Cell>,
    walls: Vec<Rect>,
    grid_display: Option<Rc<dyn GridDisplay>>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    NoNeighbour,
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Maze :: rows: {:?}, columns: {:?}, links: {:?}",
               self.rows(), self.columns(), self.links_count())
    }
}

impl Maze {
    /// A maze with every wall standing.
    pub fn new(layout: GridLayout) -> Maze {
        let CellsCount(cells_count) = layout.size();
        let cells = (0..cells_count)
            .map(|index| {
                let coord = layout.index_to_grid_coordinate(index);
                Cell::new(coord, layout.rect_for(coord))
            })
            .collect();

        let mut maze = Maze {
            layout,
            cells,
            walls: vec![],
            grid_display: None,
        };
        maze.rebuild_walls();
        maze
    }

    /// Lay out a fresh grid and carve a maze into it starting from `start`.
    pub fn generate<R: Rng>(layout: GridLayout,
                            start: GridCoordinate,
                            loop_percent: u8,
                            rng: &mut R)
                            -> errors::Result<Maze> {
        let mut maze = Maze::new(layout);
        generators::recursive_backtracker(&mut maze, start, loop_percent, rng)?;
        Ok(maze)
    }

    #[inline]
    pub fn set_grid_display(&mut self, grid_display: Option<Rc<dyn GridDisplay>>) {
        self.grid_display = grid_display;
    }

    #[inline]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.layout.size().0
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.layout.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.layout.columns()
    }

    /// Move the same grid to a new layout, e.g. after the display was resized.
    /// The row and column counts must not change.
    pub fn relayout(&mut self, layout: GridLayout) -> errors::Result<()> {
        if layout.rows() != self.rows() || layout.columns() != self.columns() {
            return Err(errors::ErrorKind::InvalidGridDimensions(layout.rows().0,
                                                                layout.columns().0)
                .into());
        }
        self.layout = layout;
        for cell in &mut self.cells {
            let rect = layout.rect_for(cell.coord());
            cell.set_rect(rect);
        }
        self.rebuild_walls();
        Ok(())
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        self.layout.is_valid_coordinate(coord)
    }

    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        self.layout.grid_coordinate_to_index(coord)
    }

    #[inline]
    pub fn index_to_grid_coordinate(&self, index: usize) -> GridCoordinate {
        self.layout.index_to_grid_coordinate(index)
    }

    #[inline]
    pub fn cell(&self, coord: GridCoordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    /// The cell under a pixel position, None if the pixel is off the grid.
    pub fn cell_at(&self, pixel: Point) -> Option<&Cell> {
        self.layout.cell_at(pixel).and_then(|coord| self.cell(coord))
    }

    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> GridCoordinate {
        let index = rng.gen_range(0..self.size());
        self.layout.index_to_grid_coordinate(index)
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<Cell> {
        self.cells.iter()
    }

    pub fn iter_row(&self) -> slice::Chunks<Cell> {
        self.cells.chunks(self.columns().0)
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: GridDirection)
                                  -> Option<GridCoordinate> {
        coord.offset(direction).filter(|neighbour| self.is_valid_coordinate(*neighbour))
    }

    /// Cells to the West, East, North and South of `coord`, in that order, with the direction
    /// taken to reach each one. With `only_open` only the neighbours reachable through an open
    /// side are returned.
    pub fn neighbours(&self, coord: GridCoordinate, only_open: bool) -> NeighbourSmallVec {
        GridDirection::ENUMERATION_ORDER
            .iter()
            .filter_map(|&dir| {
                self.neighbour_at_direction(coord, dir).map(|neighbour| (neighbour, dir))
            })
            .filter(|&(neighbour, dir)| {
                !only_open ||
                self.cell(neighbour).map_or(false, |cell| cell.is_open(dir.reverse()))
            })
            .collect()
    }

    /// Open the passage from `coord` towards `direction`, and the mirror side of the neighbour.
    /// Returns the neighbour's coordinate.
    pub fn link(&mut self,
                coord: GridCoordinate,
                direction: GridDirection)
                -> Result<GridCoordinate, CellLinkError> {
        let index = self.grid_coordinate_to_index(coord)
            .ok_or(CellLinkError::InvalidGridCoordinate)?;
        let neighbour = self.neighbour_at_direction(coord, direction)
            .ok_or(CellLinkError::NoNeighbour)?;
        let neighbour_index = self.grid_coordinate_to_index(neighbour)
            .ok_or(CellLinkError::NoNeighbour)?;

        self.cells[index].open_side(direction);
        self.cells[neighbour_index].open_side(direction.reverse());
        Ok(neighbour)
    }

    /// Shortest route between two cells through open sides, see `pathing::find_path`.
    pub fn find_path(&self, start: GridCoordinate, goal: GridCoordinate) -> Path {
        pathing::find_path(self, start, goal)
    }

    /// Put every wall back up.
    pub fn close_all(&mut self) {
        for cell in &mut self.cells {
            cell.close_all_sides();
        }
        self.rebuild_walls();
    }

    /// Are two cells in the grid linked?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        self.neighbours(a, true).iter().any(|&(neighbour, _)| neighbour == b)
    }

    pub fn is_neighbour_linked(&self, coord: GridCoordinate, direction: GridDirection) -> bool {
        self.cell(coord).map_or(false, |cell| cell.is_open(direction)) &&
        self.neighbour_at_direction(coord, direction).is_some()
    }

    /// Each passage once, as the (west or north cell, east or south cell) pair it joins.
    pub fn iter_links<'a>(&'a self) -> impl Iterator<Item = (GridCoordinate, GridCoordinate)> + 'a {
        self.cells.iter().flat_map(move |cell| {
            let coord = cell.coord();
            [GridDirection::East, GridDirection::South]
                .iter()
                .filter(move |&&dir| self.is_neighbour_linked(coord, dir))
                .filter_map(move |&dir| self.neighbour_at_direction(coord, dir))
                .map(move |neighbour| (coord, neighbour))
                .collect::<SmallVec<[(GridCoordinate, GridCoordinate); 2]>>()
        })
    }

    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    /// The passages as an undirected graph. Node `i` is the cell with row major index `i`.
    pub fn link_graph(&self) -> UnGraph<GridCoordinate, ()> {
        let mut graph = UnGraph::with_capacity(self.size(), self.size());
        for cell in &self.cells {
            let _ = graph.add_node(cell.coord());
        }
        for (a, b) in self.iter_links() {
            if let (Some(a_index), Some(b_index)) = (self.grid_coordinate_to_index(a),
                                                     self.grid_coordinate_to_index(b)) {
                let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
            }
        }
        graph
    }

    #[inline]
    pub fn walls(&self) -> &[Rect] {
        &self.walls
    }

    /// Recompute the wall rectangles from the closed sides of every cell.
    ///
    /// Each physical wall appears once: a cell contributes its north and west walls, and the
    /// last row and column also contribute the outer south and east walls.
    pub fn rebuild_walls(&mut self) {
        let RowsCount(rows) = self.rows();
        let ColumnsCount(cols) = self.columns();

        let mut walls = Vec::with_capacity(2 * self.size() + rows + cols);
        for cell in &self.cells {
            let rect = cell.rect();
            let coord = cell.coord();
            if !cell.is_open(GridDirection::North) {
                walls.push(wall_rect(rect.top_left(), rect.top_right()));
            }
            if !cell.is_open(GridDirection::West) {
                walls.push(wall_rect(rect.top_left(), rect.bottom_left()));
            }
            if coord.y as usize == rows - 1 && !cell.is_open(GridDirection::South) {
                walls.push(wall_rect(rect.bottom_left(), rect.bottom_right()));
            }
            if coord.x as usize == cols - 1 && !cell.is_open(GridDirection::East) {
                walls.push(wall_rect(rect.top_right(), rect.bottom_right()));
            }
        }
        self.walls = walls;
    }
}

/// Bounding box of a wall line from `a` to `b`, thickened to `WALL_THICKNESS`.
fn wall_rect(a: Point, b: Point) -> Rect {
    let half = WALL_THICKNESS / 2;
    let (left, top) = (a.x.min(b.x), a.y.min(b.y));
    Rect::new(left - half,
              top - half,
              (a.x - b.x).abs() + WALL_THICKNESS,
              (a.y - b.y).abs() + WALL_THICKNESS)
}

impl Obstacles for Maze {
    fn can_move(&self, _old: &Rect, new: &Rect) -> bool {
        !self.walls.iter().any(|wall| wall.intersects(new))
    }

    fn bounds(&self) -> Rect {
        self.layout.display_bounds()
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        const CORNER: &str = "+";
        const WALL_LR_3: &str = "---";
        const WALL_UD: &str = "|";
        const OPEN_3: &str = "   ";
        const OPEN: &str = " ";

        let render_body = |coord: GridCoordinate| -> String {
            self.grid_display
                .as_ref()
                .map_or_else(|| String::from(OPEN_3), |d| d.render_cell_body(coord))
        };

        let mut output = String::new();
        for row in self.iter_row() {
            // Each row draws its own north wall, the cells' west walls and the east boundary.
            let mut top = String::new();
            let mut middle = String::new();
            for cell in row {
                top.push_str(CORNER);
                top.push_str(if cell.is_open(GridDirection::North) { OPEN_3 } else { WALL_LR_3 });
                middle.push_str(if cell.is_open(GridDirection::West) { OPEN } else { WALL_UD });
                middle.push_str(&render_body(cell.coord()));
            }
            top.push_str(CORNER);
            let east_open = row.last().map_or(false, |cell| cell.is_open(GridDirection::East));
            middle.push_str(if east_open { OPEN } else { WALL_UD });

            output.push_str(&top);
            output.push('\n');
            output.push_str(&middle);
            output.push('\n');
        }

        // South boundary of the last row.
        if let Some(last_row) = self.iter_row().last() {
            for cell in last_row {
                output.push_str(CORNER);
                output.push_str(if cell.is_open(GridDirection::South) { OPEN_3 } else { WALL_LR_3 });
            }
            output.push_str(CORNER);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}
