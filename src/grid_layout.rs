use std::cmp;

use error_chain::bail;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::geometry::{Point, Rect};
use crate::units::{CellSize, CellsCount, ColumnsCount, Height, RowsCount, Width};

pub const DEFAULT_MARGIN_X: i32 = 50;
pub const DEFAULT_MARGIN_Y: i32 = 100;

/// Where a `rows * cols` grid of square cells sits on a display.
///
/// The cell size is the largest that fits the display minus a margin on each axis and
/// the grid is centred in the display.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridLayout {
    rows: RowsCount,
    cols: ColumnsCount,
    display_width: Width,
    display_height: Height,
    cell_size: CellSize,
    offset: Point,
}

impl GridLayout {
    pub fn configure(display_width: Width,
                     display_height: Height,
                     rows: RowsCount,
                     cols: ColumnsCount)
                     -> Result<GridLayout> {
        GridLayout::configure_with_margins(display_width,
                                           display_height,
                                           rows,
                                           cols,
                                           DEFAULT_MARGIN_X,
                                           DEFAULT_MARGIN_Y)
    }

    pub fn configure_with_margins(display_width: Width,
                                  display_height: Height,
                                  rows: RowsCount,
                                  cols: ColumnsCount,
                                  margin_x: i32,
                                  margin_y: i32)
                                  -> Result<GridLayout> {

        let (RowsCount(rows_n), ColumnsCount(cols_n)) = (rows, cols);
        if rows_n == 0 || cols_n == 0 || rows_n > i32::MAX as usize ||
           cols_n > i32::MAX as usize {
            bail!(ErrorKind::InvalidGridDimensions(rows_n, cols_n));
        }

        let (Width(w), Height(h)) = (display_width, display_height);
        let cell_size = cmp::min((w - margin_x) / cols_n as i32,
                                 (h - margin_y) / rows_n as i32);
        if cell_size <= 0 {
            bail!(ErrorKind::InvalidGridDimensions(rows_n, cols_n));
        }

        let offset = Point::new((w - cols_n as i32 * cell_size) / 2,
                                (h - rows_n as i32 * cell_size) / 2);

        Ok(GridLayout {
            rows,
            cols,
            display_width,
            display_height,
            cell_size: CellSize(cell_size),
            offset,
        })
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.cols
    }

    #[inline]
    pub fn size(&self) -> CellsCount {
        CellsCount(self.rows.0 * self.cols.0)
    }

    #[inline]
    pub fn cell_size(&self) -> CellSize {
        self.cell_size
    }

    #[inline]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// The whole display; agents are kept inside it.
    pub fn display_bounds(&self) -> Rect {
        Rect::new(0, 0, self.display_width.0, self.display_height.0)
    }

    /// The pixel area covered by the cells.
    pub fn grid_bounds(&self) -> Rect {
        let CellSize(cell) = self.cell_size;
        Rect::new(self.offset.x,
                  self.offset.y,
                  self.cols.0 as i32 * cell,
                  self.rows.0 as i32 * cell)
    }

    /// Grid coordinate under a pixel position, None when the pixel is off the grid.
    pub fn cell_at(&self, pixel: Point) -> Option<GridCoordinate> {
        let CellSize(cell) = self.cell_size;
        let col = (pixel.x - self.offset.x).div_euclid(cell);
        let row = (pixel.y - self.offset.y).div_euclid(cell);

        if col < 0 || row < 0 || col as usize >= self.cols.0 || row as usize >= self.rows.0 {
            None
        } else {
            Some(GridCoordinate::new(col as u32, row as u32))
        }
    }

    pub fn rect_for(&self, coord: GridCoordinate) -> Rect {
        let CellSize(cell) = self.cell_size;
        Rect::new(coord.x as i32 * cell + self.offset.x,
                  coord.y as i32 * cell + self.offset.y,
                  cell,
                  cell)
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.x as usize) < self.cols.0 && (coord.y as usize) < self.rows.0
    }

    /// Convert a grid coordinate to a one dimensional row major index in the range 0...size.
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.cols.0 + coord.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn index_to_grid_coordinate(&self, index: usize) -> GridCoordinate {
        GridCoordinate::new((index % self.cols.0) as u32, (index / self.cols.0) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_layout(rows: usize, cols: usize) -> GridLayout {
        GridLayout::configure(Width(1280), Height(720), RowsCount(rows), ColumnsCount(cols))
            .expect("valid layout")
    }

    #[test]
    fn cell_size_fits_both_axes() {
        // (1280 - 50) / 40 = 30, (720 - 100) / 20 = 31
        let layout = window_layout(20, 40);
        assert_eq!(layout.cell_size(), CellSize(30));
        assert_eq!(layout.offset(), Point::new((1280 - 40 * 30) / 2, (720 - 20 * 30) / 2));
        assert_eq!(layout.offset(), Point::new(40, 60));
    }

    #[test]
    fn cell_rects() {
        let layout = window_layout(20, 40);
        assert_eq!(layout.rect_for(GridCoordinate::new(0, 0)), Rect::new(40, 60, 30, 30));
        assert_eq!(layout.rect_for(GridCoordinate::new(2, 1)), Rect::new(100, 90, 30, 30));
        assert_eq!(layout.grid_bounds(), Rect::new(40, 60, 1200, 600));
    }

    #[test]
    fn pixel_to_cell() {
        let layout = window_layout(20, 40);
        assert_eq!(layout.cell_at(Point::new(40, 60)), Some(GridCoordinate::new(0, 0)));
        assert_eq!(layout.cell_at(Point::new(69, 89)), Some(GridCoordinate::new(0, 0)));
        assert_eq!(layout.cell_at(Point::new(70, 89)), Some(GridCoordinate::new(1, 0)));
        assert_eq!(layout.cell_at(Point::new(1239, 659)), Some(GridCoordinate::new(39, 19)));
    }

    #[test]
    fn pixel_off_the_grid_has_no_cell() {
        let layout = window_layout(20, 40);
        assert_eq!(layout.cell_at(Point::new(39, 100)), None);
        assert_eq!(layout.cell_at(Point::new(100, 59)), None);
        assert_eq!(layout.cell_at(Point::new(1240, 100)), None);
        assert_eq!(layout.cell_at(Point::new(100, 660)), None);
        assert_eq!(layout.cell_at(Point::new(-500, -500)), None);
    }

    #[test]
    fn every_cell_rect_maps_back_to_its_cell() {
        let layout = window_layout(7, 9);
        for index in 0..layout.size().0 {
            let coord = layout.index_to_grid_coordinate(index);
            assert_eq!(layout.grid_coordinate_to_index(coord), Some(index));
            assert_eq!(layout.cell_at(layout.rect_for(coord).centre()), Some(coord));
        }
    }

    #[test]
    fn degenerate_layouts_are_rejected() {
        assert!(GridLayout::configure(Width(1280), Height(720), RowsCount(0), ColumnsCount(4))
            .is_err());
        assert!(GridLayout::configure(Width(60), Height(120), RowsCount(30), ColumnsCount(30))
            .is_err());
    }
}
