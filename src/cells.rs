use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use crate::errors::*;
use crate::geometry::Rect;

/// Column (`x`) and row (`y`) of a cell, 0-indexed from the top left of the grid.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub x: u32,
    pub y: u32,
}

impl GridCoordinate {
    pub fn new(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate { x, y }
    }

    /// Creates the coordinate 1 cell away in the given direction.
    /// Returns None if the coordinate would go negative; the far grid edges are the grid's concern.
    pub fn offset(&self, dir: GridDirection) -> Option<GridCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            GridDirection::North => y.checked_sub(1).map(|y| GridCoordinate::new(x, y)),
            GridDirection::South => Some(GridCoordinate::new(x, y + 1)),
            GridDirection::East => Some(GridCoordinate::new(x + 1, y)),
            GridDirection::West => x.checked_sub(1).map(|x| GridCoordinate::new(x, y)),
        }
    }

    pub fn manhattan_distance(&self, other: GridCoordinate) -> u32 {
        let dx = (self.x as i64 - other.x as i64).abs();
        let dy = (self.y as i64 - other.y as i64).abs();
        (dx + dy) as u32
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(x_y_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridDirection {
    North,
    East,
    South,
    West,
}

impl GridDirection {
    /// The order neighbours are enumerated in. Generation and path finding tie breaks follow it.
    pub const ENUMERATION_ORDER: [GridDirection; 4] = [GridDirection::West,
                                                        GridDirection::East,
                                                        GridDirection::North,
                                                        GridDirection::South];

    pub fn reverse(self) -> GridDirection {
        match self {
            GridDirection::North => GridDirection::South,
            GridDirection::South => GridDirection::North,
            GridDirection::East => GridDirection::West,
            GridDirection::West => GridDirection::East,
        }
    }

    pub fn token(self) -> char {
        match self {
            GridDirection::North => 'N',
            GridDirection::East => 'E',
            GridDirection::South => 'S',
            GridDirection::West => 'W',
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        match self {
            GridDirection::North => 0b0001,
            GridDirection::East => 0b0010,
            GridDirection::South => 0b0100,
            GridDirection::West => 0b1000,
        }
    }
}

impl TryFrom<char> for GridDirection {
    type Error = Error;

    fn try_from(token: char) -> Result<GridDirection> {
        match token {
            'N' => Ok(GridDirection::North),
            'E' => Ok(GridDirection::East),
            'S' => Ok(GridDirection::South),
            'W' => Ok(GridDirection::West),
            _ => Err(ErrorKind::InvalidDirection(token).into()),
        }
    }
}

impl FromStr for GridDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<GridDirection> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(token), None) => GridDirection::try_from(token),
            (Some(token), Some(_)) => Err(ErrorKind::InvalidDirection(token).into()),
            (None, _) => Err(ErrorKind::InvalidDirection(' ').into()),
        }
    }
}

impl fmt::Display for GridDirection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Reverse a direction token, failing on anything that is not one of `N`, `E`, `S` or `W`.
pub fn reverse_token(token: char) -> Result<char> {
    GridDirection::try_from(token).map(|dir| dir.reverse().token())
}

/// The set of open (wall free) sides of a cell.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct Sides(u8);

impl Sides {
    pub fn none() -> Sides {
        Sides(0)
    }

    #[inline]
    pub fn contains(&self, dir: GridDirection) -> bool {
        self.0 & dir.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, dir: GridDirection) {
        self.0 |= dir.bit();
    }

    #[inline]
    pub fn remove(&mut self, dir: GridDirection) {
        self.0 &= !dir.bit();
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = GridDirection> {
        let sides = *self;
        let order: &'static [GridDirection; 4] = &GridDirection::ENUMERATION_ORDER;
        order.iter().cloned().filter(move |dir| sides.contains(*dir))
    }
}

/// One square of the maze.
#[derive(Clone, Debug)]
pub struct Cell {
    coord: GridCoordinate,
    open_sides: Sides,
    rect: Rect,
}

impl Cell {
    pub fn new(coord: GridCoordinate, rect: Rect) -> Cell {
        Cell {
            coord,
            open_sides: Sides::none(),
            rect,
        }
    }

    #[inline]
    pub fn coord(&self) -> GridCoordinate {
        self.coord
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn open_sides(&self) -> Sides {
        self.open_sides
    }

    #[inline]
    pub fn is_open(&self, dir: GridDirection) -> bool {
        self.open_sides.contains(dir)
    }

    pub(crate) fn open_side(&mut self, dir: GridDirection) {
        self.open_sides.insert(dir);
    }

    pub(crate) fn close_all_sides(&mut self) {
        self.open_sides = Sides::none();
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Cell) -> bool {
        self.coord == other.coord
    }
}
impl Eq for Cell {}
