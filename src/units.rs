#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnsCount(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellsCount(pub usize);

/// Display width in pixels.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub i32);
/// Display height in pixels.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub i32);

/// Side length of one square grid cell in pixels.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellSize(pub i32);
