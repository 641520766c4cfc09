//! **mazechase** is the core of a maze chase game: braided maze generation, A* route finding
//! to a moving target and wall collision for entities moving through the maze.

pub mod agents;
pub mod cells;
pub mod config;
pub mod errors;
pub mod generators;
pub mod geometry;
pub mod grid;
pub mod grid_displays;
pub mod grid_layout;
pub mod movement;
pub mod path_tracker;
pub mod pathing;
pub mod units;
mod utils;
