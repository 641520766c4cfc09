use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_derive::{Deserialize, Serialize};

use crate::errors::*;
use crate::generators::DEFAULT_LOOP_PERCENT;
use crate::grid_layout::{GridLayout, DEFAULT_MARGIN_X, DEFAULT_MARGIN_Y};
use crate::path_tracker::DEFAULT_PATH_EDIT_LIMIT;
use crate::units::{ColumnsCount, Height, RowsCount, Width};

/// Tunables for a chase. Every field is optional in a JSON config file and falls back to
/// its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaseConfig {
    pub rows: usize,
    pub cols: usize,
    /// Percent chance per carving step of allowing a loop.
    pub loop_percent: u8,
    pub display_width: i32,
    pub display_height: i32,
    /// Total horizontal pixels left free around the grid.
    pub margin_x: i32,
    /// Total vertical pixels left free around the grid.
    pub margin_y: i32,
    /// Pixels per second.
    pub player_speed: f32,
    /// Pixels per second.
    pub pursuer_speed: f32,
    pub path_edit_limit: u32,
    /// Side length of the square player and pursuer, in pixels.
    pub agent_size: i32,
    /// Fixed seed for reproducible mazes. Drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for ChaseConfig {
    fn default() -> ChaseConfig {
        ChaseConfig {
            rows: 20,
            cols: 40,
            loop_percent: DEFAULT_LOOP_PERCENT,
            display_width: 1280,
            display_height: 720,
            margin_x: DEFAULT_MARGIN_X,
            margin_y: DEFAULT_MARGIN_Y,
            player_speed: 150.0,
            pursuer_speed: 150.0,
            path_edit_limit: DEFAULT_PATH_EDIT_LIMIT,
            agent_size: 16,
            seed: None,
        }
    }
}

impl ChaseConfig {
    pub fn from_json_str(json: &str) -> Result<ChaseConfig> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<ChaseConfig> {
        let path = path.as_ref();
        let file = File::open(path)
            .chain_err(|| format!("Failed to open config file {}", path.display()))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .chain_err(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// The grid layout these settings describe.
    pub fn layout(&self) -> Result<GridLayout> {
        GridLayout::configure_with_margins(Width(self.display_width),
                                           Height(self.display_height),
                                           RowsCount(self.rows),
                                           ColumnsCount(self.cols),
                                           self.margin_x,
                                           self.margin_y)
    }
}
