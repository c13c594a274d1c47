//! Generation parameters
//!
//! Every field has a default, so a parameter file only needs the values it
//! changes:
//!
//! ```json
//! { "width": 80, "height": 40, "room_count": 9, "seed": 42 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, GenError};

/// Inputs to one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenParams {
    pub width: i32,
    pub height: i32,
    pub room_count: usize,

    /// Room width range, upper bound exclusive
    pub min_room_width: i32,
    pub max_room_width: i32,
    /// Room height range, upper bound exclusive
    pub min_room_height: i32,
    pub max_room_height: i32,

    /// Corridor turn odds, 1 in N
    pub path_dir_change: u32,

    pub seed: u64,

    // Budgets
    pub max_room_attempts: u32,
    pub max_corridor_steps: u32,
    pub max_stalled_iterations: u32,
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            room_count: DEFAULT_ROOM_COUNT,
            min_room_width: MIN_ROOM_WIDTH,
            max_room_width: MAX_ROOM_WIDTH,
            min_room_height: MIN_ROOM_HEIGHT,
            max_room_height: MAX_ROOM_HEIGHT,
            path_dir_change: PATH_DIR_CHANGE,
            seed: 0,
            max_room_attempts: MAX_ROOM_ATTEMPTS,
            max_corridor_steps: MAX_CORRIDOR_STEPS,
            max_stalled_iterations: MAX_STALLED_ITERATIONS,
        }
    }
}

impl GenParams {
    /// Parameters with the default layout and a given seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Check the parameters describe a layout that can be attempted
    ///
    /// Whether the rooms actually fit is only known once placement runs.
    pub fn validate(&self) -> Result<(), GenError> {
        let invalid = |msg: String| Err(GenError::InvalidParams(msg));

        if self.width <= 0 || self.height <= 0 {
            return invalid(format!(
                "grid must be non-empty, got {}x{}",
                self.width, self.height
            ));
        }
        if self.room_count == 0 {
            return invalid("room_count must be at least 1".to_string());
        }
        // A room needs walls on both sides of at least one floor cell
        if self.min_room_width < 3 || self.min_room_height < 3 {
            return invalid(format!(
                "minimum room size must be at least 3x3, got {}x{}",
                self.min_room_width, self.min_room_height
            ));
        }
        if self.min_room_width >= self.max_room_width {
            return invalid(format!(
                "empty room width range {}..{}",
                self.min_room_width, self.max_room_width
            ));
        }
        if self.min_room_height >= self.max_room_height {
            return invalid(format!(
                "empty room height range {}..{}",
                self.min_room_height, self.max_room_height
            ));
        }
        if self.path_dir_change == 0 {
            return invalid("path_dir_change must be at least 1".to_string());
        }
        if self.max_room_attempts == 0
            || self.max_corridor_steps == 0
            || self.max_stalled_iterations == 0
        {
            return invalid("budgets must be at least 1".to_string());
        }
        Ok(())
    }

    /// Parse parameters from JSON, filling missing fields with defaults
    pub fn parse_json(contents: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(contents)?;
        params.validate()?;
        Ok(params)
    }

    /// Load parameters from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_json(&contents)
    }
}
