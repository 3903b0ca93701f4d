//! Configuration types for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Largest number of ticks a single frame may request
pub const MAX_STEPS_PER_FRAME: u32 = 100;

/// Grid configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Side length of the square grid
    pub side: usize,
    /// Start with the hole obstruction enabled
    pub holes: bool,
    /// Random seed; entropy-seeded when absent
    pub seed: Option<u64>,
    /// Place the starting organism right after construction
    pub seed_on_start: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            side: 45,
            holes: false,
            seed: None,
            seed_on_start: true,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<()> {
        if self.side < 1 {
            return Err(Error::InvalidConfiguration(format!(
                "grid side must be at least 1, got {}",
                self.side
            )));
        }
        Ok(())
    }
}

/// Runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Grid configuration
    pub grid: GridConfig,
    /// Ticks applied per frame (1 to 100)
    pub steps_per_frame: u32,
    /// Delay between frames (milliseconds)
    pub frame_interval_ms: u64,
    /// Stop after this many frames; run until interrupted when absent
    pub max_frames: Option<u64>,
    /// Emit population statistics every N frames
    pub stats_every: u64,
    /// Re-seed the grid when every tree has died
    pub reset_on_extinction: bool,
    /// Log as JSON lines instead of human-readable text
    pub log_json: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            steps_per_frame: 1,
            frame_interval_ms: 50,
            max_frames: None,
            stats_every: 20,
            reset_on_extinction: false,
            log_json: false,
        }
    }
}

impl RunnerConfig {
    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: RunnerConfig = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), "Loaded runner configuration");
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;

        if !(1..=MAX_STEPS_PER_FRAME).contains(&self.steps_per_frame) {
            return Err(Error::InvalidConfiguration(format!(
                "steps_per_frame must be between 1 and {}, got {}",
                MAX_STEPS_PER_FRAME, self.steps_per_frame
            )));
        }

        if self.stats_every == 0 {
            return Err(Error::InvalidConfiguration(
                "stats_every must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
