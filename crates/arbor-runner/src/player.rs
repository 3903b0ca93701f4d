//! Frame-by-frame playback of a grid.

use arbor_core::{Result, RunnerConfig};
use arbor_world::Grid;
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Finished,
}

pub struct Player {
    grid: Grid,
    config: RunnerConfig,
    frames: u64,
    resets: u64,
}

impl Player {
    pub fn new(config: RunnerConfig) -> Result<Self> {
        config.validate()?;
        let grid = Grid::from_config(&config.grid)?;

        info!(
            side = grid.side(),
            holes = grid.holes_enabled(),
            steps_per_frame = config.steps_per_frame,
            max_frames = ?config.max_frames,
            "Player ready"
        );

        Ok(Self {
            grid,
            config,
            frames: 0,
            resets: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn resets(&self) -> u64 {
        self.resets
    }

    /// Advance the grid by one frame of `steps_per_frame` ticks
    pub fn play_frame(&mut self) -> Result<FrameOutcome> {
        let started = Instant::now();
        self.grid.step(self.config.steps_per_frame)?;
        self.frames += 1;

        debug!(
            frame = self.frames,
            tick = self.grid.ticks(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            average_reproduction = self.grid.average_reproduction(),
            "Frame complete"
        );

        if self.frames % self.config.stats_every == 0 {
            self.grid.stats().emit();
        }

        if self.config.reset_on_extinction && self.grid.alive_count() == 0 {
            warn!(
                frame = self.frames,
                tick = self.grid.ticks(),
                deaths = self.grid.lifetime_deaths(),
                "All trees died, resetting grid"
            );
            self.grid.reset();
            self.resets += 1;
        }

        match self.config.max_frames {
            Some(max) if self.frames >= max => Ok(FrameOutcome::Finished),
            _ => Ok(FrameOutcome::Continue),
        }
    }

    pub fn emit_summary(&self) {
        let stats = self.grid.stats();
        info!(
            event = "run_summary",
            frames = self.frames,
            resets = self.resets,
            tick = stats.tick,
            alive = stats.alive,
            births = stats.births,
            deaths = stats.deaths,
            average_reproduction = stats.mean_reproduction,
            "Run complete"
        );
    }
}
