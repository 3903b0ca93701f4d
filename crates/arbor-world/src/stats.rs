//! Population statistics over the living trees of a grid.

use arbor_core::Cell;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Aggregate view of the living trees at a tick boundary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    /// Ticks applied since the last reset
    pub tick: u64,
    /// Number of living trees
    pub alive: usize,
    /// Trees born since the last reset
    pub births: u64,
    /// Trees that died since the last reset
    pub deaths: u64,
    pub mean_attack: f64,
    pub mean_reproduction: f64,
    pub mean_base_health: f64,
    pub mean_health: f64,
    pub max_health: f64,
}

impl PopulationStats {
    /// Collect statistics from the cells of a grid. Dead cells are ignored;
    /// every mean is zero when nothing is alive.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut stats = Self::default();
        let mut max_health = f64::NEG_INFINITY;

        for cell in cells.into_iter().filter(|c| c.is_alive()) {
            stats.alive += 1;
            stats.mean_attack += cell.genome.attack;
            stats.mean_reproduction += cell.genome.reproduction;
            stats.mean_base_health += cell.genome.base_health;
            stats.mean_health += cell.health;
            max_health = max_health.max(cell.health);
        }

        if stats.alive > 0 {
            let n = stats.alive as f64;
            stats.mean_attack /= n;
            stats.mean_reproduction /= n;
            stats.mean_base_health /= n;
            stats.mean_health /= n;
            stats.max_health = max_health;
        }

        stats
    }

    /// Log the statistics as a structured record
    pub fn emit(&self) {
        info!(
            event = "population_stats",
            tick = self.tick,
            alive = self.alive,
            births = self.births,
            deaths = self.deaths,
            mean_attack = self.mean_attack,
            mean_reproduction = self.mean_reproduction,
            mean_base_health = self.mean_base_health,
            mean_health = self.mean_health,
            max_health = self.max_health,
            "Population statistics"
        );
    }
}
