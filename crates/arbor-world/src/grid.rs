//! Square grid of trees and the per-tick update rule.

use crate::mutation::mutate;
use crate::stats::PopulationStats;
use arbor_core::{
    Cell, Direction, Error, Genome, GridConfig, Position, Result, ATTACK_MULTIPLIER,
    DECAY_PER_TICK, REPRODUCTION_DRAW_MAX, SEED_HEALTH,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use tracing::{debug, instrument, trace};

/// A square, non-wrapping grid of trees.
///
/// Cell state is stored as four dense layers indexed `row * side + col`. A
/// cell is alive iff its base health is positive; empty cells hold zero in
/// every layer.
#[derive(Clone)]
pub struct Grid<R = ChaCha8Rng> {
    side: usize,
    holes_enabled: bool,
    attack: Vec<f64>,
    reproduction: Vec<f64>,
    base_health: Vec<f64>,
    health: Vec<f64>,
    rng: R,
    tick: u64,
    births: u64,
    deaths: u64,
    // Scratch buffers reused across ticks
    pending_births: Vec<(usize, Genome, f64)>,
    health_delta: Vec<f64>,
}

impl Grid<ChaCha8Rng> {
    /// Create an empty grid with an entropy-seeded generator
    pub fn new(side: usize) -> Result<Self> {
        Self::with_rng(side, ChaCha8Rng::from_entropy())
    }

    /// Create an empty grid with a reproducible generator
    pub fn with_seed(side: usize, seed: u64) -> Result<Self> {
        Self::with_rng(side, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create a grid from configuration
    pub fn from_config(config: &GridConfig) -> Result<Self> {
        config.validate()?;

        let mut grid = match config.seed {
            Some(seed) => Self::with_seed(config.side, seed)?,
            None => Self::new(config.side)?,
        };
        grid.set_holes_enabled(config.holes);
        if config.seed_on_start {
            grid.reset();
        }

        Ok(grid)
    }
}

impl<R: Rng> Grid<R> {
    /// Create an empty grid drawing randomness from `rng`
    pub fn with_rng(side: usize, rng: R) -> Result<Self> {
        if side < 1 {
            return Err(Error::InvalidConfiguration(format!(
                "grid side must be at least 1, got {}",
                side
            )));
        }

        let size = side * side;
        Ok(Self {
            side,
            holes_enabled: false,
            attack: vec![0.0; size],
            reproduction: vec![0.0; size],
            base_health: vec![0.0; size],
            health: vec![0.0; size],
            rng,
            tick: 0,
            births: 0,
            deaths: 0,
            pending_births: Vec::new(),
            health_delta: vec![0.0; size],
        })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn holes_enabled(&self) -> bool {
        self.holes_enabled
    }

    pub fn set_holes_enabled(&mut self, enabled: bool) {
        self.holes_enabled = enabled;
    }

    /// Flip the hole obstruction and return the new setting
    pub fn toggle_holes(&mut self) -> bool {
        self.holes_enabled = !self.holes_enabled;
        debug!(holes_enabled = self.holes_enabled, "Toggled holes");
        self.holes_enabled
    }

    /// Whether reproduction into `pos` is blocked while holes are enabled.
    ///
    /// Holes sit on odd rows and odd columns in the upper-left triangle of
    /// the grid (`row + col < side`).
    pub fn is_hole(&self, pos: Position) -> bool {
        pos.row + pos.col < self.side && pos.row % 2 == 1 && pos.col % 2 == 1
    }

    /// Clear the grid and place the starting tree at the origin
    pub fn reset(&mut self) {
        for layer in [
            &mut self.attack,
            &mut self.reproduction,
            &mut self.base_health,
            &mut self.health,
        ] {
            layer.fill(0.0);
        }
        self.tick = 0;
        self.births = 0;
        self.deaths = 0;

        self.write_cell(0, Genome::SEED, SEED_HEALTH);
        debug!(side = self.side, "Grid reset");
    }

    /// Place a tree with the given genome at `pos`, replacing any occupant.
    /// Its health is derived from the genome.
    pub fn plant(&mut self, pos: Position, genome: Genome) -> Result<()> {
        if pos.row >= self.side || pos.col >= self.side {
            return Err(Error::InvalidArgument(format!(
                "position {} is outside a grid of side {}",
                pos, self.side
            )));
        }
        if !genome.is_valid() {
            return Err(Error::InvalidArgument(format!(
                "genome {:?} does not describe a living tree",
                genome
            )));
        }

        let index = self.pos_to_index(pos);
        self.write_cell(index, genome, genome.initial_health());
        Ok(())
    }

    /// Advance the grid by `num_steps` ticks
    #[instrument(level = "debug", skip(self), fields(tick = self.tick))]
    pub fn step(&mut self, num_steps: u32) -> Result<()> {
        if num_steps == 0 {
            return Err(Error::InvalidArgument(
                "step count must be at least 1".to_string(),
            ));
        }

        for _ in 0..num_steps {
            self.advance();
        }

        Ok(())
    }

    fn advance(&mut self) {
        let deaths = self.sweep_dead();

        let directions = Direction::all();
        let direction = directions[self.rng.gen_range(0..directions.len())];
        let births = self.reproduce(direction);

        self.combat();
        self.decay();

        self.tick += 1;
        trace!(
            tick = self.tick,
            ?direction,
            births,
            deaths,
            alive = self.alive_count(),
            "Tick complete"
        );
    }

    /// Clear every cell whose health went negative during the previous tick
    fn sweep_dead(&mut self) -> usize {
        let mut deaths = 0;
        for index in 0..self.health.len() {
            if self.health[index] < 0.0 {
                self.clear_cell(index);
                deaths += 1;
            }
        }
        self.deaths += deaths as u64;
        deaths
    }

    /// Spawn offspring into empty cells whose neighbour in `direction` is alive.
    ///
    /// Every candidate is judged against the grid as it was before this
    /// phase; births are committed together afterwards.
    fn reproduce(&mut self, direction: Direction) -> usize {
        let mut pending = std::mem::take(&mut self.pending_births);
        pending.clear();

        for row in 0..self.side {
            for col in 0..self.side {
                let target = Position::new(row, col);
                let t = self.pos_to_index(target);
                if self.base_health[t] != 0.0 {
                    continue;
                }

                let Some(source) = target.offset(direction, self.side) else {
                    continue;
                };
                let s = self.pos_to_index(source);
                if self.base_health[s] <= 0.0 {
                    continue;
                }

                if self.holes_enabled && self.is_hole(target) {
                    continue;
                }

                let reproduction = self.reproduction[s];
                if self.rng.gen_range(0.0..REPRODUCTION_DRAW_MAX) < reproduction * reproduction {
                    let parent = self.genome_at(s);
                    let (genome, health) = mutate(&parent, &mut self.rng);
                    pending.push((t, genome, health));
                }
            }
        }

        let births = pending.len();
        for &(index, genome, health) in &pending {
            self.write_cell(index, genome, health);
        }
        self.pending_births = pending;
        self.births += births as u64;

        births
    }

    /// Every living tree attacks its four neighbours. Damage from all four
    /// directions is computed against the pre-combat state and applied at once.
    fn combat(&mut self) {
        self.health_delta.fill(0.0);

        for direction in Direction::all() {
            for row in 0..self.side {
                for col in 0..self.side {
                    let attacker = Position::new(row, col);
                    let a = self.pos_to_index(attacker);
                    if self.base_health[a] <= 0.0 {
                        continue;
                    }

                    let Some(defender) = attacker.offset(direction, self.side) else {
                        continue;
                    };
                    let d = self.pos_to_index(defender);
                    if self.base_health[d] <= 0.0 {
                        continue;
                    }

                    let damage = self.attack[a] * ATTACK_MULTIPLIER * self.reproduction[d];
                    self.health_delta[d] -= damage;
                    self.health_delta[a] += damage;
                }
            }
        }

        for (health, delta) in self.health.iter_mut().zip(&self.health_delta) {
            *health += delta;
        }
    }

    fn decay(&mut self) {
        for (health, &base) in self.health.iter_mut().zip(&self.base_health) {
            if base != 0.0 {
                *health -= DECAY_PER_TICK;
            }
        }
    }

    /// Mean reproduction trait over living trees, zero when none are alive
    pub fn average_reproduction(&self) -> f64 {
        let (alive, total) = self
            .base_health
            .iter()
            .zip(&self.reproduction)
            .filter(|(base, _)| **base > 0.0)
            .fold((0usize, 0.0), |(n, sum), (_, &r)| (n + 1, sum + r));

        if alive == 0 {
            0.0
        } else {
            total / alive as f64
        }
    }

    pub fn alive_count(&self) -> usize {
        self.base_health.iter().filter(|&&b| b > 0.0).count()
    }

    /// Ticks applied since construction or the last reset
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn lifetime_births(&self) -> u64 {
        self.births
    }

    pub fn lifetime_deaths(&self) -> u64 {
        self.deaths
    }

    pub fn stats(&self) -> PopulationStats {
        let mut stats = PopulationStats::from_cells(self.cells().map(|(_, cell)| cell));
        stats.tick = self.tick;
        stats.births = self.births;
        stats.deaths = self.deaths;
        stats
    }

    /// Get the cell at a position, `None` when off-grid
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        if pos.row >= self.side || pos.col >= self.side {
            return None;
        }
        Some(self.cell_at(self.pos_to_index(pos)))
    }

    /// Iterator over all cells with positions
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        (0..self.health.len()).map(move |i| (self.index_to_pos(i), self.cell_at(i)))
    }

    pub fn attack(&self) -> &[f64] {
        &self.attack
    }

    pub fn reproduction(&self) -> &[f64] {
        &self.reproduction
    }

    pub fn base_health(&self) -> &[f64] {
        &self.base_health
    }

    pub fn health(&self) -> &[f64] {
        &self.health
    }

    fn genome_at(&self, index: usize) -> Genome {
        Genome::new(
            self.attack[index],
            self.reproduction[index],
            self.base_health[index],
        )
    }

    fn cell_at(&self, index: usize) -> Cell {
        Cell {
            genome: self.genome_at(index),
            health: self.health[index],
        }
    }

    fn write_cell(&mut self, index: usize, genome: Genome, health: f64) {
        self.attack[index] = genome.attack;
        self.reproduction[index] = genome.reproduction;
        self.base_health[index] = genome.base_health;
        self.health[index] = health;
    }

    fn clear_cell(&mut self, index: usize) {
        self.write_cell(index, Genome::EMPTY, 0.0);
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        pos.row * self.side + pos.col
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        Position::new(index / self.side, index % self.side)
    }
}

impl<R: Rng> fmt::Debug for Grid<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("side", &self.side)
            .field("holes_enabled", &self.holes_enabled)
            .field("tick", &self.tick)
            .field("alive", &self.alive_count())
            .finish()
    }
}
