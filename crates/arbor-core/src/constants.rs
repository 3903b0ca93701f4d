//! Fixed numeric parameters of the simulation.
//!
//! These are part of the model itself and deliberately not exposed through
//! configuration.

/// Upper bound (exclusive) of the uniform draw compared against
/// `reproduction²` when deciding whether a parent spawns into an empty cell.
pub const REPRODUCTION_DRAW_MAX: f64 = 5.0;

/// A mutation moves at most this much weight from one trait to another.
pub const MAX_MUTATION_STEP: f64 = 1.0 / 50.0;

/// Damage per unit of `attack × defender.reproduction`.
pub const ATTACK_MULTIPLIER: f64 = 5.0;

/// Health lost by every living cell at the end of each tick.
pub const DECAY_PER_TICK: f64 = 1.0;

/// Scale of the starting-health curve `SCALE / (POLE - base_health) - SCALE`.
pub const HEALTH_SCALE: f64 = 1000.0;

/// Pole of the starting-health curve. Always above the maximum base health of 1.
pub const HEALTH_POLE: f64 = 1.1;

/// Health given to the organism placed by `reset`.
pub const SEED_HEALTH: f64 = 1000.0;

/// Allowed drift of a genome's trait sum away from 1.
pub const GENOME_TOLERANCE: f64 = 1e-9;
