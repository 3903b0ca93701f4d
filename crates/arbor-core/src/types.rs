//! Core type definitions for the simulation.

use crate::constants::{GENOME_TOLERANCE, HEALTH_POLE, HEALTH_SCALE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell coordinates on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbour one step in `direction`, or `None` when it falls off a
    /// grid of the given side. The grid does not wrap.
    pub fn offset(&self, direction: Direction, side: usize) -> Option<Self> {
        let (dr, dc) = direction.to_delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < side && col < side).then(|| Self::new(row, col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four axis directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// +row
    Down,
    /// -row
    Up,
    /// +col
    Right,
    /// -col
    Left,
}

impl Direction {
    /// `(row, col)` delta
    pub fn to_delta(&self) -> (isize, isize) {
        match self {
            Direction::Down => (1, 0),
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
        }
    }

    pub fn all() -> [Direction; 4] {
        [
            Direction::Down,
            Direction::Up,
            Direction::Right,
            Direction::Left,
        ]
    }
}

/// The three heritable traits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trait {
    Attack,
    Reproduction,
    BaseHealth,
}

impl Trait {
    pub const ALL: [Trait; 3] = [Trait::Attack, Trait::Reproduction, Trait::BaseHealth];
}

/// Heritable traits of a tree. For a living tree the three weights sum to one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub attack: f64,
    pub reproduction: f64,
    pub base_health: f64,
}

impl Genome {
    /// Genome of the organism placed by a grid reset.
    pub const SEED: Genome = Genome {
        attack: 0.0,
        reproduction: 0.5,
        base_health: 0.5,
    };

    pub const EMPTY: Genome = Genome {
        attack: 0.0,
        reproduction: 0.0,
        base_health: 0.0,
    };

    pub fn new(attack: f64, reproduction: f64, base_health: f64) -> Self {
        Self {
            attack,
            reproduction,
            base_health,
        }
    }

    pub fn get(&self, t: Trait) -> f64 {
        match t {
            Trait::Attack => self.attack,
            Trait::Reproduction => self.reproduction,
            Trait::BaseHealth => self.base_health,
        }
    }

    pub fn get_mut(&mut self, t: Trait) -> &mut f64 {
        match t {
            Trait::Attack => &mut self.attack,
            Trait::Reproduction => &mut self.reproduction,
            Trait::BaseHealth => &mut self.base_health,
        }
    }

    pub fn sum(&self) -> f64 {
        self.attack + self.reproduction + self.base_health
    }

    /// A genome a living tree may carry: no negative trait, positive base
    /// health and a sum of one.
    pub fn is_valid(&self) -> bool {
        Trait::ALL.iter().all(|&t| self.get(t) >= 0.0)
            && self.base_health > 0.0
            && (self.sum() - 1.0).abs() <= GENOME_TOLERANCE
    }

    /// Starting health of a tree born with this genome.
    ///
    /// Grows steeply with `base_health`; finite for every valid genome since
    /// `base_health <= 1 < HEALTH_POLE`.
    pub fn initial_health(&self) -> f64 {
        HEALTH_SCALE / (HEALTH_POLE - self.base_health) - HEALTH_SCALE
    }
}

/// Read-only view of one grid cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub genome: Genome,
    pub health: f64,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        genome: Genome::EMPTY,
        health: 0.0,
    };

    pub fn is_alive(&self) -> bool {
        self.genome.base_health > 0.0
    }

    /// Whether a renderer should draw this cell rather than background.
    pub fn is_rendered(&self) -> bool {
        self.is_alive() && self.health > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_offset() {
        let pos = Position::new(0, 0);
        assert_eq!(pos.offset(Direction::Down, 3), Some(Position::new(1, 0)));
        assert_eq!(pos.offset(Direction::Right, 3), Some(Position::new(0, 1)));
        assert_eq!(pos.offset(Direction::Up, 3), None);
        assert_eq!(pos.offset(Direction::Left, 3), None);

        let corner = Position::new(2, 2);
        assert_eq!(corner.offset(Direction::Down, 3), None);
        assert_eq!(corner.offset(Direction::Right, 3), None);
        assert_eq!(corner.offset(Direction::Up, 3), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_position_offset_single_cell_grid() {
        let pos = Position::new(0, 0);
        for direction in Direction::all() {
            assert_eq!(pos.offset(direction, 1), None);
        }
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Down.to_delta(), (1, 0));
        assert_eq!(Direction::Up.to_delta(), (-1, 0));
        assert_eq!(Direction::Right.to_delta(), (0, 1));
        assert_eq!(Direction::Left.to_delta(), (0, -1));
    }

    #[test]
    fn test_genome_trait_access() {
        let mut genome = Genome::new(0.2, 0.3, 0.5);
        assert_eq!(genome.get(Trait::Attack), 0.2);
        assert_eq!(genome.get(Trait::Reproduction), 0.3);
        assert_eq!(genome.get(Trait::BaseHealth), 0.5);

        *genome.get_mut(Trait::Attack) += 0.1;
        assert!((genome.attack - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_genome_validity() {
        assert!(Genome::SEED.is_valid());
        assert!(Genome::new(0.0, 0.0, 1.0).is_valid());
        assert!(!Genome::EMPTY.is_valid());
        assert!(!Genome::new(0.5, 0.5, 0.0).is_valid());
        assert!(!Genome::new(-0.1, 0.6, 0.5).is_valid());
        assert!(!Genome::new(0.2, 0.2, 0.2).is_valid());
    }

    #[test]
    fn test_initial_health() {
        let health = Genome::SEED.initial_health();
        assert!((health - (1000.0 / 0.6 - 1000.0)).abs() < 1e-9);

        // Steeper than linear in base health
        let low = Genome::new(0.5, 0.4, 0.1).initial_health();
        let high = Genome::new(0.0, 0.0, 1.0).initial_health();
        assert!(low.abs() < 1e-9);
        assert!((high - 9000.0).abs() < 1e-6);
    }

    #[test]
    fn test_cell_liveness() {
        assert!(!Cell::EMPTY.is_alive());
        assert!(!Cell::EMPTY.is_rendered());

        let dying = Cell {
            genome: Genome::SEED,
            health: -3.0,
        };
        assert!(dying.is_alive());
        assert!(!dying.is_rendered());
    }
}
