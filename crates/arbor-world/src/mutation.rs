//! Mutation operator for tree genomes.

use arbor_core::{Genome, Trait, MAX_MUTATION_STEP};
use rand::Rng;

/// Produce a child genome and its starting health from a parent genome.
///
/// A small amount of weight moves from one randomly chosen trait to another
/// (possibly the same one), which keeps the trait sum unchanged. When the
/// losing trait cannot afford the step the child is an exact clone.
pub fn mutate<R: Rng + ?Sized>(parent: &Genome, rng: &mut R) -> (Genome, f64) {
    let mut child = *parent;

    let loss = Trait::ALL[rng.gen_range(0..Trait::ALL.len())];
    let gain = Trait::ALL[rng.gen_range(0..Trait::ALL.len())];
    let step = rng.gen::<f64>() * MAX_MUTATION_STEP;

    if child.get(loss) - step > 0.0 {
        *child.get_mut(loss) -= step;
        *child.get_mut(gain) += step;
    }

    let health = child.initial_health();
    (child, health)
}
