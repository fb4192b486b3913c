//! Fitness proportionate ("roulette wheel") parent selection.
//!
//! The wheel is built from the attack count of each individual as is, without inverting it.
//! Boards with more attacking pairs therefore get a proportionally larger slice of the wheel,
//! the opposite of what a minimizing search would normally want. This reproduces the classic
//! formulation of this solver; elitism keeps the best board alive regardless of how rarely it
//! gets picked as a parent.

use crate::evolution::queens::Queens;
use rand::Rng;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Need at least two candidates to pick distinct parents, got {0}")]
    NotEnoughCandidates(usize),
    #[error("Total fitness of the population is zero, the wheel has no slices")]
    ZeroTotalFitness,
    #[error("Every spin lands on candidate {0}, distinct parents cannot be drawn")]
    SingleCandidate(usize),
}

/// Indices of the two parents picked for one breeding round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentPair {
    pub first: usize,
    pub second: usize,
}

/// Cumulative fitness of a population, built once per generation.
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    cumulative: Vec<u32>,
}

impl RouletteWheel {
    /// Builds the wheel over `population`.
    ///
    /// # Errors
    /// Refuses populations from which two distinct indices can never be drawn: fewer than two
    /// members, zero total fitness, or weights such that every spin resolves to the same index.
    pub fn new(population: &[Queens]) -> Result<Self, SelectionError> {
        if population.len() < 2 {
            return Err(SelectionError::NotEnoughCandidates(population.len()));
        }

        let cumulative: Vec<u32> = population
            .iter()
            .scan(0u32, |sum, queens| {
                *sum += queens.fitness();
                Some(*sum)
            })
            .collect();

        let wheel = Self { cumulative };
        let total = wheel.total();
        if total == 0 {
            return Err(SelectionError::ZeroTotalFitness);
        }

        // Spin results are monotonic in the draw, so comparing the two extremes is enough
        let lowest = wheel.resolve(0);
        if lowest == wheel.resolve(total - 1) {
            return Err(SelectionError::SingleCandidate(lowest));
        }
        Ok(wheel)
    }

    pub fn total(&self) -> u32 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// First index whose running total reaches `draw`.
    fn resolve(&self, draw: u32) -> usize {
        self.cumulative
            .partition_point(|&sum| sum < draw)
            .min(self.cumulative.len() - 1)
    }

    /// Draws a uniform integer in `0..total` and resolves it to a candidate index.
    pub fn spin(&self, rng: &mut impl Rng) -> usize {
        let draw = rng.random_range(0..self.total());
        self.resolve(draw)
    }

    /// Spins once for each parent, re-spinning the second until it differs from the first.
    pub fn select_parents(&self, rng: &mut impl Rng) -> ParentPair {
        let first = self.spin(rng);
        let mut second = self.spin(rng);
        while second == first {
            second = self.spin(rng);
        }
        ParentPair { first, second }
    }
}

/// One-shot selection over `population`, building a throwaway wheel.
pub fn select_parents(
    population: &[Queens],
    rng: &mut impl Rng,
) -> Result<ParentPair, SelectionError> {
    Ok(RouletteWheel::new(population)?.select_parents(rng))
}
