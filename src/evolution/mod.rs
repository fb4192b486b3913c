pub mod population;
pub mod queens;
pub mod selection;

use crate::config::GaConfig;
use crate::evolution::population::Population;
use crate::evolution::queens::{MutationSite, Offspring, Queens};
use crate::evolution::selection::{ParentPair, RouletteWheel, SelectionError};
use log::{debug, info, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EvolutionError {
    #[error("Parent selection failed: {0}")]
    Selection(#[from] SelectionError),
    #[error("Population is empty, there is no best individual")]
    EmptyPopulation,
}

/// What a single run hands back to its caller.
///
/// Whether the run was solved or simply ran out of generations can only be told from the
/// fitness of `best`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    /// Best board of the last generation
    pub best: Queens,
    /// Number of generations bred before the loop stopped
    pub generations: u32,
}

impl RunResult {
    pub fn fitness(&self) -> u32 {
        self.best.fitness()
    }

    pub fn is_solution(&self) -> bool {
        self.best.is_solution()
    }
}

/// Rolls a uniform integer in `1..=100` and compares it to a percentage.
fn roll_percent(rng: &mut impl Rng, rate: u32) -> bool {
    rng.random_range(1..=100) <= rate
}

/// Drives the generation loop of one run.
///
/// The engine owns its random source, so two engines built from equally seeded generators
/// evolve identical populations.
pub struct EvolutionEngine<'a, R: Rng> {
    /// This is a reference to the user-defined config for a given evolution run
    config: &'a GaConfig,
    /// Every random draw of the run comes from here
    rng: R,
    /// The current generation, replaced wholesale by `breed_next_generation`
    population: Population,
}

impl<'a, R: Rng> EvolutionEngine<'a, R> {
    /// Creates a new EvolutionEngine instance
    ///
    /// # Arguments
    /// * `config` - Reference to a `GaConfig` struct containing all the parameters required for the evolution.
    /// * `rng` - The random source, seeded or not, that this engine will draw from
    ///
    /// # Returns
    /// * `Self` - An engine with an empty population
    pub fn new(config: &'a GaConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            population: Population::new(config.population_size),
        }
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Replaces the population with `population_size` random boards.
    pub fn initialize_population(&mut self) {
        self.population = Population::random(self.config.population_size, &mut self.rng);
    }

    /// Current best board, the first one found with the minimum attack count.
    pub fn best(&self) -> Result<Queens, EvolutionError> {
        self.population
            .best()
            .copied()
            .ok_or(EvolutionError::EmptyPopulation)
    }

    /// Breeds one generation from the current one.
    ///
    /// The best board is carried over unchanged, the remaining slots are filled with
    /// children of roulette-selected parents drawn from the current generation. A second
    /// child that no longer fits is dropped.
    ///
    /// # Errors
    /// `EvolutionError::Selection` when the current population cannot yield two distinct
    /// parents, which the run loop avoids by stopping as soon as a solution exists.
    pub fn breed_next_generation(&mut self) -> Result<(), EvolutionError> {
        let elite = self.best()?;
        let wheel = RouletteWheel::new(self.population.members())?;
        let mut next_generation = Population::with_elite(elite, self.config.population_size);

        while !next_generation.is_full() {
            let ParentPair { first, second } = wheel.select_parents(&mut self.rng);
            let parent1 = self.population.members()[first];
            let parent2 = self.population.members()[second];

            let Offspring {
                first: mut child1,
                second: mut child2,
            } = if roll_percent(&mut self.rng, self.config.crossover_rate) {
                parent1.crossover(&parent2, &mut self.rng)
            } else {
                Offspring {
                    first: parent1,
                    second: parent2,
                }
            };

            for child in [&mut child1, &mut child2] {
                if roll_percent(&mut self.rng, self.config.mutation_rate) {
                    let MutationSite { column, bit } = child.mutate(&mut self.rng);
                    trace!("Mutated column {} bit {}", column, bit);
                }
            }

            next_generation.admit(child1);
            next_generation.admit(child2);
        }

        self.population = next_generation;
        Ok(())
    }

    /// Runs the evolution process from a fresh random population
    ///
    /// Stops once the best board has no attacks or `max_generations` generations have been
    /// bred. The termination check always runs before selection, so the roulette wheel is
    /// never built over an already solved population by this loop.
    ///
    /// # Returns
    /// * `Result<RunResult, EvolutionError>` - the best board and the generation count
    pub fn run(&mut self) -> Result<RunResult, EvolutionError> {
        self.initialize_population();
        let mut best = self.best()?;
        let mut generation = 0;

        while generation < self.config.max_generations && best.fitness() > 0 {
            self.breed_next_generation()?;
            best = self.best()?;
            generation += 1;

            debug!("Gen {}: Best Fitness={}", generation, best.fitness());
            trace!(
                "Gen {}: Population Fitness={:?}",
                generation,
                self.population.fitnesses()
            );
        }

        info!(
            "Run stopped at generation {} with best fitness {}",
            generation,
            best.fitness()
        );
        debug!("Best board:\n{}", best);

        Ok(RunResult {
            best,
            generations: generation,
        })
    }
}

/// Runs the engine once with the given random source.
pub fn run_once<R: Rng>(config: &GaConfig, rng: R) -> Result<RunResult, EvolutionError> {
    EvolutionEngine::new(config, rng).run()
}
