//! Neuroevolution driver standing in for the external optimizer.
//!
//! Each generation turns every genome into a [`FeedForwardNetwork`], runs one
//! episode with all of them on the same track, credits the accumulated fitness
//! back to the genomes and breeds the next generation (elitism, tournament
//! selection, uniform crossover, uniform mutation). A fixed seed makes whole
//! runs reproducible.

pub mod genome;

pub use genome::Genome;

use crate::control_system::network::{FeedForwardNetwork, NetworkShape};
use crate::error::{Result, SimError};
use crate::shared_data::GenerationStats;
use crate::simulation_engine::simulation::{EpisodeBudget, EpisodeState, Observer, VehicleBatch};
use crate::simulation_engine::track::TrackSurface;
use crate::simulation_engine::vehicles::VehicleSpec;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population: usize,
    pub hidden_neurons: usize,
    pub elites: usize,
    pub tournament_size: usize,
    pub mutation_rate: f64,
    pub mutation_strength: f64,
    pub seed: u64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population: 30,
            hidden_neurons: 6,
            elites: 3,
            tournament_size: 3,
            mutation_rate: 0.2,
            mutation_strength: 0.5,
            seed: 42,
        }
    }
}

impl EvolutionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.population == 0 {
            return Err(SimError::InvalidConfig(
                "population must hold at least one genome".to_string(),
            ));
        }
        if self.elites > self.population {
            return Err(SimError::InvalidConfig(format!(
                "{} elites do not fit in a population of {}",
                self.elites, self.population
            )));
        }
        if self.hidden_neurons == 0 || self.tournament_size == 0 {
            return Err(SimError::InvalidConfig(
                "hidden neurons and tournament size must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SimError::InvalidConfig(format!(
                "mutation rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if !(self.mutation_strength >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "mutation strength must not be negative, got {}",
                self.mutation_strength
            )));
        }
        Ok(())
    }
}

pub struct Population {
    config: EvolutionConfig,
    shape: NetworkShape,
    genomes: Vec<Genome>,
    champion: Option<Genome>,
    generation: u32,
    rng: SmallRng,
}

impl Population {
    /// Random initial population for networks reading `sensor_count` inputs.
    pub fn new(config: EvolutionConfig, sensor_count: usize) -> Result<Self> {
        config.validate()?;
        let shape = NetworkShape::new(sensor_count, config.hidden_neurons);
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let genomes = (0..config.population)
            .map(|_| Genome::random(&shape, &mut rng))
            .collect();
        Ok(Self {
            config,
            shape,
            genomes,
            champion: None,
            generation: 0,
            rng,
        })
    }

    /// Runs one episode for the current genomes, then breeds the next generation.
    pub fn run_generation(
        &mut self,
        track: &dyn TrackSurface,
        spec: &VehicleSpec,
        budget: &EpisodeBudget,
        parallel: bool,
        observer: Option<&mut dyn Observer>,
    ) -> Result<GenerationStats> {
        if spec.radar.sensor_count() != self.shape.inputs {
            return Err(SimError::InvalidConfig(format!(
                "networks expect {} sensors, vehicles carry {}",
                self.shape.inputs,
                spec.radar.sensor_count()
            )));
        }
        self.generation += 1;

        let networks = self
            .genomes
            .iter()
            .map(|genome| genome.network(self.shape))
            .collect::<Result<Vec<FeedForwardNetwork>>>()?;
        let batch = VehicleBatch::spawn(networks.len(), spec)?;
        let mut episode = EpisodeState::new(batch, networks)?.with_parallel(parallel);
        let summary = episode.run(track, budget, observer)?;

        for (genome, &fitness) in self.genomes.iter_mut().zip(&summary.fitness) {
            genome.fitness = fitness;
        }
        if let Some(best) = self.ranked().first().map(|&i| self.genomes[i].clone()) {
            let improved = self
                .champion
                .as_ref()
                .map_or(true, |champion| best.fitness > champion.fitness);
            if improved {
                self.champion = Some(best);
            }
        }

        let stats = GenerationStats::from_fitness(
            self.generation,
            summary.ticks,
            summary.num_alive,
            summary.termination,
            &summary.fitness,
        );
        log::info!(
            "Generation {}: best {:.1}, mean {:.1}, {} of {} alive after {} ticks ({:?})",
            stats.generation,
            stats.best_fitness,
            stats.mean_fitness,
            stats.survivors,
            stats.population,
            stats.ticks,
            stats.termination
        );

        self.breed();
        Ok(stats)
    }

    /// Genome indices sorted by fitness, best first.
    fn ranked(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.genomes.len()).collect();
        order.sort_by(|&a, &b| {
            self.genomes[b]
                .fitness
                .partial_cmp(&self.genomes[a].fitness)
                .unwrap_or(Ordering::Equal)
        });
        order
    }

    fn tournament(&mut self) -> usize {
        let mut best = self.rng.random_range(0..self.genomes.len());
        for _ in 1..self.config.tournament_size {
            let candidate = self.rng.random_range(0..self.genomes.len());
            if self.genomes[candidate].fitness > self.genomes[best].fitness {
                best = candidate;
            }
        }
        best
    }

    fn breed(&mut self) {
        let mut next: Vec<Genome> = self
            .ranked()
            .into_iter()
            .take(self.config.elites)
            .map(|i| self.genomes[i].clone())
            .collect();

        while next.len() < self.config.population {
            let a = self.tournament();
            let b = self.tournament();
            let mut child = self.genomes[a].crossover(&self.genomes[b], &mut self.rng);
            child.mutate(
                self.config.mutation_rate,
                self.config.mutation_strength,
                &mut self.rng,
            );
            next.push(child);
        }
        self.genomes = next;
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    /// Highest-fitness genome seen so far.
    pub fn champion(&self) -> Option<&Genome> {
        self.champion.as_ref()
    }

    pub fn shape(&self) -> NetworkShape {
        self.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation_engine::track::{Color, RasterTrack};

    fn arena() -> RasterTrack {
        RasterTrack::bordered(900, 900, 8, Color(0, 0, 0), Color(240, 240, 240)).unwrap()
    }

    fn spec() -> VehicleSpec {
        VehicleSpec {
            start_x: 420.0,
            start_y: 435.0,
            ..VehicleSpec::default()
        }
    }

    fn config() -> EvolutionConfig {
        EvolutionConfig {
            population: 8,
            elites: 2,
            ..EvolutionConfig::default()
        }
    }

    #[test]
    fn rejects_more_elites_than_genomes() {
        let config = EvolutionConfig {
            population: 2,
            elites: 3,
            ..EvolutionConfig::default()
        };
        assert!(Population::new(config, 5).is_err());
    }

    #[test]
    fn generation_keeps_population_size_and_records_champion() {
        let track = arena();
        let budget = EpisodeBudget {
            max_ticks: 40,
            wall_clock_secs: None,
        };
        let mut population = Population::new(config(), 5).unwrap();
        let stats = population
            .run_generation(&track, &spec(), &budget, false, None)
            .unwrap();

        assert_eq!(stats.generation, 1);
        assert_eq!(stats.population, 8);
        assert!(stats.best_fitness >= stats.mean_fitness);
        assert_eq!(population.genomes().len(), 8);
        assert_eq!(
            population.champion().map(|g| g.fitness),
            Some(stats.best_fitness)
        );
    }

    #[test]
    fn same_seed_same_history() {
        let track = arena();
        let budget = EpisodeBudget {
            max_ticks: 30,
            wall_clock_secs: None,
        };
        let run = || {
            let mut population = Population::new(config(), 5).unwrap();
            (0..3)
                .map(|_| {
                    population
                        .run_generation(&track, &spec(), &budget, false, None)
                        .unwrap()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn sensor_count_must_match_network_inputs() {
        let track = arena();
        let mut population = Population::new(config(), 3).unwrap();
        let result =
            population.run_generation(&track, &spec(), &EpisodeBudget::default(), false, None);
        assert!(matches!(result, Err(SimError::InvalidConfig(_))));
    }
}
