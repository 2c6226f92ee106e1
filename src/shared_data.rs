// src/shared_data.rs

use crate::simulation_engine::simulation::Termination;
use serde::{Deserialize, Serialize};

/// Summary of one generation's episode, logged to CSV and reported on stdout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: u32,
    pub population: usize,
    pub ticks: u64,
    pub survivors: usize,
    pub termination: Termination,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub worst_fitness: f64,
}

impl GenerationStats {
    pub fn from_fitness(
        generation: u32,
        ticks: u64,
        survivors: usize,
        termination: Termination,
        fitness: &[f64],
    ) -> Self {
        let best_fitness = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst_fitness = fitness.iter().copied().fold(f64::INFINITY, f64::min);
        let mean_fitness = if fitness.is_empty() {
            0.0
        } else {
            fitness.iter().sum::<f64>() / fitness.len() as f64
        };
        Self {
            generation,
            population: fitness.len(),
            ticks,
            survivors,
            termination,
            best_fitness: if fitness.is_empty() { 0.0 } else { best_fitness },
            mean_fitness,
            worst_fitness: if fitness.is_empty() { 0.0 } else { worst_fitness },
        }
    }
}
