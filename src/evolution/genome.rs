use crate::control_system::network::{FeedForwardNetwork, NetworkShape};
use crate::error::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};

const INITIAL_WEIGHT_RANGE: f64 = 1.0;
const WEIGHT_LIMIT: f64 = 30.0;

/// Flat network weights plus the fitness earned in the last episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub weights: Vec<f64>,
    pub fitness: f64,
}

impl Genome {
    pub fn random<R: Rng + ?Sized>(shape: &NetworkShape, rng: &mut R) -> Self {
        let weights = (0..shape.parameter_count())
            .map(|_| rng.random_range(-INITIAL_WEIGHT_RANGE..INITIAL_WEIGHT_RANGE))
            .collect();
        Self {
            weights,
            fitness: 0.0,
        }
    }

    pub fn network(&self, shape: NetworkShape) -> Result<FeedForwardNetwork> {
        FeedForwardNetwork::from_weights(shape, self.weights.clone())
    }

    /// Uniform crossover: each weight comes from either parent with equal odds.
    pub fn crossover<R: Rng + ?Sized>(&self, other: &Genome, rng: &mut R) -> Genome {
        let weights = self
            .weights
            .iter()
            .zip(&other.weights)
            .map(|(&a, &b)| if rng.random_bool(0.5) { a } else { b })
            .collect();
        Genome {
            weights,
            fitness: 0.0,
        }
    }

    /// Perturbs each weight with probability `rate` by up to `strength`, clamped to a sane range.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f64, strength: f64, rng: &mut R) {
        for weight in &mut self.weights {
            if rng.random_bool(rate) {
                *weight = (*weight + rng.random_range(-strength..=strength))
                    .clamp(-WEIGHT_LIMIT, WEIGHT_LIMIT);
            }
        }
    }
}
