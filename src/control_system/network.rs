//! Fixed-topology feed-forward network used as a learned driving policy.

use crate::control_system::policy::Policy;
use crate::error::{Result, SimError};
use crate::simulation_engine::movement::Action;
use serde::{Deserialize, Serialize};

/// Layer sizes of a single-hidden-layer network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkShape {
    pub inputs: usize,
    pub hidden: usize,
    pub outputs: usize,
}

impl NetworkShape {
    pub fn new(inputs: usize, hidden: usize) -> Self {
        Self {
            inputs,
            hidden,
            outputs: Action::ALL.len(),
        }
    }

    /// Weights plus one bias per neuron.
    pub fn parameter_count(&self) -> usize {
        (self.inputs + 1) * self.hidden + (self.hidden + 1) * self.outputs
    }
}

/// Tanh hidden layer, linear outputs. Weights are stored per neuron, bias last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedForwardNetwork {
    shape: NetworkShape,
    weights: Vec<f64>,
}

impl FeedForwardNetwork {
    pub fn from_weights(shape: NetworkShape, weights: Vec<f64>) -> Result<Self> {
        if weights.len() != shape.parameter_count() {
            return Err(SimError::InvalidConfig(format!(
                "network {:?} needs {} weights, got {}",
                shape,
                shape.parameter_count(),
                weights.len()
            )));
        }
        Ok(Self { shape, weights })
    }

    pub fn shape(&self) -> NetworkShape {
        self.shape
    }

    /// Runs the network. Missing inputs read as zero, extra inputs are ignored.
    pub fn activate(&self, inputs: &[f64]) -> Vec<f64> {
        let NetworkShape {
            inputs: n_in,
            hidden,
            outputs,
        } = self.shape;
        let (hidden_weights, output_weights) = self.weights.split_at((n_in + 1) * hidden);

        let hidden_values: Vec<f64> = hidden_weights
            .chunks_exact(n_in + 1)
            .map(|neuron| {
                let sum: f64 = (0..n_in)
                    .map(|i| neuron[i] * inputs.get(i).copied().unwrap_or(0.0))
                    .sum();
                (sum + neuron[n_in]).tanh()
            })
            .collect();

        output_weights
            .chunks_exact(hidden + 1)
            .take(outputs)
            .map(|neuron| {
                let sum: f64 = neuron[..hidden]
                    .iter()
                    .zip(&hidden_values)
                    .map(|(w, h)| w * h)
                    .sum();
                sum + neuron[hidden]
            })
            .collect()
    }
}

/// Index of the first largest value.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &value) in values.iter().enumerate() {
        if value > values[best] {
            best = i;
        }
    }
    best
}

impl Policy for FeedForwardNetwork {
    fn choose_action(&mut self, observation: &[f64]) -> Action {
        Action::from_index(argmax(&self.activate(observation)))
    }
}
