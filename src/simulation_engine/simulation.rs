// simulation.rs
use crate::control_system::policy::Policy;
use crate::error::{Result, SimError};
use crate::global_variables::DEFAULT_MAX_TICKS;
use crate::simulation_engine::movement::Action;
use crate::simulation_engine::track::TrackSurface;
use crate::simulation_engine::vehicles::{Vehicle, VehicleSpec};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Outcome of one batch tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// `updated[i]` is true when vehicle `i` was alive at the start of the tick.
    pub updated: Vec<bool>,
    pub num_alive: usize,
}

/// Read-only view of the simulation after every tick (rendering, progress reporting).
pub trait Observer {
    fn on_tick(&mut self, tick: u64, vehicles: &[Vehicle], num_alive: usize);
}

/// A set of vehicles advanced together, one action per vehicle per tick.
#[derive(Debug, Clone, Default)]
pub struct VehicleBatch {
    vehicles: Vec<Vehicle>,
}

impl VehicleBatch {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }

    /// Spawns `count` identical vehicles from `spec`, numbered from 0.
    pub fn spawn(count: usize, spec: &VehicleSpec) -> Result<Self> {
        let vehicles = (0..count)
            .map(|id| Vehicle::new(id, spec))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { vehicles })
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn num_alive(&self) -> usize {
        self.vehicles.iter().filter(|v| v.is_alive()).count()
    }

    pub fn observations(&self) -> Vec<Vec<f64>> {
        self.vehicles.iter().map(Vehicle::observation).collect()
    }

    /// Applies `actions[i]` to every vehicle that is still alive, in index order.
    /// Dead vehicles are skipped. On error, vehicles before the failing one keep their update.
    pub fn tick(&mut self, actions: &[Action], track: &dyn TrackSurface) -> Result<TickReport> {
        self.check_actions(actions)?;
        let mut updated = Vec::with_capacity(self.vehicles.len());
        for (vehicle, &action) in self.vehicles.iter_mut().zip(actions) {
            if vehicle.is_alive() {
                vehicle.update(action, track)?;
                updated.push(true);
            } else {
                updated.push(false);
            }
        }
        Ok(self.report(updated))
    }

    /// Same contract as [`VehicleBatch::tick`], with vehicles updated in parallel.
    ///
    /// Updates run on copies; they are committed in index order and the commit
    /// stops at the first failing vehicle, so an error leaves exactly the same
    /// batch state as the sequential tick.
    pub fn tick_parallel(
        &mut self,
        actions: &[Action],
        track: &dyn TrackSurface,
    ) -> Result<TickReport> {
        self.check_actions(actions)?;
        let outcomes: Vec<Result<Option<Vehicle>>> = self
            .vehicles
            .par_iter()
            .zip(actions.par_iter())
            .map(|(vehicle, &action)| {
                if !vehicle.is_alive() {
                    return Ok(None);
                }
                let mut next = vehicle.clone();
                next.update(action, track)?;
                Ok(Some(next))
            })
            .collect();

        let mut updated = Vec::with_capacity(self.vehicles.len());
        for (vehicle, outcome) in self.vehicles.iter_mut().zip(outcomes) {
            match outcome? {
                Some(next) => {
                    *vehicle = next;
                    updated.push(true);
                }
                None => updated.push(false),
            }
        }
        Ok(self.report(updated))
    }

    fn check_actions(&self, actions: &[Action]) -> Result<()> {
        if actions.len() != self.vehicles.len() {
            return Err(SimError::ActionCountMismatch {
                expected: self.vehicles.len(),
                actual: actions.len(),
            });
        }
        Ok(())
    }

    fn report(&self, updated: Vec<bool>) -> TickReport {
        TickReport {
            updated,
            num_alive: self.num_alive(),
        }
    }
}

/// When an episode stops even though vehicles are still alive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeBudget {
    pub max_ticks: u64,
    /// Optional real-time limit, checked after each tick.
    pub wall_clock_secs: Option<f64>,
}

impl Default for EpisodeBudget {
    fn default() -> Self {
        Self {
            max_ticks: DEFAULT_MAX_TICKS,
            wall_clock_secs: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    AllCrashed,
    TickBudget,
    WallClock,
}

#[derive(Debug, Clone)]
pub struct EpisodeSummary {
    pub ticks: u64,
    pub num_alive: usize,
    pub termination: Termination,
    pub fitness: Vec<f64>,
}

/// Per-episode state owned by the episode loop: the vehicles, the policy driving
/// each one, and each vehicle's fitness accumulator.
pub struct EpisodeState<P: Policy> {
    batch: VehicleBatch,
    policies: Vec<P>,
    fitness: Vec<f64>,
    ticks: u64,
    parallel: bool,
}

impl<P: Policy> EpisodeState<P> {
    pub fn new(batch: VehicleBatch, policies: Vec<P>) -> Result<Self> {
        if policies.len() != batch.len() {
            return Err(SimError::PolicyCountMismatch {
                expected: batch.len(),
                actual: policies.len(),
            });
        }
        let fitness = vec![0.0; batch.len()];
        Ok(Self {
            batch,
            policies,
            fitness,
            ticks: 0,
            parallel: false,
        })
    }

    /// Update vehicles with rayon inside each tick.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// One tick: ask each policy for an action from its vehicle's observation,
    /// advance the batch, then credit every vehicle that moved this tick.
    pub fn step(&mut self, track: &dyn TrackSurface) -> Result<TickReport> {
        let actions: Vec<Action> = self
            .batch
            .vehicles()
            .iter()
            .zip(self.policies.iter_mut())
            .map(|(vehicle, policy)| policy.choose_action(&vehicle.observation()))
            .collect();

        let report = if self.parallel {
            self.batch.tick_parallel(&actions, track)?
        } else {
            self.batch.tick(&actions, track)?
        };

        for (i, vehicle) in self.batch.vehicles().iter().enumerate() {
            if report.updated[i] {
                self.fitness[i] += vehicle.fitness_contribution();
            }
        }
        self.ticks += 1;
        Ok(report)
    }

    /// Steps until every vehicle has crashed or the budget runs out.
    pub fn run(
        &mut self,
        track: &dyn TrackSurface,
        budget: &EpisodeBudget,
        mut observer: Option<&mut dyn Observer>,
    ) -> Result<EpisodeSummary> {
        let started = Instant::now();
        let wall_clock = budget.wall_clock_secs.map(Duration::from_secs_f64);
        log::debug!(
            "Episode starting with {} vehicles, budget {} ticks",
            self.batch.len(),
            budget.max_ticks
        );

        let termination = loop {
            if self.batch.num_alive() == 0 {
                break Termination::AllCrashed;
            }
            if self.ticks >= budget.max_ticks {
                break Termination::TickBudget;
            }
            let report = self.step(track)?;
            if let Some(observer) = observer.as_deref_mut() {
                observer.on_tick(self.ticks, self.batch.vehicles(), report.num_alive);
            }
            if report.num_alive == 0 {
                break Termination::AllCrashed;
            }
            if wall_clock.is_some_and(|limit| started.elapsed() > limit) {
                break Termination::WallClock;
            }
        };

        let summary = EpisodeSummary {
            ticks: self.ticks,
            num_alive: self.batch.num_alive(),
            termination,
            fitness: self.fitness.clone(),
        };
        log::debug!(
            "Episode ended after {} ticks ({:?}), {} alive",
            summary.ticks,
            summary.termination,
            summary.num_alive
        );
        Ok(summary)
    }

    pub fn batch(&self) -> &VehicleBatch {
        &self.batch
    }

    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
