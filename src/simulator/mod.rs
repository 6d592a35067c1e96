//! The simulator module provides the mechanics to run a single-server
//! queue as a discrete event simulation.  The clock advances only to the
//! instants at which a customer arrives or departs, and the server and its
//! waiting line change state only inside those two event branches.
//!
//! `Simulation` and `WebSimulation` are used for Rust- and npm-based
//! projects, respectively.  The `Simulation` methods use the associated
//! struct types directly, while the `WebSimulation` provides an interface
//! with better JS/WASM compatibility.
//!
//! A run produces two artifacts: the `Statistics` derived once the
//! configured number of customers has been served, and the append-only
//! history of queue snapshots, one per processed event, for plotting and
//! reporting.  Between `step` calls, the read-only queries give a live view
//! of the run.

use tracing::{error, info};

use crate::input_modeling::{UniformRNG, UniformSource};
use crate::output_analysis::Statistics;
use crate::utils::errors::SimulationError;
use crate::utils::set_panic_hook;

pub mod config;
pub mod customer;
pub mod history;
pub mod replications;
pub mod scheduler;
pub mod server;
pub mod web;

pub use self::config::SimulationConfig;
pub use self::customer::Customer;
pub use self::history::HistorySample;
pub use self::replications::Replications;
pub use self::scheduler::{Event, EventClock, EventKind};
pub use self::server::Server;
pub use self::web::Simulation as WebSimulation;

use self::scheduler::Scheduler;

/// The `Simulation` struct is the single entry point of the engine, and
/// owns everything a run needs - the configuration, the scheduler (clock,
/// server, and uniform stream), and the history.  Independent simulations
/// share nothing, so any number of them can run side by side.  A run is not
/// restartable; a new `Simulation` is needed for every run.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    scheduler: Scheduler,
    history: Vec<HistorySample>,
    statistics: Option<Statistics>,
    failed: bool,
}

impl Simulation {
    /// Create an M/M/1 simulation from the mean inter-arrival time, the mean
    /// service time, and the number of customers to serve.  The uniform
    /// stream is seeded from entropy.
    pub fn new(
        mean_inter_arrival: f64,
        mean_service: f64,
        max_customers: usize,
    ) -> Result<Self, SimulationError> {
        Self::post(SimulationConfig::mm1(
            mean_inter_arrival,
            mean_service,
            max_customers,
        )?)
    }

    /// This constructor method creates a simulation from a supplied
    /// configuration, seeding the uniform stream from the configured seed
    /// when there is one.
    pub fn post(config: SimulationConfig) -> Result<Self, SimulationError> {
        let uniform_rng = match config.seed() {
            Some(seed) => UniformRNG::from_seed(seed),
            None => UniformRNG::from_entropy(),
        };
        Self::with_uniform_source(config, uniform_rng)
    }

    /// Create a simulation driven by a caller-supplied uniform stream, such
    /// as a `ReplayedUniforms` sequence.  The configured seed is ignored.
    pub fn with_uniform_source<S: UniformSource + 'static>(
        config: SimulationConfig,
        uniform: S,
    ) -> Result<Self, SimulationError> {
        set_panic_hook();
        config.validate()?;
        let scheduler = Scheduler::new(
            config.inter_arrival_time().clone(),
            config.service_time().clone(),
            Box::new(uniform),
        )?;
        Ok(Self {
            config,
            scheduler,
            history: Vec::new(),
            statistics: None,
            failed: false,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// An accessor method for the simulation clock.
    pub fn current_time(&self) -> f64 {
        self.scheduler.clock().current_time()
    }

    pub fn clock(&self) -> &EventClock {
        self.scheduler.clock()
    }

    pub fn server(&self) -> &Server {
        self.scheduler.server()
    }

    pub fn is_busy(&self) -> bool {
        self.server().is_busy()
    }

    pub fn queue_length(&self) -> usize {
        self.server().queue_length()
    }

    pub fn customers_served(&self) -> usize {
        self.server().customers_served()
    }

    /// The customer ledger, in arrival order.
    pub fn customers(&self) -> &[Customer] {
        self.server().customers()
    }

    /// The queue snapshots recorded so far, one per processed event.
    pub fn history(&self) -> &[HistorySample] {
        &self.history
    }

    pub fn is_complete(&self) -> bool {
        self.customers_served() >= self.config.max_customers()
    }

    /// Whether an earlier step returned an error.  A failed run rejects
    /// every further `step` and `run` with `RunFailed`.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// The run statistics, available once the run is complete.
    pub fn statistics(&self) -> Option<&Statistics> {
        self.statistics.as_ref()
    }

    /// Process the next arrival or departure, record a history sample, and
    /// derive the statistics if that event completed the run.
    pub fn step(&mut self) -> Result<Event, SimulationError> {
        if self.failed {
            return Err(SimulationError::RunFailed);
        }
        if self.is_complete() {
            return Err(SimulationError::RunCompleted);
        }
        self.advance().map_err(|err| {
            error!(time = self.current_time(), error = %err, "simulation step failed");
            self.failed = true;
            err
        })
    }

    fn advance(&mut self) -> Result<Event, SimulationError> {
        let event = self.scheduler.step()?;
        let sample = HistorySample {
            time: event.time,
            queue_length: self.queue_length(),
            server_busy: self.is_busy(),
        };
        self.history.push(sample);
        if !sample.server_busy && sample.queue_length > 0 {
            return Err(SimulationError::InvariantViolation(format!(
                "{} customers are waiting for an idle server at time {}",
                sample.queue_length, sample.time
            )));
        }
        if self.is_complete() {
            let statistics =
                Statistics::from_run(self.customers(), &self.history, self.current_time())?;
            info!(
                simulation_time = statistics.simulation_time,
                avg_delay = statistics.avg_delay,
                avg_queue_length = statistics.avg_queue_length,
                server_utilization = statistics.server_utilization,
                "simulation complete"
            );
            self.statistics = Some(statistics);
        }
        Ok(event)
    }

    /// This method executes the specified number of simulation steps, `n`,
    /// stopping early if the run completes.  The processed events are
    /// returned.
    pub fn step_n(&mut self, n: usize) -> Result<Vec<Event>, SimulationError> {
        let mut events = Vec::with_capacity(n);
        for _ in 0..n {
            if self.is_complete() {
                break;
            }
            events.push(self.step()?);
        }
        Ok(events)
    }

    /// Run until the configured number of customers has been served, and
    /// return the run statistics.
    pub fn run(&mut self) -> Result<Statistics, SimulationError> {
        if self.failed {
            return Err(SimulationError::RunFailed);
        }
        if self.is_complete() {
            return Err(SimulationError::RunCompleted);
        }
        info!(
            max_customers = self.config.max_customers(),
            mean_inter_arrival = self.config.inter_arrival_time().mean(),
            mean_service = self.config.service_time().mean(),
            "simulation started"
        );
        while !self.is_complete() {
            self.step()?;
        }
        self.statistics.ok_or_else(|| {
            SimulationError::InvariantViolation(String::from(
                "a completed run produced no statistics",
            ))
        })
    }
}
