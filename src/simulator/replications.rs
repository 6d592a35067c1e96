//! Replications repeat a terminating run with independent random streams,
//! so each metric becomes an IID sample with a confidence interval.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Simulation, SimulationConfig};
use crate::input_modeling::uniform_rng::DEFAULT_SEED;
use crate::output_analysis::{IndependentSample, Statistics};
use crate::utils::errors::SimulationError;

/// The statistics of every replication, plus the per-metric samples across
/// replications.  Replication `i` is seeded with the configured seed (or the
/// default seed) plus `i`, so a set of replications is reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Replications {
    runs: Vec<Statistics>,
    avg_delay: IndependentSample<f64>,
    avg_queue_length: IndependentSample<f64>,
    server_utilization: IndependentSample<f64>,
    time_average_queue_length: IndependentSample<f64>,
}

impl Replications {
    pub fn run(config: &SimulationConfig, count: usize) -> Result<Self, SimulationError> {
        if count == 0 {
            return Err(SimulationError::InvalidParameter(String::from(
                "at least one replication is required",
            )));
        }
        let base_seed = config.seed().unwrap_or(DEFAULT_SEED);
        info!(count, base_seed, "running replications");
        let runs = (0..count)
            .map(|replication| {
                let seed = base_seed.wrapping_add(replication as u64);
                Simulation::post(config.clone().with_seed(seed))?.run()
            })
            .collect::<Result<Vec<Statistics>, SimulationError>>()?;
        let metric = |value: fn(&Statistics) -> f64| {
            IndependentSample::post(runs.iter().map(value).collect())
        };
        Ok(Self {
            avg_delay: metric(|statistics| statistics.avg_delay)?,
            avg_queue_length: metric(|statistics| statistics.avg_queue_length)?,
            server_utilization: metric(|statistics| statistics.server_utilization)?,
            time_average_queue_length: metric(|statistics| {
                statistics.time_average_queue_length
            })?,
            runs,
        })
    }

    pub fn runs(&self) -> &[Statistics] {
        &self.runs
    }

    pub fn avg_delay(&self) -> &IndependentSample<f64> {
        &self.avg_delay
    }

    pub fn avg_queue_length(&self) -> &IndependentSample<f64> {
        &self.avg_queue_length
    }

    pub fn server_utilization(&self) -> &IndependentSample<f64> {
        &self.server_utilization
    }

    pub fn time_average_queue_length(&self) -> &IndependentSample<f64> {
        &self.time_average_queue_length
    }
}
