use std::convert::TryFrom;

use rand::distributions::OpenClosed01;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

use crate::utils::errors::SimulationError;

/// Seed used when a `UniformRNG` is defaulted rather than configured.
pub const DEFAULT_SEED: u64 = 42;

/// Anything that can feed the variate transforms with uniform samples.
/// Values are expected in [0, 1]; a zero is tolerated and resampled by the
/// consumers that take a logarithm.
pub trait UniformSource: std::fmt::Debug {
    fn next_uniform(&mut self) -> f64;
}

/// The seeded uniform random number generator of a simulation run.  Each
/// simulation owns its own generator, so independent runs never share a
/// stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniformRNG {
    rng: Pcg64Mcg,
}

impl Default for UniformRNG {
    fn default() -> Self {
        Self::from_seed(DEFAULT_SEED)
    }
}

impl UniformRNG {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// A generator seeded from operating system (or browser) entropy, for
    /// runs that do not need to be reproduced.
    pub fn from_entropy() -> Self {
        Self {
            rng: Pcg64Mcg::from_entropy(),
        }
    }
}

impl UniformSource for UniformRNG {
    /// Samples are drawn from (0, 1], so the generator itself never yields
    /// a zero.
    fn next_uniform(&mut self) -> f64 {
        self.rng.sample(OpenClosed01)
    }
}

/// A fixed sequence of uniform values, replayed in order and restarted from
/// the beginning once exhausted.  Replays pin the exact arithmetic of a run,
/// independent of any generator implementation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ReplayedUniformsRecord")]
pub struct ReplayedUniforms {
    values: Vec<f64>,
    position: usize,
}

/// Serialized form of a replay, checked by `ReplayedUniforms::new` on the
/// way in.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplayedUniformsRecord {
    values: Vec<f64>,
    #[serde(default)]
    position: usize,
}

impl TryFrom<ReplayedUniformsRecord> for ReplayedUniforms {
    type Error = SimulationError;

    fn try_from(record: ReplayedUniformsRecord) -> Result<Self, Self::Error> {
        let mut replay = Self::new(record.values)?;
        replay.position = record.position;
        Ok(replay)
    }
}

impl ReplayedUniforms {
    pub fn new(values: Vec<f64>) -> Result<Self, SimulationError> {
        if values.is_empty() {
            return Err(SimulationError::InvalidParameter(String::from(
                "a replayed uniform sequence needs at least one value",
            )));
        }
        if let Some(value) = values.iter().find(|value| !(0.0..=1.0).contains(*value)) {
            return Err(SimulationError::InvalidParameter(format!(
                "replayed uniform values must lie in [0, 1], but found {}",
                value
            )));
        }
        Ok(Self {
            values,
            position: 0,
        })
    }

    /// The number of values handed out so far, counting restarts.
    pub fn consumed(&self) -> usize {
        self.position
    }
}

impl UniformSource for ReplayedUniforms {
    fn next_uniform(&mut self) -> f64 {
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}
