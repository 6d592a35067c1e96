//! Random variables drive the arrival and service behavior of the queue.
//! Every distribution is expressed as a transform of the simulation's
//! uniform stream, so a replayed uniform sequence fully determines a run.
//! The exponential distribution, parameterized by its mean, is the
//! workhorse; constant and uniform distributions support the deterministic
//! and general-service variants of the single-server exercises.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::uniform_rng::UniformSource;
use crate::utils::errors::SimulationError;
use crate::utils::require_positive;

/// A zero uniform would make the logarithm undefined, so it is redrawn, up
/// to this many times before the source is declared degenerate.
const MAX_RESAMPLES: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContinuousRandomVariable {
    Exp { mean: f64 },
    Constant { value: f64 },
    /// Range is exclusive of min, inclusive of max: (min, max]
    Uniform { min: f64, max: f64 },
}

/// Draw a uniform variate in (0, 1], redrawing any zero the source produces.
pub fn nonzero_uniform(uniform: &mut dyn UniformSource) -> Result<f64, SimulationError> {
    for attempt in 0..MAX_RESAMPLES {
        let sample = uniform.next_uniform();
        if sample > 0.0 {
            return Ok(sample);
        }
        warn!(attempt, "uniform source produced zero, resampling");
    }
    Err(SimulationError::DegenerateVariate)
}

/// Exponential variate with the given mean, by inversion: `-mean * ln(u)`.
pub fn sample_exponential(
    mean: f64,
    uniform: &mut dyn UniformSource,
) -> Result<f64, SimulationError> {
    let mean = require_positive("exponential mean", mean)?;
    Ok(-mean * nonzero_uniform(uniform)?.ln())
}

impl ContinuousRandomVariable {
    /// Reject parameterizations that could produce negative, non-finite,
    /// or permanently zero durations.
    pub fn validate(&self) -> Result<(), SimulationError> {
        match self {
            ContinuousRandomVariable::Exp { mean } => {
                require_positive("exponential mean", *mean)?;
            }
            ContinuousRandomVariable::Constant { value } => {
                require_positive("constant duration", *value)?;
            }
            ContinuousRandomVariable::Uniform { min, max } => {
                if !(min.is_finite() && *min >= 0.0) {
                    return Err(SimulationError::InvalidParameter(format!(
                        "uniform minimum must be finite and non-negative, but was {}",
                        min
                    )));
                }
                if !(max.is_finite() && max > min) {
                    return Err(SimulationError::InvalidParameter(format!(
                        "uniform maximum must be finite and greater than the minimum {}, but was {}",
                        min, max
                    )));
                }
            }
        }
        Ok(())
    }

    /// The generation of random variates drives stochastic behaviors during
    /// simulation execution.  This function requires the uniform source of
    /// the simulation, and produces a non-negative f64 random variate.
    pub fn random_variate(
        &self,
        uniform: &mut dyn UniformSource,
    ) -> Result<f64, SimulationError> {
        self.validate()?;
        match self {
            ContinuousRandomVariable::Exp { mean } => sample_exponential(*mean, uniform),
            ContinuousRandomVariable::Constant { value } => Ok(*value),
            ContinuousRandomVariable::Uniform { min, max } => {
                Ok(min + (max - min) * nonzero_uniform(uniform)?)
            }
        }
    }

    /// The expected value of the distribution.
    pub fn mean(&self) -> f64 {
        match self {
            ContinuousRandomVariable::Exp { mean } => *mean,
            ContinuousRandomVariable::Constant { value } => *value,
            ContinuousRandomVariable::Uniform { min, max } => (min + max) / 2.0,
        }
    }

    pub fn variance(&self) -> f64 {
        match self {
            ContinuousRandomVariable::Exp { mean } => mean.powi(2),
            ContinuousRandomVariable::Constant { .. } => 0.0,
            ContinuousRandomVariable::Uniform { min, max } => (max - min).powi(2) / 12.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_modeling::{ReplayedUniforms, UniformRNG};

    fn epsilon() -> f64 {
        1.0e-12
    }

    #[test]
    fn exponential_uses_the_inverse_transform() {
        let mut replay = ReplayedUniforms::new(vec![0.5, 0.3]).unwrap();
        let first = sample_exponential(2.0, &mut replay).unwrap();
        let second = sample_exponential(1.5, &mut replay).unwrap();
        assert!((first - 2.0 * std::f64::consts::LN_2).abs() < epsilon());
        assert!((second - (-1.5 * 0.3f64.ln())).abs() < epsilon());
    }

    #[test]
    fn zero_uniforms_are_resampled() {
        let mut replay = ReplayedUniforms::new(vec![0.0, 0.0, 0.25]).unwrap();
        let variate = sample_exponential(1.0, &mut replay).unwrap();
        assert!((variate - (-0.25f64.ln())).abs() < epsilon());
        assert_eq![3, replay.consumed()];
    }

    #[test]
    fn all_zero_source_is_degenerate() {
        let mut replay = ReplayedUniforms::new(vec![0.0]).unwrap();
        assert!(matches!(
            sample_exponential(1.0, &mut replay),
            Err(SimulationError::DegenerateVariate)
        ));
    }

    #[test]
    fn non_positive_mean_is_rejected_before_drawing() {
        let mut replay = ReplayedUniforms::new(vec![0.5]).unwrap();
        assert!(matches!(
            sample_exponential(0.0, &mut replay),
            Err(SimulationError::InvalidParameter(_))
        ));
        assert!(matches!(
            sample_exponential(-2.0, &mut replay),
            Err(SimulationError::InvalidParameter(_))
        ));
        assert_eq![0, replay.consumed()];
    }

    #[test]
    fn constant_consumes_no_uniforms() {
        let mut replay = ReplayedUniforms::new(vec![0.5]).unwrap();
        let variable = ContinuousRandomVariable::Constant { value: 3.0 };
        assert_eq![3.0, variable.random_variate(&mut replay).unwrap()];
        assert_eq![0, replay.consumed()];
    }

    #[test]
    fn uniform_scales_the_draw() {
        let mut replay = ReplayedUniforms::new(vec![0.25]).unwrap();
        let variable = ContinuousRandomVariable::Uniform { min: 1.0, max: 5.0 };
        assert!((variable.random_variate(&mut replay).unwrap() - 2.0).abs() < epsilon());
        assert!(ContinuousRandomVariable::Uniform { min: 2.0, max: 2.0 }
            .validate()
            .is_err());
        assert!(ContinuousRandomVariable::Uniform { min: -1.0, max: 2.0 }
            .validate()
            .is_err());
    }

    #[test]
    fn exponential_sample_mean_is_close_to_the_configured_mean() {
        let mut uniform_rng = UniformRNG::from_seed(11);
        let variable = ContinuousRandomVariable::Exp { mean: 4.0 };
        let samples: Vec<f64> = (0..100_000)
            .map(|_| variable.random_variate(&mut uniform_rng).unwrap())
            .collect();
        assert!(samples.iter().all(|sample| *sample >= 0.0));
        let sample_mean = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!((sample_mean - 4.0).abs() < 0.1);
    }

    #[test]
    fn variables_deserialize_from_tagged_json() {
        let variable: ContinuousRandomVariable =
            serde_json::from_str(r#"{"exp": {"mean": 2.0}}"#).unwrap();
        assert_eq![ContinuousRandomVariable::Exp { mean: 2.0 }, variable];
        assert_eq![2.0, variable.mean()];
    }
}
