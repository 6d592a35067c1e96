//! Steady-state results for single-server queues with Poisson arrivals,
//! from the Pollaczek-Khinchine formula.  These are the values a long
//! simulation run should approach, which makes them the reference point of
//! most single-server exercises.

use serde::{Deserialize, Serialize};

use crate::input_modeling::ContinuousRandomVariable;
use crate::simulator::SimulationConfig;
use crate::utils::errors::SimulationError;
use crate::utils::require_positive;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueTheory {
    pub arrival_rate: f64,
    pub service_rate: f64,
    /// Traffic intensity, rho, which is also the long-run utilization
    pub traffic_intensity: f64,
    /// Wq
    pub mean_delay: f64,
    /// Lq
    pub mean_queue_length: f64,
    /// W
    pub mean_time_in_system: f64,
    /// L
    pub mean_number_in_system: f64,
}

impl QueueTheory {
    /// M/M/1: exponential inter-arrival and service times.
    pub fn mm1(mean_inter_arrival: f64, mean_service: f64) -> Result<Self, SimulationError> {
        Self::mg1(mean_inter_arrival, mean_service, mean_service.powi(2))
    }

    /// M/G/1: exponential inter-arrival times, and any service distribution
    /// given by its mean and variance.
    pub fn mg1(
        mean_inter_arrival: f64,
        mean_service: f64,
        service_variance: f64,
    ) -> Result<Self, SimulationError> {
        let arrival_rate = 1.0 / require_positive("mean_inter_arrival", mean_inter_arrival)?;
        let service_rate = 1.0 / require_positive("mean_service", mean_service)?;
        if !(service_variance.is_finite() && service_variance >= 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "service variance must be finite and non-negative, but was {}",
                service_variance
            )));
        }
        let traffic_intensity = arrival_rate / service_rate;
        if traffic_intensity >= 1.0 {
            return Err(SimulationError::UnstableQueue(traffic_intensity));
        }
        let mean_queue_length = (arrival_rate.powi(2) * service_variance
            + traffic_intensity.powi(2))
            / (2.0 * (1.0 - traffic_intensity));
        let mean_delay = mean_queue_length / arrival_rate;
        let mean_time_in_system = mean_delay + mean_service;
        Ok(Self {
            arrival_rate,
            service_rate,
            traffic_intensity,
            mean_delay,
            mean_queue_length,
            mean_time_in_system,
            mean_number_in_system: arrival_rate * mean_time_in_system,
        })
    }

    /// The steady-state values for a simulation configuration.  Only
    /// exponential inter-arrival times have a closed form here.
    pub fn for_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        match config.inter_arrival_time() {
            ContinuousRandomVariable::Exp { mean } => {
                let service_time = config.service_time();
                Self::mg1(*mean, service_time.mean(), service_time.variance())
            }
            other => Err(SimulationError::InvalidParameter(format!(
                "closed-form results need exponential inter-arrival times, not {:?}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epsilon() -> f64 {
        1.0e-12
    }

    #[test]
    fn mm1_matches_the_textbook_formulas() {
        let theory = QueueTheory::mm1(2.0, 1.0).unwrap();
        assert!((theory.traffic_intensity - 0.5).abs() < epsilon());
        assert!((theory.mean_queue_length - 0.5).abs() < epsilon());
        assert!((theory.mean_delay - 1.0).abs() < epsilon());
        assert!((theory.mean_time_in_system - 2.0).abs() < epsilon());
        assert!((theory.mean_number_in_system - 1.0).abs() < epsilon());
    }

    #[test]
    fn deterministic_service_halves_the_mm1_delay() {
        let mm1 = QueueTheory::mm1(2.0, 1.0).unwrap();
        let md1 = QueueTheory::mg1(2.0, 1.0, 0.0).unwrap();
        assert!((md1.mean_delay - mm1.mean_delay / 2.0).abs() < epsilon());
    }

    #[test]
    fn saturated_queue_has_no_steady_state() {
        assert!(matches!(
            QueueTheory::mm1(1.0, 1.0),
            Err(SimulationError::UnstableQueue(_))
        ));
        assert!(matches!(
            QueueTheory::mm1(1.0, 10.0),
            Err(SimulationError::UnstableQueue(_))
        ));
    }

    #[test]
    fn closed_form_needs_poisson_arrivals() {
        let config = SimulationConfig::new(
            ContinuousRandomVariable::Constant { value: 2.0 },
            ContinuousRandomVariable::Exp { mean: 1.0 },
            10,
        )
        .unwrap();
        assert!(QueueTheory::for_config(&config).is_err());
        let config = SimulationConfig::mm1(2.0, 1.0, 10).unwrap();
        assert_eq![
            QueueTheory::mm1(2.0, 1.0).unwrap(),
            QueueTheory::for_config(&config).unwrap()
        ];
    }
}
