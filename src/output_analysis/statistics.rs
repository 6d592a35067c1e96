use serde::{Deserialize, Serialize};

use crate::simulator::{Customer, HistorySample};
use crate::utils::errors::SimulationError;

/// Rounding slack allowed on utilization before it is treated as a defect.
const UTILIZATION_TOLERANCE: f64 = 1.0e-9;

/// The performance summary of one finished run.  All per-customer figures
/// are taken over the served customers.
///
/// `avg_queue_length` is the total waiting time divided by the run length,
/// which is the time-average number waiting only up to the customers still
/// in line when the run stopped.  The time-weighted integral of the recorded
/// queue lengths is reported separately, as `time_average_queue_length`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub avg_delay: f64,
    pub avg_queue_length: f64,
    pub server_utilization: f64,
    pub simulation_time: f64,
    pub customers_served: usize,
    pub time_average_queue_length: f64,
    pub max_queue_length: usize,
    pub avg_service_time: f64,
    pub avg_time_in_system: f64,
}

impl Statistics {
    /// Derive the statistics of a finished run from its customer ledger,
    /// its history, and the final clock.  Nothing is mutated.  A negative
    /// waiting or service time means the scheduling logic is broken, and is
    /// reported as an invariant violation.
    pub fn from_run(
        customers: &[Customer],
        history: &[HistorySample],
        simulation_time: f64,
    ) -> Result<Self, SimulationError> {
        let mut customers_served = 0;
        let mut total_waiting_time = 0.0;
        let mut total_service_time = 0.0;
        for customer in customers.iter().filter(|customer| customer.is_served()) {
            let (waiting_time, service_time) =
                match (customer.waiting_time(), customer.service_time()) {
                    (Some(waiting_time), Some(service_time)) => (waiting_time, service_time),
                    _ => {
                        return Err(SimulationError::InvariantViolation(format!(
                            "customer {} was served without service timestamps",
                            customer.id()
                        )))
                    }
                };
            if waiting_time < 0.0 {
                return Err(SimulationError::InvariantViolation(format!(
                    "customer {} has a negative waiting time of {}",
                    customer.id(),
                    waiting_time
                )));
            }
            if service_time < 0.0 {
                return Err(SimulationError::InvariantViolation(format!(
                    "customer {} has a negative service time of {}",
                    customer.id(),
                    service_time
                )));
            }
            customers_served += 1;
            total_waiting_time += waiting_time;
            total_service_time += service_time;
        }
        if customers_served == 0 {
            return Err(SimulationError::InvariantViolation(String::from(
                "statistics require at least one served customer",
            )));
        }

        let served = customers_served as f64;
        let per_unit_time = |total: f64| {
            if simulation_time > 0.0 {
                total / simulation_time
            } else {
                0.0
            }
        };
        let server_utilization = per_unit_time(total_service_time);
        if !(0.0..=1.0 + UTILIZATION_TOLERANCE).contains(&server_utilization) {
            return Err(SimulationError::InvariantViolation(format!(
                "server utilization of {} is outside [0, 1]",
                server_utilization
            )));
        }

        Ok(Self {
            avg_delay: total_waiting_time / served,
            avg_queue_length: per_unit_time(total_waiting_time),
            server_utilization: server_utilization.min(1.0),
            simulation_time,
            customers_served,
            time_average_queue_length: per_unit_time(queue_length_area(
                history,
                simulation_time,
            )),
            max_queue_length: history
                .iter()
                .map(|sample| sample.queue_length)
                .max()
                .unwrap_or(0),
            avg_service_time: total_service_time / served,
            avg_time_in_system: (total_waiting_time + total_service_time) / served,
        })
    }
}

/// The integral of the queue length over [0, end], treating the queue as
/// empty before the first sample and constant between samples.
fn queue_length_area(history: &[HistorySample], end: f64) -> f64 {
    let (area, last_time, last_length) = history.iter().fold(
        (0.0, 0.0, 0),
        |(area, last_time, last_length), sample| {
            (
                area + last_length as f64 * (sample.time - last_time),
                sample.time,
                sample.queue_length,
            )
        },
    );
    area + last_length as f64 * (end - last_time).max(0.0)
}
