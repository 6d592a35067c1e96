use serde::{Deserialize, Serialize};

use crate::utils::errors::SimulationError;

/// A customer passing through the single-server queue.  The arrival time is
/// fixed at creation; the service timestamps are set exactly once, when the
/// customer reaches the server; the customer is marked served at departure.
/// Customers are retained in the ledger for the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    id: usize,
    arrival_time: f64,
    service_start_time: Option<f64>,
    service_time: Option<f64>,
    service_end_time: Option<f64>,
    served: bool,
}

impl Customer {
    pub(crate) fn arrive(id: usize, arrival_time: f64) -> Self {
        Self {
            id,
            arrival_time,
            service_start_time: None,
            service_time: None,
            service_end_time: None,
            served: false,
        }
    }

    pub(crate) fn begin_service(
        &mut self,
        time: f64,
        service_time: f64,
    ) -> Result<f64, SimulationError> {
        if self.service_start_time.is_some() {
            return Err(SimulationError::InvariantViolation(format!(
                "customer {} started service twice",
                self.id
            )));
        }
        let service_end_time = time + service_time;
        self.service_start_time = Some(time);
        self.service_time = Some(service_time);
        self.service_end_time = Some(service_end_time);
        Ok(service_end_time)
    }

    pub(crate) fn depart(&mut self) -> Result<(), SimulationError> {
        if self.service_start_time.is_none() || self.served {
            return Err(SimulationError::InvariantViolation(format!(
                "customer {} departed without being in service",
                self.id
            )));
        }
        self.served = true;
        Ok(())
    }

    /// Creation order, which is also arrival order.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn arrival_time(&self) -> f64 {
        self.arrival_time
    }

    pub fn service_start_time(&self) -> Option<f64> {
        self.service_start_time
    }

    pub fn service_time(&self) -> Option<f64> {
        self.service_time
    }

    pub fn service_end_time(&self) -> Option<f64> {
        self.service_end_time
    }

    pub fn is_served(&self) -> bool {
        self.served
    }

    /// Time spent waiting in line, available once service has started.
    pub fn waiting_time(&self) -> Option<f64> {
        self.service_start_time
            .map(|service_start_time| service_start_time - self.arrival_time)
    }

    /// Time from arrival to the end of service.
    pub fn time_in_system(&self) -> Option<f64> {
        self.service_end_time
            .map(|service_end_time| service_end_time - self.arrival_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_timestamps_are_set_once() {
        let mut customer = Customer::arrive(0, 1.0);
        assert_eq![None, customer.waiting_time()];
        assert_eq![3.5, customer.begin_service(2.0, 1.5).unwrap()];
        assert_eq![Some(1.0), customer.waiting_time()];
        assert_eq![Some(2.5), customer.time_in_system()];
        assert!(customer.begin_service(3.0, 1.0).is_err());
    }

    #[test]
    fn departure_requires_service() {
        let mut customer = Customer::arrive(4, 0.5);
        assert!(customer.depart().is_err());
        customer.begin_service(0.5, 1.0).unwrap();
        customer.depart().unwrap();
        assert!(customer.is_served());
        assert!(customer.depart().is_err());
    }
}
