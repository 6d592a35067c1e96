use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::customer::Customer;
use crate::utils::errors::SimulationError;

/// The single server and its waiting line.  The server holds the full
/// customer ledger, and a FIFO of ledger ids for the customers still
/// waiting.  Busy/idle and queue length are derived from the in-service
/// slot and the FIFO, so they cannot drift apart.  Only the scheduler
/// mutates the server; everyone else gets read-only queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    customers: Vec<Customer>,
    waiting: VecDeque<usize>,
    in_service: Option<usize>,
    customers_served: usize,
}

impl Server {
    pub fn is_busy(&self) -> bool {
        self.in_service.is_some()
    }

    pub fn queue_length(&self) -> usize {
        self.waiting.len()
    }

    pub fn customers_served(&self) -> usize {
        self.customers_served
    }

    /// Every customer that has arrived so far, in arrival order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn in_service(&self) -> Option<&Customer> {
        self.in_service.map(|id| &self.customers[id])
    }

    /// The waiting customers, from the front of the line to the back.
    pub fn waiting(&self) -> impl Iterator<Item = &Customer> + '_ {
        self.waiting.iter().map(move |id| &self.customers[*id])
    }

    pub(crate) fn admit(&mut self, time: f64) -> usize {
        let id = self.customers.len();
        self.customers.push(Customer::arrive(id, time));
        id
    }

    pub(crate) fn enqueue(&mut self, id: usize) -> Result<(), SimulationError> {
        if !self.is_busy() {
            return Err(SimulationError::InvariantViolation(format!(
                "customer {} was queued while the server was idle",
                id
            )));
        }
        self.waiting.push_back(id);
        Ok(())
    }

    /// Put a customer in front of the server, returning the time its
    /// service will end.
    pub(crate) fn begin_service(
        &mut self,
        id: usize,
        time: f64,
        service_time: f64,
    ) -> Result<f64, SimulationError> {
        if let Some(current) = self.in_service {
            return Err(SimulationError::InvariantViolation(format!(
                "customer {} started service while customer {} was still being served",
                id, current
            )));
        }
        let customer = self.customers.get_mut(id).ok_or_else(|| {
            SimulationError::InvariantViolation(format!("customer {} is not in the ledger", id))
        })?;
        let service_end_time = customer.begin_service(time, service_time)?;
        self.in_service = Some(id);
        Ok(service_end_time)
    }

    /// Release the customer in service, returning its id.
    pub(crate) fn complete_service(&mut self) -> Result<usize, SimulationError> {
        let id = self.in_service.take().ok_or_else(|| {
            SimulationError::InvariantViolation(String::from(
                "a departure was processed while the server was idle",
            ))
        })?;
        self.customers[id].depart()?;
        self.customers_served += 1;
        Ok(id)
    }

    /// Pull the customer at the front of the line, if any.
    pub(crate) fn next_waiting(&mut self) -> Option<usize> {
        self.waiting.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_server_cannot_queue_or_depart() {
        let mut server = Server::default();
        let id = server.admit(1.0);
        assert!(server.enqueue(id).is_err());
        assert!(matches!(
            server.complete_service(),
            Err(SimulationError::InvariantViolation(_))
        ));
    }

    #[test]
    fn waiting_line_is_first_in_first_out() {
        let mut server = Server::default();
        let first = server.admit(0.0);
        server.begin_service(first, 0.0, 5.0).unwrap();
        let second = server.admit(1.0);
        let third = server.admit(2.0);
        server.enqueue(second).unwrap();
        server.enqueue(third).unwrap();
        assert_eq![2, server.queue_length()];
        let waiting_ids: Vec<usize> = server.waiting().map(Customer::id).collect();
        assert_eq![vec![second, third], waiting_ids];

        assert_eq![first, server.complete_service().unwrap()];
        assert_eq![Some(second), server.next_waiting()];
        assert_eq![Some(third), server.next_waiting()];
        assert_eq![None, server.next_waiting()];
        assert_eq![1, server.customers_served()];
        assert!(!server.is_busy());
    }

    #[test]
    fn busy_server_rejects_a_second_customer() {
        let mut server = Server::default();
        let first = server.admit(0.0);
        let second = server.admit(0.0);
        server.begin_service(first, 0.0, 1.0).unwrap();
        assert!(server.begin_service(second, 0.0, 1.0).is_err());
        assert_eq![Some(first), server.in_service().map(Customer::id)];
    }
}
