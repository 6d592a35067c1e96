//! The scheduler owns the event clock and the server, and is the only code
//! that mutates either.  Each step compares the next arrival instant with
//! the next departure instant, advances the clock to the earlier one, and
//! runs the matching event branch.  Arrivals win ties.

use std::f64::INFINITY;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::server::Server;
use crate::input_modeling::{ContinuousRandomVariable, UniformSource};
use crate::utils::errors::SimulationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    Arrival,
    Departure,
}

/// A processed event, with the customer that arrived or departed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub time: f64,
    pub kind: EventKind,
    pub customer: usize,
}

/// Simulation time, plus the two pending event instants.  An idle server has
/// no pending departure, represented as an infinite departure time.
#[derive(Debug, Clone, PartialEq)]
pub struct EventClock {
    current_time: f64,
    next_arrival_time: f64,
    next_departure_time: f64,
}

impl EventClock {
    fn new(first_arrival_time: f64) -> Self {
        Self {
            current_time: 0.0,
            next_arrival_time: first_arrival_time,
            next_departure_time: INFINITY,
        }
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn next_arrival_time(&self) -> f64 {
        self.next_arrival_time
    }

    pub fn next_departure_time(&self) -> f64 {
        self.next_departure_time
    }

    /// The kind of the next event.  On an exact tie the arrival is processed
    /// first.
    pub fn next_event_kind(&self) -> EventKind {
        if self.next_arrival_time <= self.next_departure_time {
            EventKind::Arrival
        } else {
            EventKind::Departure
        }
    }

    fn advance_to(&mut self, time: f64) -> Result<f64, SimulationError> {
        if !time.is_finite() || time < self.current_time {
            return Err(SimulationError::InvariantViolation(format!(
                "the clock cannot move from {} to {}",
                self.current_time, time
            )));
        }
        self.current_time = time;
        Ok(time)
    }
}

#[derive(Debug)]
pub(crate) struct Scheduler {
    clock: EventClock,
    server: Server,
    inter_arrival_time: ContinuousRandomVariable,
    service_time: ContinuousRandomVariable,
    uniform: Box<dyn UniformSource>,
}

impl Scheduler {
    /// Create an empty, idle system, with the first arrival scheduled one
    /// inter-arrival draw after time zero.
    pub(crate) fn new(
        inter_arrival_time: ContinuousRandomVariable,
        service_time: ContinuousRandomVariable,
        mut uniform: Box<dyn UniformSource>,
    ) -> Result<Self, SimulationError> {
        let first_arrival_time = inter_arrival_time.random_variate(uniform.as_mut())?;
        Ok(Self {
            clock: EventClock::new(first_arrival_time),
            server: Server::default(),
            inter_arrival_time,
            service_time,
            uniform,
        })
    }

    pub(crate) fn clock(&self) -> &EventClock {
        &self.clock
    }

    pub(crate) fn server(&self) -> &Server {
        &self.server
    }

    pub(crate) fn step(&mut self) -> Result<Event, SimulationError> {
        let event = match self.clock.next_event_kind() {
            EventKind::Arrival => self.arrive()?,
            EventKind::Departure => self.depart()?,
        };
        debug!(
            time = event.time,
            kind = ?event.kind,
            customer = event.customer,
            queue_length = self.server.queue_length(),
            server_busy = self.server.is_busy(),
            "processed event"
        );
        Ok(event)
    }

    // Variates are drawn before any state changes, so a failed draw leaves
    // the clock and server exactly as they were.
    fn arrive(&mut self) -> Result<Event, SimulationError> {
        let service_time = if self.server.is_busy() {
            None
        } else {
            Some(self.service_time.random_variate(self.uniform.as_mut())?)
        };
        let inter_arrival_time = self
            .inter_arrival_time
            .random_variate(self.uniform.as_mut())?;
        let now = self.clock.advance_to(self.clock.next_arrival_time)?;
        let customer = self.server.admit(now);
        match service_time {
            Some(service_time) => self.start_service(customer, now, service_time)?,
            None => self.server.enqueue(customer)?,
        }
        self.clock.next_arrival_time = now + inter_arrival_time;
        Ok(Event {
            time: now,
            kind: EventKind::Arrival,
            customer,
        })
    }

    fn depart(&mut self) -> Result<Event, SimulationError> {
        let service_time = if self.server.queue_length() > 0 {
            Some(self.service_time.random_variate(self.uniform.as_mut())?)
        } else {
            None
        };
        let now = self.clock.advance_to(self.clock.next_departure_time)?;
        let customer = self.server.complete_service()?;
        match service_time {
            Some(service_time) => {
                let next = self.server.next_waiting().ok_or_else(|| {
                    SimulationError::InvariantViolation(String::from(
                        "the waiting line emptied during a departure",
                    ))
                })?;
                self.start_service(next, now, service_time)?;
            }
            None => self.clock.next_departure_time = INFINITY,
        }
        Ok(Event {
            time: now,
            kind: EventKind::Departure,
            customer,
        })
    }

    fn start_service(
        &mut self,
        customer: usize,
        now: f64,
        service_time: f64,
    ) -> Result<(), SimulationError> {
        self.clock.next_departure_time = self.server.begin_service(customer, now, service_time)?;
        Ok(())
    }
}
