//! # Overview
//! "Queuesim" provides a single-server discrete event queueing simulation
//! engine, for instructional Rust- and npm-based simulation exercises.
//!
//! This repository contains:
//!
//! * Input modeling, for drawing exponential (and other) inter-arrival and
//! service time variates from a seeded or replayed uniform stream.
//! * Simulator engine, for stepping arrivals and departures through a
//! single FIFO server until a fixed number of customers have been served.
//! * Output analysis, for deriving delay, queue length, and utilization
//! statistics from a finished run, summarizing replications with
//! confidence intervals, and comparing against M/M/1 queueing theory.
//!
//! Queuesim is compatible with a wide variety of compilation targets,
//! including WASM.
pub mod input_modeling;
pub mod output_analysis;
pub mod simulator;
pub mod utils;
