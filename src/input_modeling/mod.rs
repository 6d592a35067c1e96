//! The input modeling module provides the stochastic foundation for the
//! queueing engine.  The module includes a set of random variable
//! distributions for inter-arrival and service times, and a structure
//! around uniform random number generation, either from a seeded
//! generator or a replayed fixed sequence.

pub mod random_variable;
pub mod uniform_rng;

pub use random_variable::ContinuousRandomVariable;
pub use random_variable::{nonzero_uniform, sample_exponential};
pub use uniform_rng::{ReplayedUniforms, UniformRNG, UniformSource};
