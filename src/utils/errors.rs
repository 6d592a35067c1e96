use thiserror::Error;

/// `SimulationError` enumerates all possible errors returned by queuesim
#[derive(Error, Debug)]
pub enum SimulationError {
    /// Represents a rejected configuration value, such as a non-positive
    /// mean or customer count
    #[error("An invalid simulation parameter was supplied: {0}")]
    InvalidParameter(String),

    /// Represents a uniform source that kept producing zero, so no
    /// logarithm-based variate could be drawn
    #[error("The uniform source repeatedly produced zero, and no finite variate could be drawn")]
    DegenerateVariate,

    /// Represents a scheduling logic defect, detected during or after a run
    #[error("A simulation invariant was violated: {0}")]
    InvariantViolation(String),

    /// Represents a step or run requested on a simulation that already
    /// reached its customer limit
    #[error("The simulation run has already completed, and cannot be restarted")]
    RunCompleted,

    /// Represents a step or run requested on a simulation whose earlier
    /// step returned an error, leaving the run unusable
    #[error("The simulation run failed earlier, and must be discarded")]
    RunFailed,

    /// Represents a steady-state calculation requested for a queue with
    /// utilization at or above 1
    #[error("The queue is unstable, with a traffic intensity of {0}")]
    UnstableQueue(f64),

    /// Represents a failed conversion to num-traits Float
    #[error("Failed to convert to a Float value")]
    FloatConvError,

    /// Transparent serde_json errors
    #[error(transparent)]
    JSONError(#[from] serde_json::error::Error),

    /// Transparent serde_yaml errors
    #[error(transparent)]
    YAMLError(#[from] serde_yaml::Error),
}
