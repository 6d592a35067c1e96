use serde::{Deserialize, Serialize};

use crate::input_modeling::ContinuousRandomVariable;
use crate::utils::errors::SimulationError;
use crate::utils::require_positive;

/// The configuration of a single-server queueing run - the inter-arrival
/// and service time distributions, the number of customers to serve before
/// stopping, and an optional seed.  Without a seed, each run draws a fresh
/// random stream.
///
/// ```json
/// {
///     "interArrivalTime": { "exp": { "mean": 2.0 } },
///     "serviceTime": { "exp": { "mean": 1.5 } },
///     "maxCustomers": 1000,
///     "seed": 7
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    inter_arrival_time: ContinuousRandomVariable,
    service_time: ContinuousRandomVariable,
    max_customers: usize,
    #[serde(default)]
    seed: Option<u64>,
}

impl SimulationConfig {
    pub fn new(
        inter_arrival_time: ContinuousRandomVariable,
        service_time: ContinuousRandomVariable,
        max_customers: usize,
    ) -> Result<Self, SimulationError> {
        let config = Self {
            inter_arrival_time,
            service_time,
            max_customers,
            seed: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// The classic M/M/1 configuration, with exponential inter-arrival and
    /// service times given by their means.
    pub fn mm1(
        mean_inter_arrival: f64,
        mean_service: f64,
        max_customers: usize,
    ) -> Result<Self, SimulationError> {
        Self::new(
            ContinuousRandomVariable::Exp {
                mean: require_positive("mean_inter_arrival", mean_inter_arrival)?,
            },
            ContinuousRandomVariable::Exp {
                mean: require_positive("mean_service", mean_service)?,
            },
            max_customers,
        )
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json(config: &str) -> Result<Self, SimulationError> {
        let config: Self = serde_json::from_str(config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(config: &str) -> Result<Self, SimulationError> {
        let config: Self = serde_yaml::from_str(config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, SimulationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String, SimulationError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Every parameter is checked before a simulation takes its first step.
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.inter_arrival_time.validate()?;
        self.service_time.validate()?;
        if self.max_customers == 0 {
            return Err(SimulationError::InvalidParameter(String::from(
                "max_customers must be greater than zero",
            )));
        }
        Ok(())
    }

    pub fn inter_arrival_time(&self) -> &ContinuousRandomVariable {
        &self.inter_arrival_time
    }

    pub fn service_time(&self) -> &ContinuousRandomVariable {
        &self.service_time
    }

    pub fn max_customers(&self) -> usize {
        self.max_customers
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mm1_rejects_non_positive_parameters() {
        assert!(matches!(
            SimulationConfig::mm1(0.0, 1.0, 10),
            Err(SimulationError::InvalidParameter(_))
        ));
        assert!(matches!(
            SimulationConfig::mm1(1.0, -1.0, 10),
            Err(SimulationError::InvalidParameter(_))
        ));
        assert!(matches!(
            SimulationConfig::mm1(1.0, 1.0, 0),
            Err(SimulationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn json_configuration_is_loaded_and_validated() {
        let config = SimulationConfig::from_json(
            r#"
{
    "interArrivalTime": { "exp": { "mean": 2.0 } },
    "serviceTime": { "uniform": { "min": 0.5, "max": 1.5 } },
    "maxCustomers": 25,
    "seed": 3
}"#,
        )
        .unwrap();
        assert_eq![25, config.max_customers()];
        assert_eq![Some(3), config.seed()];
        assert_eq![
            &ContinuousRandomVariable::Uniform { min: 0.5, max: 1.5 },
            config.service_time()
        ];

        let invalid = SimulationConfig::from_json(
            r#"
{
    "interArrivalTime": { "exp": { "mean": -2.0 } },
    "serviceTime": { "exp": { "mean": 1.0 } },
    "maxCustomers": 25
}"#,
        );
        assert!(matches!(invalid, Err(SimulationError::InvalidParameter(_))));
    }

    #[test]
    fn yaml_configuration_defaults_the_seed() {
        let config = SimulationConfig::from_yaml(
            r#"
interArrivalTime:
  exp:
    mean: 2.0
serviceTime:
  constant:
    value: 1.0
maxCustomers: 10
"#,
        )
        .unwrap();
        assert_eq![None, config.seed()];
        assert_eq![
            &ContinuousRandomVariable::Constant { value: 1.0 },
            config.service_time()
        ];
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            SimulationConfig::from_json("{ not json"),
            Err(SimulationError::JSONError(_))
        ));
    }

    #[test]
    fn json_round_trip_preserves_the_configuration() {
        let config = SimulationConfig::mm1(2.0, 1.5, 5).unwrap().with_seed(9);
        let reloaded = SimulationConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq![config, reloaded];
    }
}
