use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::utils::set_panic_hook;

use super::Simulation as CoreSimulation;
use super::SimulationConfig;

/// The web `Simulation` provides JS/WASM-compatible interfaces to the core
/// `Simulation` struct.  For additional insight on these methods, refer to
/// the associated core `Simulation` methods.  Errors are unwrapped, instead
/// of returned, in the web `Simulation` methods.
#[wasm_bindgen]
pub struct Simulation {
    simulation: CoreSimulation,
}

#[wasm_bindgen]
impl Simulation {
    /// A JS/WASM interface for `Simulation.post`, which uses a JSON
    /// representation of the simulation configuration.
    pub fn post_json(config: &str) -> Self {
        set_panic_hook();
        Self {
            simulation: CoreSimulation::post(SimulationConfig::from_json(config).unwrap())
                .unwrap(),
        }
    }

    /// A JS/WASM interface for `Simulation.post`, which uses a YAML
    /// representation of the simulation configuration.
    pub fn post_yaml(config: &str) -> Self {
        set_panic_hook();
        Self {
            simulation: CoreSimulation::post(SimulationConfig::from_yaml(config).unwrap())
                .unwrap(),
        }
    }

    /// Get a JSON representation of the simulation configuration.
    pub fn get_json(&self) -> String {
        self.simulation.config().to_json().unwrap()
    }

    /// Get a YAML representation of the simulation configuration.
    pub fn get_yaml(&self) -> String {
        self.simulation.config().to_yaml().unwrap()
    }

    /// Process one event, returning it as JSON.
    pub fn step_json(&mut self) -> String {
        serde_json::to_string(&self.simulation.step().unwrap()).unwrap()
    }

    /// Run to completion, returning the statistics as JSON.
    pub fn run_json(&mut self) -> String {
        serde_json::to_string(&self.simulation.run().unwrap()).unwrap()
    }

    /// The history recorded so far, as a JSON array of samples.
    pub fn history_json(&self) -> String {
        serde_json::to_string(self.simulation.history()).unwrap()
    }

    /// A JS/WASM interface for `Simulation.history`, which converts the
    /// samples to a JavaScript Array.
    pub fn history_js(&self) -> Array {
        self.simulation
            .history()
            .iter()
            .copied()
            .map(JsValue::from)
            .collect()
    }

    pub fn current_time(&self) -> f64 {
        self.simulation.current_time()
    }

    pub fn queue_length(&self) -> usize {
        self.simulation.queue_length()
    }

    pub fn is_busy(&self) -> bool {
        self.simulation.is_busy()
    }

    pub fn customers_served(&self) -> usize {
        self.simulation.customers_served()
    }

    pub fn is_complete(&self) -> bool {
        self.simulation.is_complete()
    }
}
