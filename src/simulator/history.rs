use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// One snapshot of the queue, taken right after an event is processed.  The
/// history of a run is the ordered, append-only sequence of these samples,
/// for downstream plotting and reporting.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySample {
    pub time: f64,
    pub queue_length: usize,
    pub server_busy: bool,
}
