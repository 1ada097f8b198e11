//! WASM bindings for Pulsenet Core.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmPulseNet } from 'pulsenet_core';
//!
//! await init();
//!
//! const modules = `
//!   broadcaster -> a, b
//!   %a -> inv
//!   %b -> con
//!   &con -> output
//!   &inv -> con
//! `;
//!
//! const net = new WasmPulseNet(modules);
//! for (let i = 0; i < 1000; i++) net.press();
//! console.log(net.low_pulses * net.high_pulses);
//! ```

use wasm_bindgen::prelude::*;

use crate::network::Network;
use crate::sim::{DetectorConfig, PeriodDetector, Simulator};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// WASM-compatible pulse network simulator.
///
/// Keeps the network as parsed so that predictions always start from the
/// initial state, independent of presses made through [`WasmPulseNet::press`].
#[wasm_bindgen]
pub struct WasmPulseNet {
    initial: Network,
    simulator: Simulator,
}

#[wasm_bindgen]
impl WasmPulseNet {
    /// Create a new simulator from module-list text.
    ///
    /// # Returns
    /// A new `WasmPulseNet` instance or an error if the module list is invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(modules: &str) -> Result<WasmPulseNet, JsValue> {
        let network = Network::parse(modules).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmPulseNet {
            simulator: Simulator::new(network.clone()),
            initial: network,
        })
    }

    /// Press the button once, returning the number of pulses it produced.
    #[wasm_bindgen]
    pub fn press(&mut self) -> f64 {
        self.simulator.press().counts.total() as f64
    }

    /// Low pulses counted since creation.
    #[wasm_bindgen(getter)]
    pub fn low_pulses(&self) -> u64 {
        self.simulator.counts().low
    }

    /// High pulses counted since creation.
    #[wasm_bindgen(getter)]
    pub fn high_pulses(&self) -> u64 {
        self.simulator.counts().high
    }

    /// Presses performed since creation.
    #[wasm_bindgen(getter)]
    pub fn presses(&self) -> u64 {
        self.simulator.presses()
    }

    /// Predict the first press at which `sink` receives a low pulse.
    ///
    /// Runs on a fresh copy of the network.
    #[wasm_bindgen]
    pub fn predict_presses(&self, sink: &str, max_presses: u64) -> Result<u64, JsValue> {
        let terminal = self
            .initial
            .resolve_terminal(sink)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let terminal = self.initial.node_name(terminal).to_string();

        let config = DetectorConfig::new().with_max_presses(max_presses);
        PeriodDetector::new(config)
            .detect(self.initial.clone(), &terminal)
            .map(|report| report.presses)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
