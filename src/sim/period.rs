//! Period detection for the inputs of a terminal module.
//!
//! Each input of the terminal is assumed to emit a high pulse on a fixed
//! cycle whose length equals the press at which it first does so. The press
//! at which all inputs line up is then the least common multiple of those
//! first presses. The assumption holds for counter-shaped subnetworks but is
//! not guaranteed in general, so the detector can keep pressing until each
//! input emits high a second time and report any input whose second
//! emission does not land exactly one period later.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::math::lcm_all;
use super::scheduler::{PulseObserver, Simulator};
use super::DEFAULT_MAX_PRESSES;
use crate::error::{PulseNetError, Result};
use crate::network::{Network, NodeId, Pulse};

/// Configuration for the period detector.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Presses after which detection gives up.
    pub max_presses: u64,
    /// Wait for a second high emission from every input.
    pub verify: bool,
    /// Fail instead of reporting when a period cannot be verified.
    pub strict: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_presses: DEFAULT_MAX_PRESSES,
            verify: true,
            strict: false,
        }
    }
}

impl DetectorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the press cap.
    pub fn with_max_presses(mut self, max_presses: u64) -> Self {
        self.max_presses = max_presses;
        self
    }

    /// Enable or disable the second-emission check.
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Turn unverified periods into errors. Implies `verify`.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        if strict {
            self.verify = true;
        }
        self
    }
}

/// Outcome of the second-emission check for one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// Second high emission landed exactly one period after the first
    Verified,
    /// Second high emission landed somewhere else
    Mismatch { second: u64 },
    /// Press cap reached before a second high emission
    Unobserved,
    /// Verification was disabled
    Skipped,
}

/// Period recorded for one input of the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodCheck {
    pub id: NodeId,
    pub module: String,
    /// Press at which the input first emitted high
    pub period: u64,
    pub verification: Verification,
}

impl PeriodCheck {
    fn second(&self) -> Option<u64> {
        match self.verification {
            Verification::Verified => Some(self.period * 2),
            Verification::Mismatch { second } => Some(second),
            Verification::Unobserved | Verification::Skipped => None,
        }
    }
}

/// Result of a period detection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodReport {
    /// Name of the module whose inputs were watched
    pub terminal: String,
    /// One entry per input, in declaration order
    pub periods: Vec<PeriodCheck>,
    /// Predicted first press at which every input is high together
    pub presses: u64,
    /// Presses actually simulated
    pub simulated: u64,
}

impl PeriodReport {
    /// Check whether every period was confirmed by a second emission.
    pub fn is_verified(&self) -> bool {
        self.periods
            .iter()
            .all(|p| p.verification == Verification::Verified)
    }

    /// Periods that were not confirmed.
    pub fn unverified(&self) -> impl Iterator<Item = &PeriodCheck> {
        self.periods
            .iter()
            .filter(|p| p.verification != Verification::Verified)
    }
}

/// Records the presses at which watched modules emit high pulses.
struct HighTracker {
    slots: HashMap<NodeId, usize>,
    first: Vec<Option<u64>>,
    second: Vec<Option<u64>>,
}

impl HighTracker {
    fn new(watched: &[NodeId]) -> Self {
        Self {
            slots: watched.iter().enumerate().map(|(i, &id)| (id, i)).collect(),
            first: vec![None; watched.len()],
            second: vec![None; watched.len()],
        }
    }

    fn done(&self, verify: bool) -> bool {
        self.first.iter().all(Option::is_some) && (!verify || self.second.iter().all(Option::is_some))
    }
}

impl PulseObserver for HighTracker {
    fn on_pulse(&mut self, press: u64, pulse: &Pulse) {
        if !pulse.level.is_high() {
            return;
        }
        let Some(&slot) = self.slots.get(&pulse.source) else {
            return;
        };
        match self.first[slot] {
            None => self.first[slot] = Some(press),
            Some(first) if first != press && self.second[slot].is_none() => {
                self.second[slot] = Some(press)
            }
            _ => {}
        }
    }
}

/// Predicts when a terminal module first sees all of its inputs high.
#[derive(Debug, Clone, Default)]
pub struct PeriodDetector {
    config: DetectorConfig,
}

impl PeriodDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Run the network from its current state, watching the inputs of
    /// `terminal`.
    pub fn detect(&self, network: Network, terminal: &str) -> Result<PeriodReport> {
        let terminal_id = network
            .find_node(terminal)
            .ok_or_else(|| PulseNetError::not_found(terminal))?;

        let watched = network.predecessors(terminal_id);
        if watched.is_empty() {
            return Err(PulseNetError::NoPredecessors {
                name: terminal.to_string(),
            });
        }
        debug!(terminal, inputs = watched.len(), "detecting input periods");

        let mut tracker = HighTracker::new(&watched);
        let mut sim = Simulator::new(network);

        while !tracker.done(self.config.verify) && sim.presses() < self.config.max_presses {
            let press = sim.press_observed(&mut tracker).press;
            for (slot, &id) in watched.iter().enumerate() {
                if tracker.first[slot] == Some(press) {
                    info!(module = sim.network().node_name(id), period = press, "period recorded");
                }
            }
        }

        let network = sim.network();
        let mut periods = Vec::with_capacity(watched.len());
        for (slot, &id) in watched.iter().enumerate() {
            let module = network.node_name(id).to_string();
            let period = tracker.first[slot].ok_or_else(|| PulseNetError::NoPeriodFound {
                module: module.clone(),
                presses: sim.presses(),
            })?;

            let verification = match (self.config.verify, tracker.second[slot]) {
                (false, _) => Verification::Skipped,
                (true, None) => Verification::Unobserved,
                (true, Some(second)) if second == period * 2 => Verification::Verified,
                (true, Some(second)) => Verification::Mismatch { second },
            };

            periods.push(PeriodCheck {
                id,
                module,
                period,
                verification,
            });
        }

        for check in periods
            .iter()
            .filter(|p| !matches!(p.verification, Verification::Verified | Verification::Skipped))
        {
            warn!(
                module = %check.module,
                period = check.period,
                verification = ?check.verification,
                "period could not be verified"
            );
            if self.config.strict {
                return Err(PulseNetError::UnverifiedPeriod {
                    module: check.module.clone(),
                    first: check.period,
                    second: check.second(),
                });
            }
        }

        let presses = lcm_all(periods.iter().map(|p| p.period))?;
        debug!(terminal, presses, simulated = sim.presses(), "period detection finished");

        Ok(PeriodReport {
            terminal: terminal.to_string(),
            periods,
            presses,
            simulated: sim.presses(),
        })
    }
}

/// Predict the first press at which every input of `terminal` is high.
pub fn predict_presses(network: Network, terminal: &str, config: DetectorConfig) -> Result<u64> {
    PeriodDetector::new(config)
        .detect(network, terminal)
        .map(|report| report.presses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Level;

    /// A period-2 inverter (`p1`) and a mod-3 counter (`p2`) feeding `con`.
    const COUNTERS: &str = "\
broadcaster -> t1, b0
%t1 -> p1
&p1 -> con
%b0 -> b1, g
%b1 -> g
&g -> b0, p2
&p2 -> con
&con -> rx
";

    /// `q` first emits high at press 2, then every third press.
    const DRIFTING: &str = "\
broadcaster -> c0
%c0 -> c1
%c1 -> h
&h -> c0, q
&q -> term
&term -> rx
";

    /// The drifting `q` next to a mod-3 counter `p2`. `q` stays high in
    /// `term`'s memory between emissions, so `rx` sees low at press 3.
    const DRIFTING_PAIR: &str = "\
broadcaster -> c0, b0
%c0 -> c1
%c1 -> h
&h -> c0, q
&q -> term
%b0 -> b1, g
%b1 -> g
&g -> b0, p2
&p2 -> term
&term -> rx
";

    fn network(input: &str) -> Network {
        Network::parse(input).unwrap()
    }

    /// First press at which `sink` receives a low pulse, by direct simulation.
    fn brute_force(network: Network, sink: &str, max: u64) -> Option<u64> {
        let sink = network.find_node(sink)?;
        let mut sim = Simulator::new(network);
        let mut hit = None;
        while hit.is_none() && sim.presses() < max {
            sim.press_observed(&mut |press: u64, pulse: &Pulse| {
                if pulse.destination == sink && pulse.level == Level::Low && hit.is_none() {
                    hit = Some(press);
                }
            });
        }
        hit
    }

    #[test]
    fn test_detects_counter_periods() {
        let report = PeriodDetector::default().detect(network(COUNTERS), "con").unwrap();
        let found: Vec<_> = report
            .periods
            .iter()
            .map(|p| (p.module.as_str(), p.period, p.verification))
            .collect();
        assert_eq!(
            found,
            vec![
                ("p1", 2, Verification::Verified),
                ("p2", 3, Verification::Verified),
            ]
        );
        assert_eq!(report.presses, 6);
        assert_eq!(report.simulated, 6);
        assert!(report.is_verified());
    }

    #[test]
    fn test_prediction_matches_brute_force() {
        let net = network(COUNTERS);
        let predicted = predict_presses(net.clone(), "con", DetectorConfig::new()).unwrap();
        assert_eq!(brute_force(net, "rx", 100), Some(predicted));
    }

    #[test]
    fn test_drifting_prediction_disagrees_with_brute_force() {
        let net = network(DRIFTING_PAIR);
        let report = PeriodDetector::default().detect(net.clone(), "term").unwrap();
        let found: Vec<_> = report
            .periods
            .iter()
            .map(|p| (p.module.as_str(), p.period, p.verification))
            .collect();
        assert_eq!(
            found,
            vec![
                ("q", 2, Verification::Mismatch { second: 5 }),
                ("p2", 3, Verification::Verified),
            ]
        );
        assert_eq!(report.presses, 6);
        assert_eq!(brute_force(net, "rx", 100), Some(3));
    }

    #[test]
    fn test_sink_resolves_to_terminal_gate() {
        let net = network(COUNTERS);
        let terminal = net.resolve_terminal("rx").unwrap();
        let name = net.node_name(terminal).to_string();
        assert_eq!(name, "con");
        assert_eq!(predict_presses(net, &name, DetectorConfig::new()).unwrap(), 6);
    }

    #[test]
    fn test_without_verification_stops_at_first_emissions() {
        let config = DetectorConfig::new().with_verify(false);
        let report = PeriodDetector::new(config).detect(network(COUNTERS), "con").unwrap();
        assert_eq!(report.simulated, 3);
        assert_eq!(report.presses, 6);
        assert!(report
            .periods
            .iter()
            .all(|p| p.verification == Verification::Skipped));
        assert!(!report.is_verified());
    }

    #[test]
    fn test_drifting_period_is_reported() {
        let report = PeriodDetector::default().detect(network(DRIFTING), "term").unwrap();
        assert_eq!(report.periods[0].period, 2);
        assert_eq!(report.periods[0].verification, Verification::Mismatch { second: 5 });
        assert_eq!(report.unverified().count(), 1);
        assert_eq!(report.presses, 2);
    }

    #[test]
    fn test_drifting_period_fails_when_strict() {
        let config = DetectorConfig::new().with_strict(true);
        let err = PeriodDetector::new(config)
            .detect(network(DRIFTING), "term")
            .unwrap_err();
        assert!(matches!(
            err,
            PulseNetError::UnverifiedPeriod { first: 2, second: Some(5), .. }
        ));
    }

    #[test]
    fn test_unobserved_second_emission() {
        let config = DetectorConfig::new().with_max_presses(4);
        let report = PeriodDetector::new(config).detect(network(COUNTERS), "con").unwrap();
        assert_eq!(report.periods[0].verification, Verification::Verified);
        assert_eq!(report.periods[1].verification, Verification::Unobserved);
        assert_eq!(report.simulated, 4);
    }

    #[test]
    fn test_no_period_found() {
        // `g` only ever sees low from the broadcaster, so it always emits
        // high and `n` never toggles.
        let net = network("broadcaster -> g\n&g -> n\n%n -> term\n&term -> rx");
        let config = DetectorConfig::new().with_max_presses(50);
        let err = PeriodDetector::new(config).detect(net, "term").unwrap_err();
        assert!(matches!(
            err,
            PulseNetError::NoPeriodFound { ref module, presses: 50 } if module == "n"
        ));
    }

    #[test]
    fn test_terminal_without_inputs() {
        let net = network("broadcaster -> a\n%a -> b");
        assert!(matches!(
            PeriodDetector::default().detect(net.clone(), "broadcaster"),
            Err(PulseNetError::NoPredecessors { .. })
        ));
        assert!(matches!(
            PeriodDetector::default().detect(net, "missing"),
            Err(PulseNetError::ModuleNotFound { .. })
        ));
    }
}
