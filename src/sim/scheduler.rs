//! Breadth-first pulse scheduler.

use std::collections::VecDeque;
use std::ops::AddAssign;

use tracing::trace;

use crate::network::{Level, Network, NodeId, Pulse};

/// Hook invoked for every pulse as it is taken off the queue, before it is
/// delivered.
pub trait PulseObserver {
    fn on_pulse(&mut self, press: u64, pulse: &Pulse);
}

impl<F: FnMut(u64, &Pulse)> PulseObserver for F {
    fn on_pulse(&mut self, press: u64, pulse: &Pulse) {
        self(press, pulse)
    }
}

/// Observer that ignores every pulse.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PulseObserver for NoopObserver {
    fn on_pulse(&mut self, _press: u64, _pulse: &Pulse) {}
}

/// Low and high pulse tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PulseCounts {
    pub low: u64,
    pub high: u64,
}

impl PulseCounts {
    pub fn new(low: u64, high: u64) -> Self {
        Self { low, high }
    }

    pub fn record(&mut self, level: Level) {
        match level {
            Level::Low => self.low += 1,
            Level::High => self.high += 1,
        }
    }

    /// Low plus high pulses. Widened so that no pair of `u64` tallies can
    /// overflow.
    pub fn total(&self) -> u128 {
        u128::from(self.low) + u128::from(self.high)
    }

    /// Low pulses multiplied by high pulses, widened like [`Self::total`].
    pub fn product(&self) -> u128 {
        u128::from(self.low) * u128::from(self.high)
    }
}

impl AddAssign for PulseCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.low += rhs.low;
        self.high += rhs.high;
    }
}

/// Outcome of a single press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressReport {
    /// 1-based index of this press
    pub press: u64,
    /// Pulses counted during this press only
    pub counts: PulseCounts,
}

/// Drives presses over a network and keeps cumulative pulse counts.
#[derive(Debug, Clone)]
pub struct Simulator {
    /// The network being simulated
    network: Network,
    /// Pulses counted since the simulator was created
    counts: PulseCounts,
    /// Presses performed so far
    presses: u64,
}

impl Simulator {
    /// Create a new simulator for the given network.
    pub fn new(network: Network) -> Self {
        Self {
            network,
            counts: PulseCounts::default(),
            presses: 0,
        }
    }

    /// Press the button once and propagate until no pulses remain.
    pub fn press(&mut self) -> PressReport {
        self.press_observed(&mut NoopObserver)
    }

    /// Press the button once, reporting every dequeued pulse to `observer`.
    ///
    /// Pulses are delivered strictly first-in first-out: the pulses a module
    /// emits are queued, in target-list order, behind everything already in
    /// flight. Pulses to sinks are counted and dropped.
    pub fn press_observed<O: PulseObserver + ?Sized>(&mut self, observer: &mut O) -> PressReport {
        self.presses += 1;
        let press = self.presses;

        let mut queue = VecDeque::from([Pulse::new(
            NodeId::BUTTON,
            self.network.broadcaster,
            Level::Low,
        )]);
        let mut counts = PulseCounts::default();

        while let Some(pulse) = queue.pop_front() {
            counts.record(pulse.level);
            observer.on_pulse(press, &pulse);

            trace!(
                press,
                from = self.network.node_name(pulse.source),
                to = self.network.node_name(pulse.destination),
                level = %pulse.level,
                "pulse"
            );

            if let Some(module) = self.network.module_mut(pulse.destination) {
                queue.extend(module.fire(pulse.source, pulse.level));
            }
        }

        self.counts += counts;
        PressReport { press, counts }
    }

    /// Press the button `presses` times and return the cumulative counts.
    pub fn run(&mut self, presses: u64) -> PulseCounts {
        for _ in 0..presses {
            self.press();
        }
        self.counts
    }

    /// Cumulative pulse counts.
    pub fn counts(&self) -> PulseCounts {
        self.counts
    }

    /// Number of presses performed.
    pub fn presses(&self) -> u64 {
        self.presses
    }

    /// Get a reference to the network.
    pub fn network(&self) -> &Network {
        &self.network
    }
}

/// Product of low and high pulse totals after `presses` presses.
pub fn pulse_product(network: Network, presses: u64) -> u128 {
    Simulator::new(network).run(presses).product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::Module;
    use proptest::prelude::*;

    const TWO_TOGGLES: &str = "broadcaster -> a, b\n%a -> inv\n%b -> con\n&con -> output\n&inv -> con\n";
    const THREE_TOGGLES: &str = "broadcaster -> a, b, c\n%a -> b\n%b -> c\n%c -> inv\n&inv -> a\n";
    const INVERTER: &str = "broadcaster -> a\n%a -> inv, con\n&inv -> b\n%b -> con\n&con -> output\n";

    fn simulator(input: &str) -> Simulator {
        Simulator::new(Network::parse(input).unwrap())
    }

    #[test]
    fn test_single_press_counts() {
        let mut sim = simulator(TWO_TOGGLES);
        let report = sim.press();
        assert_eq!(report.press, 1);
        assert_eq!(report.counts, PulseCounts::new(4, 4));

        let mut sim = simulator(THREE_TOGGLES);
        assert_eq!(sim.press().counts, PulseCounts::new(8, 4));
    }

    #[test]
    fn test_counts_accumulate() {
        let mut sim = simulator(TWO_TOGGLES);
        assert_eq!(sim.run(4), PulseCounts::new(19, 13));
        assert_eq!(sim.presses(), 4);

        let mut sim = simulator(THREE_TOGGLES);
        assert_eq!(sim.run(4), PulseCounts::new(32, 16));
    }

    #[test]
    fn test_pulse_product_thousand_presses() {
        let net = Network::parse(THREE_TOGGLES).unwrap();
        assert_eq!(pulse_product(net, 1000), 32_000_000);

        let net = Network::parse(INVERTER).unwrap();
        assert_eq!(pulse_product(net, 1000), 11_687_500);

        let net = Network::parse(TWO_TOGGLES).unwrap();
        assert_eq!(pulse_product(net, 1000), 4999 * 3001);
    }

    #[test]
    fn test_counts_do_not_overflow() {
        let counts = PulseCounts::new(u64::MAX, u64::MAX);
        let max = u128::from(u64::MAX);
        assert_eq!(counts.product(), max * max);
        assert_eq!(counts.total(), 2 * max);
        assert_eq!(PulseCounts::new(u64::MAX, 2).product(), 2 * max);
    }

    #[test]
    fn test_delivery_is_breadth_first() {
        let mut sim = simulator(TWO_TOGGLES);
        let mut seen = Vec::new();
        sim.press_observed(&mut |_press: u64, pulse: &Pulse| seen.push(*pulse));

        let net = sim.network();
        let order: Vec<_> = seen
            .iter()
            .map(|p| {
                format!(
                    "{} -{}-> {}",
                    net.node_name(p.source),
                    p.level,
                    net.node_name(p.destination)
                )
            })
            .collect();
        assert_eq!(
            order,
            vec![
                "button -low-> broadcaster",
                "broadcaster -low-> a",
                "broadcaster -low-> b",
                "a -high-> inv",
                "b -high-> con",
                "inv -low-> con",
                "con -high-> output",
                "con -high-> output",
            ]
        );
    }

    #[test]
    fn test_sink_pulses_counted_without_state() {
        let mut sim = simulator("broadcaster -> nowhere, a\n%a -> nowhere");
        assert_eq!(sim.press().counts, PulseCounts::new(3, 1));
        let net = sim.network();
        let nowhere = net.find_node("nowhere").unwrap();
        assert!(net.module(nowhere).is_none());
        assert_eq!(net.sinks(), vec!["nowhere"]);
    }

    #[test]
    fn test_toggle_state_after_press() {
        let mut sim = simulator(TWO_TOGGLES);
        sim.press();
        let Some(Module::Toggle(a)) = sim.network().module_by_name("a") else {
            panic!("a should be a toggle");
        };
        assert!(a.is_on());

        sim.press();
        let Some(Module::Toggle(a)) = sim.network().module_by_name("a") else {
            panic!("a should be a toggle");
        };
        assert!(!a.is_on());
    }

    fn snapshot(sim: &Simulator) -> String {
        format!("{:?} {:?}", sim.network().modules, sim.counts())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Replaying the same presses from the same initial network gives
        /// identical module state and counts.
        #[test]
        fn replay_is_deterministic(
            which in 0usize..3,
            presses in 1u64..64,
        ) {
            let input = [TWO_TOGGLES, THREE_TOGGLES, INVERTER][which];
            let network = Network::parse(input).unwrap();

            let mut first = Simulator::new(network.clone());
            let mut second = Simulator::new(network);
            first.run(presses);
            second.run(presses);

            prop_assert_eq!(first.counts(), second.counts());
            prop_assert_eq!(snapshot(&first), snapshot(&second));
        }
    }
}
