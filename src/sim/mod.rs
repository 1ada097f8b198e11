//! Pulse propagation and period detection.
//!
//! A press injects one low pulse from the button into the broadcaster and
//! runs until no pulses remain in flight. Pulses are processed in strict
//! first-in first-out order; the order in which a toggle sees its inputs
//! decides its state, so delivery order is part of the result, not an
//! implementation detail.
//!
//! Two queries are built on top of presses:
//! - [`pulse_product`]: low pulses times high pulses over a number of presses
//! - [`PeriodDetector`]: the first press at which a terminal module sees all
//!   of its inputs high, extrapolated from the periods of those inputs

mod math;
mod period;
mod scheduler;

pub use math::{gcd, lcm, lcm_all};
pub use period::{predict_presses, DetectorConfig, PeriodCheck, PeriodDetector, PeriodReport, Verification};
pub use scheduler::{pulse_product, NoopObserver, PressReport, PulseCounts, PulseObserver, Simulator};

/// Press cap for period detection.
pub const DEFAULT_MAX_PRESSES: u64 = 100_000;
