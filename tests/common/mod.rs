//! Shared utilities for integration tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use loggate::environment::{EnvironmentResolver, MapSignals, SignalNames};
use loggate::level::{LogLevelController, ManualClock};
use loggate::sink::MemorySink;
use loggate::Logger;

/// Build an in-memory signal set from key/value pairs.
pub fn signals(pairs: &[(&str, &str)]) -> MapSignals {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

/// Fixed starting instant for clock-driven tests.
#[allow(dead_code)]
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 3, 15, 9, 0, 0).unwrap()
}

/// A logger wired to a recording sink and a manual clock.
pub struct Harness {
    pub logger: Logger,
    pub sink: MemorySink,
    pub clock: ManualClock,
}

/// Create a harness over `pairs`, optionally forcing configure-once.
#[allow(dead_code)]
pub fn harness_with(pairs: &[(&str, &str)], finalize: Option<bool>) -> Harness {
    let sink = MemorySink::new();
    let clock = ManualClock::new(epoch());
    let resolver = EnvironmentResolver::new(Arc::new(signals(pairs)), SignalNames::default());

    let mut controller = LogLevelController::new(resolver).with_clock(Arc::new(clock.clone()));
    if let Some(finalize) = finalize {
        controller = controller.with_finalize_after_first(finalize);
    }

    Harness {
        logger: Logger::new(controller, Arc::new(sink.clone())),
        sink,
        clock,
    }
}

#[allow(dead_code)]
pub fn harness(pairs: &[(&str, &str)]) -> Harness {
    harness_with(pairs, None)
}
