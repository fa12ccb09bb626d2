use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{DeadlineZone, Evaluator};

/// Source of "now" for lifecycle evaluation.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Hands out evaluators pinned to the clock's current instant.
#[derive(Clone)]
pub struct LifecycleClock {
    clock: Arc<dyn Clock>,
    zone: DeadlineZone,
}

impl LifecycleClock {
    pub fn new(clock: Arc<dyn Clock>, zone: DeadlineZone) -> Self {
        Self { clock, zone }
    }

    pub fn system(zone: DeadlineZone) -> Self {
        Self::new(Arc::new(SystemClock), zone)
    }

    pub fn evaluator(&self) -> Evaluator {
        Evaluator::new(self.clock.now(), self.zone)
    }
}
