//! Runtime counters for the lossy paths of the pipeline.
//!
//! Drops never show up on the serial surface; these counters are
//! the only record of them. Lock-free, safe to bump from any task.

use core::sync::atomic::{AtomicU32, Ordering};

#[derive(Default)]
pub struct PipelineStats {
    samples_dropped: AtomicU32,
    invalid_samples: AtomicU32,
    commands_dropped: AtomicU32,
    overrides_dropped: AtomicU32,
    reports_skipped: AtomicU32,
}

/// Plain copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub samples_dropped: u32,
    pub invalid_samples: u32,
    pub commands_dropped: u32,
    pub overrides_dropped: u32,
    pub reports_skipped: u32,
}

impl PipelineStats {
    pub const fn new() -> Self {
        Self {
            samples_dropped: AtomicU32::new(0),
            invalid_samples: AtomicU32::new(0),
            commands_dropped: AtomicU32::new(0),
            overrides_dropped: AtomicU32::new(0),
            reports_skipped: AtomicU32::new(0),
        }
    }

    pub fn sample_dropped(&self) -> u32 {
        bump(&self.samples_dropped)
    }

    pub fn invalid_sample(&self) -> u32 {
        bump(&self.invalid_samples)
    }

    pub fn command_dropped(&self) -> u32 {
        bump(&self.commands_dropped)
    }

    pub fn override_dropped(&self) -> u32 {
        bump(&self.overrides_dropped)
    }

    pub fn report_skipped(&self) -> u32 {
        bump(&self.reports_skipped)
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            samples_dropped: self.samples_dropped.load(Ordering::Relaxed),
            invalid_samples: self.invalid_samples.load(Ordering::Relaxed),
            commands_dropped: self.commands_dropped.load(Ordering::Relaxed),
            overrides_dropped: self.overrides_dropped.load(Ordering::Relaxed),
            reports_skipped: self.reports_skipped.load(Ordering::Relaxed),
        }
    }
}

/// Increment and return the new count.
fn bump(counter: &AtomicU32) -> u32 {
    counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
}
