//! Host-side timing analysis of a captured status-line stream.
//!
//! Feed it raw lines read from the serial link; non-status lines (the boot
//! banner, partial lines) are skipped. Intervals are taken between the
//! `Time:` ticks of consecutive reports, with wrapping arithmetic so a
//! tick-counter rollover does not produce a bogus interval.

use core::fmt;

use crate::app::report::{StatusReport, parse_status_line};
use crate::app::state::SystemState;

/// Allowed deviation of the mean interval from the reporting period.
pub const MEAN_TOLERANCE_MS: f64 = 100.0;
/// Jitter ceiling (sample standard deviation of intervals).
pub const MAX_JITTER_MS: f64 = 50.0;
/// Any interval at or above this counts as a missed deadline.
pub const MAX_INTERVAL_MS: u32 = 1_500;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalStats {
    pub count: usize,
    pub mean_ms: f64,
    pub std_dev_ms: f64,
    pub min_ms: u32,
    pub max_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureRange {
    pub min_c: f32,
    pub max_c: f32,
    pub mean_c: f64,
    /// Sample standard deviation; 0 for a single report.
    pub std_dev_c: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingVerdict {
    pub period_ok: bool,
    pub jitter_ok: bool,
    pub no_missed_deadlines: bool,
}

impl TimingVerdict {
    pub fn passed(&self) -> bool {
        self.period_ok && self.jitter_ok && self.no_missed_deadlines
    }
}

impl fmt::Display for TimingVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |ok: bool| if ok { "PASS" } else { "FAIL" };
        write!(
            f,
            "period {}, jitter {}, deadlines {}",
            mark(self.period_ok),
            mark(self.jitter_ok),
            mark(self.no_missed_deadlines)
        )
    }
}

#[derive(Debug, Default, Clone)]
pub struct ReportAnalyzer {
    reports: Vec<StatusReport>,
}

impl ReportAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and record one line. Returns whether it was a status line.
    pub fn push_line(&mut self, line: &str) -> bool {
        match parse_status_line(line) {
            Some(report) => {
                self.reports.push(report);
                true
            }
            None => false,
        }
    }

    pub fn push(&mut self, report: StatusReport) {
        self.reports.push(report);
    }

    pub fn reports(&self) -> &[StatusReport] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn intervals(&self) -> impl Iterator<Item = u32> + '_ {
        self.reports.windows(2).map(|w| w[1].tick.wrapping_sub(w[0].tick))
    }

    /// `None` with fewer than two reports.
    pub fn interval_stats(&self) -> Option<IntervalStats> {
        let intervals: Vec<u32> = self.intervals().collect();
        if intervals.is_empty() {
            return None;
        }

        let count = intervals.len();
        let mean_ms = intervals.iter().map(|&i| i as f64).sum::<f64>() / count as f64;
        let std_dev_ms = if count > 1 {
            let ss: f64 = intervals.iter().map(|&i| (i as f64 - mean_ms).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        } else {
            0.0
        };

        Some(IntervalStats {
            count,
            mean_ms,
            std_dev_ms,
            min_ms: intervals.iter().copied().min().unwrap_or(0),
            max_ms: intervals.iter().copied().max().unwrap_or(0),
        })
    }

    /// Report count per state, indexed by ordinal.
    pub fn state_distribution(&self) -> [usize; SystemState::COUNT] {
        let mut counts = [0; SystemState::COUNT];
        for r in &self.reports {
            counts[r.state.ordinal() as usize] += 1;
        }
        counts
    }

    pub fn temperature_range(&self) -> Option<TemperatureRange> {
        let first = self.reports.first()?.temperature_c;
        let count = self.reports.len();
        let (min_c, max_c, sum) = self.reports.iter().fold((first, first, 0.0f64), |(lo, hi, sum), r| {
            (lo.min(r.temperature_c), hi.max(r.temperature_c), sum + r.temperature_c as f64)
        });
        let mean_c = sum / count as f64;
        let std_dev_c = if count > 1 {
            let ss: f64 = self.reports.iter().map(|r| (r.temperature_c as f64 - mean_c).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        } else {
            0.0
        };
        Some(TemperatureRange { min_c, max_c, mean_c, std_dev_c })
    }

    /// Judge the capture against a reporting period of `period_ms`.
    pub fn check(&self, period_ms: u32) -> Option<TimingVerdict> {
        let stats = self.interval_stats()?;
        Some(TimingVerdict {
            period_ok: (stats.mean_ms - period_ms as f64).abs() < MEAN_TOLERANCE_MS,
            jitter_ok: stats.std_dev_ms < MAX_JITTER_MS,
            no_missed_deadlines: stats.max_ms < MAX_INTERVAL_MS,
        })
    }
}
