//! The four pipeline tasks.
//!
//! Each task is a plain `async fn` loop that never returns; one cycle of
//! each loop is exposed separately (`*_cycle`) so the behaviour of a
//! single iteration can be driven and inspected without a scheduler.
//!
//! Priority order, highest first: actuation, decision, sensing,
//! reporting. All four run on the same core so the fixed priorities
//! decide who preempts whom.

pub mod actuation;
pub mod decision;
pub mod reporting;
pub mod sensing;

pub use actuation::{ActuationOutcome, actuation_cycle, actuation_task};
pub use decision::{DecisionOutcome, decision_cycle, decision_task};
pub use reporting::{OverrideStatus, ReportOutcome, ReportStatus, reporting_cycle, reporting_task};
pub use sensing::{SensingOutcome, sensing_cycle, sensing_task};

/// Thread parameters for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSpec {
    /// Null-terminated; passed to FreeRTOS as-is.
    pub name: &'static str,
    pub priority: u8,
    pub stack_kb: usize,
}

impl TaskSpec {
    pub fn display_name(&self) -> &'static str {
        self.name.trim_end_matches('\0')
    }
}

pub const ACTUATION: TaskSpec = TaskSpec { name: "actuation\0", priority: 4, stack_kb: 4 };
pub const DECISION: TaskSpec = TaskSpec { name: "decision\0", priority: 3, stack_kb: 4 };
pub const SENSING: TaskSpec = TaskSpec { name: "sensing\0", priority: 2, stack_kb: 4 };
/// Formats the status line, hence the larger stack.
pub const REPORTING: TaskSpec = TaskSpec { name: "reporting\0", priority: 1, stack_kb: 6 };

pub const ALL: [TaskSpec; 4] = [ACTUATION, DECISION, SENSING, REPORTING];
