//! Candidate schedules and constraint violations.
//!
//! A [`Schedule`] is the decision-variable surface an external search
//! procedure produces: one resource and one start time per task. Resolving
//! it against an [`Instance`](super::Instance) yields [`Placement`]s, each
//! carrying the half-open usage interval `[start, start + duration)`.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use std::fmt;

use serde::{Deserialize, Serialize};

/// A candidate solution: resource and start time per task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Chosen resource for task `i`.
    pub task_resources: Vec<usize>,
    /// Start time of task `i`.
    pub start_times: Vec<i64>,
}

impl Schedule {
    /// Creates a schedule from its two decision vectors.
    pub fn new(task_resources: Vec<usize>, start_times: Vec<i64>) -> Self {
        Self {
            task_resources,
            start_times,
        }
    }
}

/// A task resolved onto its chosen resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub task: usize,
    pub resource: usize,
    pub start: i64,
    pub duration: i64,
    pub weight: i64,
}

impl Placement {
    /// Completion time (exclusive end of the usage interval).
    ///
    /// Saturates at `i64::MAX`; placements built by `Instance::resolve`
    /// never reach it.
    #[inline]
    pub fn end(&self) -> i64 {
        self.start.saturating_add(self.duration)
    }

    /// Whether the placement occupies capacity at some instant.
    ///
    /// Zero-duration intervals are empty; zero-weight tasks use nothing.
    #[inline]
    pub fn consumes_capacity(&self) -> bool {
        self.duration > 0 && self.weight > 0
    }

    /// Whether the usage interval intersects `[start, end)`.
    #[inline]
    pub fn overlaps(&self, start: i64, end: i64) -> bool {
        self.duration > 0 && self.start < end && start < self.end()
    }
}

/// Classification of constraint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// The candidate is structurally unusable (length, resource, start).
    InvalidSchedule,
    /// A successor starts before its predecessor finished.
    PrecedenceViolation,
    /// A resource is loaded beyond its capacity.
    CapacityViolation,
}

/// A constraint violation found in a candidate schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum Violation {
    /// Decision vectors do not both have one entry per task.
    LengthMismatch {
        nb_tasks: usize,
        task_resources: usize,
        start_times: usize,
    },
    /// The chosen resource id does not exist.
    UnknownResource { task: usize, resource: usize },
    /// The task cannot run on the chosen resource.
    IneligibleResource { task: usize, resource: usize },
    /// The task starts before time zero.
    NegativeStart { task: usize, start: i64 },
    /// `start + processing_time` does not fit in an `i64`.
    StartOutOfRange { task: usize, start: i64 },
    /// Edge `predecessor → successor` is not respected.
    Precedence {
        predecessor: usize,
        successor: usize,
        predecessor_finish: i64,
        successor_start: i64,
    },
    /// Load on `resource` exceeds `capacity` over `[start, end)`.
    Capacity {
        resource: usize,
        start: i64,
        end: i64,
        peak_load: i64,
        capacity: i64,
        tasks: Vec<usize>,
    },
}

impl Violation {
    pub fn violation_type(&self) -> ViolationType {
        match self {
            Violation::LengthMismatch { .. }
            | Violation::UnknownResource { .. }
            | Violation::IneligibleResource { .. }
            | Violation::NegativeStart { .. }
            | Violation::StartOutOfRange { .. } => ViolationType::InvalidSchedule,
            Violation::Precedence { .. } => ViolationType::PrecedenceViolation,
            Violation::Capacity { .. } => ViolationType::CapacityViolation,
        }
    }

    /// Severity (0-100, higher = worse).
    pub fn severity(&self) -> i32 {
        match self.violation_type() {
            ViolationType::InvalidSchedule => 100,
            ViolationType::PrecedenceViolation => 95,
            ViolationType::CapacityViolation => 90,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::LengthMismatch {
                nb_tasks,
                task_resources,
                start_times,
            } => write!(
                f,
                "expected {nb_tasks} entries, got {task_resources} resources and {start_times} start times"
            ),
            Violation::UnknownResource { task, resource } => {
                write!(f, "task {task} assigned to unknown resource {resource}")
            }
            Violation::IneligibleResource { task, resource } => {
                write!(f, "task {task} is not eligible on resource {resource}")
            }
            Violation::NegativeStart { task, start } => {
                write!(f, "task {task} starts at negative time {start}")
            }
            Violation::StartOutOfRange { task, start } => {
                write!(f, "task {task} cannot finish when started at {start}")
            }
            Violation::Precedence {
                predecessor,
                successor,
                predecessor_finish,
                successor_start,
            } => write!(
                f,
                "task {successor} starts at {successor_start} before predecessor {predecessor} finishes at {predecessor_finish}"
            ),
            Violation::Capacity {
                resource,
                start,
                end,
                peak_load,
                capacity,
                tasks,
            } => write!(
                f,
                "resource {resource} loaded to {peak_load} > {capacity} over [{start}, {end}) by tasks {tasks:?}"
            ),
        }
    }
}
