//! Flexible cumulative scheduling instance.
//!
//! The instance owns every task and resource, is validated once at
//! construction, and is immutable afterwards. It is shared by reference
//! across any number of concurrent schedule evaluations.
//!
//! # Reference
//! Brucker et al. (1999), "Resource-constrained project scheduling:
//! Notation, classification, models, and methods"

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Eligibility, Placement, Resource, Schedule, Task, Violation};
use crate::error::{InstanceError, InstanceResult};
use crate::validation::{topological_order, validate_model, ValidationError, ValidationErrorKind};

/// Dense instance data as laid out in the instance file.
///
/// `task_data[i][r]` is the `(processing_time, weight)` pair of task `i`
/// on resource `r`; `(0, 0)` means ineligible. Successor ids are signed so
/// that negative ids can be reported rather than rejected by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInstance {
    pub nb_tasks: usize,
    pub nb_resources: usize,
    pub capacities: Vec<i64>,
    pub task_data: Vec<Vec<(i64, i64)>>,
    pub successors: Vec<Vec<i64>>,
}

/// A validated, immutable problem instance.
///
/// Only constructible through [`Instance::new`] or [`Instance::from_raw`],
/// so every value upholds the structural and acyclicity invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instance {
    resources: Vec<Resource>,
    tasks: Vec<Task>,
    predecessors: Vec<Vec<usize>>,
    topological_order: Vec<usize>,
}

impl Instance {
    /// Builds an instance from domain types.
    ///
    /// # Errors
    /// - `MalformedInstance` if [`validate_model`] reports any issue.
    /// - `InfeasibleInstance` if the precedence graph has a cycle.
    pub fn new(resources: Vec<Resource>, tasks: Vec<Task>) -> InstanceResult<Self> {
        validate_model(&resources, &tasks).map_err(InstanceError::MalformedInstance)?;
        let topological_order =
            topological_order(&tasks).map_err(|cycle| InstanceError::InfeasibleInstance { cycle })?;

        let mut predecessors = vec![Vec::new(); tasks.len()];
        for task in &tasks {
            for &succ in &task.successors {
                predecessors[succ].push(task.id);
            }
        }

        debug!(
            "instance built: {} tasks, {} resources, {} precedence edges",
            tasks.len(),
            resources.len(),
            tasks.iter().map(|t| t.successors.len()).sum::<usize>()
        );

        Ok(Self {
            resources,
            tasks,
            predecessors,
            topological_order,
        })
    }

    /// Builds an instance from the dense file layout.
    ///
    /// Dimension checks against `nb_tasks` / `nb_resources` come first; the
    /// `(0, 0)` pairs are then dropped and the result goes through
    /// [`Instance::new`].
    pub fn from_raw(raw: RawInstance) -> InstanceResult<Self> {
        let mut errors = Vec::new();

        if raw.capacities.len() != raw.nb_resources {
            errors.push(ValidationError::dimension(
                "resource capacities",
                raw.nb_resources,
                raw.capacities.len(),
            ));
        }
        if raw.task_data.len() != raw.nb_tasks {
            errors.push(ValidationError::dimension(
                "task rows",
                raw.nb_tasks,
                raw.task_data.len(),
            ));
        }
        if raw.successors.len() != raw.nb_tasks {
            errors.push(ValidationError::dimension(
                "successor lists",
                raw.nb_tasks,
                raw.successors.len(),
            ));
        }
        for (i, row) in raw.task_data.iter().enumerate() {
            if row.len() != raw.nb_resources {
                errors.push(ValidationError::dimension(
                    &format!("(processing time, weight) pairs for task {i}"),
                    raw.nb_resources,
                    row.len(),
                ));
            }
        }
        for (i, succs) in raw.successors.iter().enumerate() {
            for &s in succs {
                if s < 0 || s as usize >= raw.nb_tasks {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidSuccessor,
                        format!(
                            "Task {i} references unknown successor {s} (nb_tasks = {})",
                            raw.nb_tasks
                        ),
                    ));
                }
            }
        }
        if !errors.is_empty() {
            return Err(InstanceError::MalformedInstance(errors));
        }

        let resources = raw
            .capacities
            .iter()
            .enumerate()
            .map(|(id, &capacity)| Resource::new(id, capacity))
            .collect();

        let tasks = raw
            .task_data
            .iter()
            .zip(&raw.successors)
            .enumerate()
            .map(|(id, (row, succs))| {
                let task = row
                    .iter()
                    .enumerate()
                    .fold(Task::new(id), |task, (r, &(pt, w))| task.with_mode(r, pt, w));
                task.with_successors(succs.iter().map(|&s| s as usize))
            })
            .collect();

        Self::new(resources, tasks)
    }

    pub fn num_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn num_resources(&self) -> usize {
        self.resources.len()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Capacity of `resource`, or `None` if it does not exist.
    pub fn capacity(&self, resource: usize) -> Option<i64> {
        self.resources.get(resource).map(|r| r.capacity)
    }

    /// Eligible `(resource, processing_time, weight)` records of `task`,
    /// sorted by resource. Empty for an unknown task.
    pub fn eligibility(&self, task: usize) -> &[Eligibility] {
        self.tasks
            .get(task)
            .map(|t| t.eligibility.as_slice())
            .unwrap_or(&[])
    }

    /// Eligibility record of `task` on `resource`, if it may run there.
    pub fn mode(&self, task: usize, resource: usize) -> Option<&Eligibility> {
        self.tasks.get(task)?.mode(resource)
    }

    /// Processing time of `task` on `resource`, if it may run there.
    pub fn processing_time(&self, task: usize, resource: usize) -> Option<i64> {
        self.mode(task, resource).map(|m| m.processing_time)
    }

    /// Successors of `task`, sorted. Empty for an unknown task.
    pub fn successors(&self, task: usize) -> &[usize] {
        self.tasks
            .get(task)
            .map(|t| t.successors.as_slice())
            .unwrap_or(&[])
    }

    /// Predecessors of `task`, sorted. Empty for an unknown task.
    pub fn predecessors(&self, task: usize) -> &[usize] {
        self.predecessors
            .get(task)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Tasks ordered so that every predecessor precedes its successors.
    pub fn topological_order(&self) -> &[usize] {
        &self.topological_order
    }

    /// Trivial horizon: sum over tasks of their longest processing time,
    /// saturating at `i64::MAX`.
    pub fn horizon(&self) -> i64 {
        self.tasks
            .iter()
            .map(Task::max_processing_time)
            .fold(0, i64::saturating_add)
    }

    /// Resolves a candidate schedule into placements.
    ///
    /// Returns every structural problem found (length mismatch, unknown or
    /// ineligible resource, negative start, completion past `i64::MAX`)
    /// instead of the placements when the schedule cannot be evaluated as
    /// given.
    pub fn resolve(&self, schedule: &Schedule) -> Result<Vec<Placement>, Vec<Violation>> {
        let n = self.num_tasks();
        if schedule.task_resources.len() != n || schedule.start_times.len() != n {
            return Err(vec![Violation::LengthMismatch {
                nb_tasks: n,
                task_resources: schedule.task_resources.len(),
                start_times: schedule.start_times.len(),
            }]);
        }

        let mut placements = Vec::with_capacity(n);
        let mut violations = Vec::new();

        for (task, (&resource, &start)) in schedule
            .task_resources
            .iter()
            .zip(&schedule.start_times)
            .enumerate()
        {
            if start < 0 {
                violations.push(Violation::NegativeStart { task, start });
            }
            if resource >= self.num_resources() {
                violations.push(Violation::UnknownResource { task, resource });
                continue;
            }
            let Some(mode) = self.mode(task, resource) else {
                violations.push(Violation::IneligibleResource { task, resource });
                continue;
            };
            if start.checked_add(mode.processing_time).is_none() {
                violations.push(Violation::StartOutOfRange { task, start });
                continue;
            }
            placements.push(Placement {
                task,
                resource,
                start,
                duration: mode.processing_time,
                weight: mode.weight,
            });
        }

        if violations.is_empty() {
            Ok(placements)
        } else {
            Err(violations)
        }
    }
}
