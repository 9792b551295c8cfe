//! Structural validation of problem instances.
//!
//! Checks the integrity of resources and tasks before an
//! [`Instance`](crate::models::Instance) is built. Detects:
//! - Declared dimensions that disagree with the data
//! - Ids that are not dense `0..n` indices
//! - Negative capacities, processing times or weights
//! - Eligibility records pointing at unknown resources
//! - Tasks with no eligible resource
//! - Successor ids out of range
//! - Resources whose summed eligible weights do not fit in an `i64`
//!
//! Precedence cycles are a separate, instance-level infeasibility and are
//! detected by [`topological_order`].
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::models::{Resource, Task};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// A count disagrees with the declared `nb_tasks` / `nb_resources`.
    DimensionMismatch,
    /// An entity id does not match its position.
    IdMismatch,
    /// A resource has a negative capacity.
    NegativeCapacity,
    /// A processing time or weight is negative.
    NegativeValue,
    /// An eligibility record references a resource that doesn't exist.
    InvalidResourceReference,
    /// A task cannot run on any resource.
    NoEligibleResource,
    /// A successor id is out of range.
    InvalidSuccessor,
    /// The weights of the tasks eligible on a resource sum past `i64::MAX`.
    LoadOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn dimension(what: &str, expected: usize, found: usize) -> Self {
        Self::new(
            ValidationErrorKind::DimensionMismatch,
            format!("expected {expected} {what}, found {found}"),
        )
    }
}

/// Validates resources and tasks of a flexible cumulative instance.
///
/// Checks:
/// 1. Resource ids are `0..resources.len()` in order
/// 2. Capacities are non-negative
/// 3. Task ids are `0..tasks.len()` in order
/// 4. Every eligibility record names an existing resource
/// 5. Processing times and weights are non-negative
/// 6. Every task has at least one eligible resource
/// 7. Every successor id is a valid task id
/// 8. The load any resource can carry is representable as an `i64`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_model(resources: &[Resource], tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();

    for (index, r) in resources.iter().enumerate() {
        if r.id != index {
            errors.push(ValidationError::new(
                ValidationErrorKind::IdMismatch,
                format!("Resource at position {index} has id {}", r.id),
            ));
        }
        if r.capacity < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeCapacity,
                format!("Resource {index} has negative capacity {}", r.capacity),
            ));
        }
    }

    for (index, task) in tasks.iter().enumerate() {
        if task.id != index {
            errors.push(ValidationError::new(
                ValidationErrorKind::IdMismatch,
                format!("Task at position {index} has id {}", task.id),
            ));
        }

        if task.eligibility.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoEligibleResource,
                format!("Task {index} has no eligible resource"),
            ));
        }

        for mode in &task.eligibility {
            if mode.resource >= resources.len() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidResourceReference,
                    format!(
                        "Task {index} references unknown resource {}",
                        mode.resource
                    ),
                ));
            }
            if mode.processing_time < 0 || mode.weight < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeValue,
                    format!(
                        "Task {index} on resource {} has processing time {} and weight {}",
                        mode.resource, mode.processing_time, mode.weight
                    ),
                ));
            }
        }

        for &succ in &task.successors {
            if succ >= tasks.len() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidSuccessor,
                    format!(
                        "Task {index} references unknown successor {succ} (nb_tasks = {})",
                        tasks.len()
                    ),
                ));
            }
        }
    }

    let mut max_load: Vec<Option<i64>> = vec![Some(0); resources.len()];
    for mode in tasks.iter().flat_map(|t| &t.eligibility) {
        if let Some(slot) = max_load.get_mut(mode.resource) {
            *slot = slot.and_then(|load| load.checked_add(mode.weight.max(0)));
        }
    }
    for (index, load) in max_load.iter().enumerate() {
        if load.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::LoadOverflow,
                format!("Summed task weights on resource {index} exceed {}", i64::MAX),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Orders tasks so that every predecessor comes before its successors.
///
/// # Algorithm
/// Kahn's algorithm: repeatedly emit a task whose predecessors have all been
/// emitted. Tasks left over all have an unemitted predecessor, so walking
/// predecessors among them must revisit a task; that walk is returned as the
/// cycle, in edge order.
///
/// Successor ids must already be in range (see [`validate_model`]).
///
/// # Reference
/// Kahn (1962), "Topological sorting of large networks"
pub fn topological_order(tasks: &[Task]) -> Result<Vec<usize>, Vec<usize>> {
    let n = tasks.len();
    let mut in_degree = vec![0usize; n];
    for task in tasks {
        for &succ in &task.successors {
            in_degree[succ] += 1;
        }
    }

    let mut queue: VecDeque<usize> = (0..n).filter(|&t| in_degree[t] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(t) = queue.pop_front() {
        order.push(t);
        for &succ in &tasks[t].successors {
            in_degree[succ] -= 1;
            if in_degree[succ] == 0 {
                queue.push_back(succ);
            }
        }
    }

    if order.len() == n {
        Ok(order)
    } else {
        Err(extract_cycle(tasks, &in_degree))
    }
}

fn extract_cycle(tasks: &[Task], in_degree: &[usize]) -> Vec<usize> {
    let remaining = |t: usize| in_degree[t] > 0;

    // Reverse adjacency restricted to the leftover tasks.
    let mut predecessor: Vec<Option<usize>> = vec![None; tasks.len()];
    for task in tasks.iter().filter(|t| remaining(t.id)) {
        for &succ in &task.successors {
            if remaining(succ) && predecessor[succ].is_none() {
                predecessor[succ] = Some(task.id);
            }
        }
    }

    let Some(start) = (0..tasks.len()).find(|&t| remaining(t)) else {
        return Vec::new();
    };

    let mut seen_at = vec![usize::MAX; tasks.len()];
    let mut walk = Vec::new();
    let mut current = start;
    while seen_at[current] == usize::MAX {
        seen_at[current] = walk.len();
        walk.push(current);
        match predecessor[current] {
            Some(p) => current = p,
            None => break,
        }
    }

    let mut cycle = walk.split_off(seen_at[current].min(walk.len()));
    cycle.reverse();
    cycle
}
