//! Task model.
//!
//! A task runs on exactly one of its eligible resources. Each eligible
//! resource has its own processing time and weight (capacity units consumed
//! while the task runs). Successor edges require the task to finish before
//! any successor starts.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4.6

use serde::{Deserialize, Serialize};

/// Processing time and weight of a task on one eligible resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    /// Resource the task may run on.
    pub resource: usize,
    /// Duration on this resource. Zero means the task is instantaneous here.
    pub processing_time: i64,
    /// Capacity units consumed while running on this resource.
    pub weight: i64,
}

impl Eligibility {
    /// Creates an eligibility record.
    pub fn new(resource: usize, processing_time: i64, weight: i64) -> Self {
        Self {
            resource,
            processing_time,
            weight,
        }
    }

    /// A `(0, 0)` pair encodes "cannot run on this resource".
    #[inline]
    pub fn is_eligible_pair(processing_time: i64, weight: i64) -> bool {
        processing_time != 0 || weight != 0
    }
}

/// A task to be scheduled.
///
/// `eligibility` is kept sorted by resource id with at most one record per
/// resource; `successors` is sorted and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task index (`0..nb_tasks`).
    pub id: usize,
    /// Eligible resources with their processing time and weight.
    pub eligibility: Vec<Eligibility>,
    /// Tasks that may only start once this task has finished.
    pub successors: Vec<usize>,
}

impl Task {
    /// Creates a task with no eligible resources and no successors.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            eligibility: Vec::new(),
            successors: Vec::new(),
        }
    }

    /// Makes the task eligible on `resource`.
    ///
    /// A `(0, 0)` pair is ignored. A second record for the same resource
    /// replaces the first.
    pub fn with_mode(mut self, resource: usize, processing_time: i64, weight: i64) -> Self {
        if !Eligibility::is_eligible_pair(processing_time, weight) {
            return self;
        }
        let record = Eligibility::new(resource, processing_time, weight);
        match self
            .eligibility
            .binary_search_by_key(&resource, |e| e.resource)
        {
            Ok(pos) => self.eligibility[pos] = record,
            Err(pos) => self.eligibility.insert(pos, record),
        }
        self
    }

    /// Adds a successor.
    pub fn with_successor(mut self, successor: usize) -> Self {
        if let Err(pos) = self.successors.binary_search(&successor) {
            self.successors.insert(pos, successor);
        }
        self
    }

    /// Adds several successors.
    pub fn with_successors(self, successors: impl IntoIterator<Item = usize>) -> Self {
        successors
            .into_iter()
            .fold(self, |task, s| task.with_successor(s))
    }

    /// Eligibility record for `resource`, if the task may run there.
    pub fn mode(&self, resource: usize) -> Option<&Eligibility> {
        self.eligibility
            .binary_search_by_key(&resource, |e| e.resource)
            .ok()
            .map(|pos| &self.eligibility[pos])
    }

    /// Whether the task may run on `resource`.
    pub fn is_eligible_on(&self, resource: usize) -> bool {
        self.mode(resource).is_some()
    }

    /// Longest processing time over eligible resources (0 if none).
    pub fn max_processing_time(&self) -> i64 {
        self.eligibility
            .iter()
            .map(|e| e.processing_time)
            .max()
            .unwrap_or(0)
    }
}
