//! Cumulative resource model.
//!
//! A cumulative resource offers a fixed number of capacity units that are
//! shared by every task running on it at the same instant.
//!
//! # Reference
//! Baptiste, Le Pape & Nuijten (2001), "Constraint-Based Scheduling", Ch. 2.1

use serde::{Deserialize, Serialize};

/// A renewable resource with a cumulative capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource index (`0..nb_resources`).
    pub id: usize,
    /// Capacity units available at every instant. Must be non-negative.
    pub capacity: i64,
}

impl Resource {
    /// Creates a resource with the given capacity.
    pub fn new(id: usize, capacity: i64) -> Self {
        Self { id, capacity }
    }

    /// Whether a load of `load` units fits within this resource's capacity.
    #[inline]
    pub fn fits(&self, load: i64) -> bool {
        load <= self.capacity
    }
}
