//! Feasibility checkers for resolved schedules.
//!
//! Both checkers borrow an immutable [`Instance`](crate::models::Instance)
//! and operate on the [`Placement`](crate::models::Placement)s produced by
//! [`Instance::resolve`](crate::models::Instance::resolve). They hold no
//! mutable state and may be used from many threads at once.
//!
//! - [`PrecedenceChecker`]: one pass over the precedence edges, O(n + e).
//! - [`ResourceLoadChecker`]: event sweep per resource, O(T log T).

mod precedence;
mod resource_load;

use serde::{Deserialize, Serialize};

pub use precedence::PrecedenceChecker;
pub use resource_load::{LoadProfile, ResourceLoad, ResourceLoadChecker, ResourceProfile};

/// How many violations a check collects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reporting {
    /// Stop at the first violation.
    First,
    /// Collect every violation.
    #[default]
    All,
}
