//! Precedence feasibility.
//!
//! Every edge `u → v` requires `start(v) >= start(u) + duration(u)` where
//! the duration is the one of `u` on its chosen resource. Zero-duration
//! predecessors therefore allow their successors to start at the same
//! instant.

use log::trace;

use super::Reporting;
use crate::models::{Instance, Placement, Violation};

/// Checks candidate placements against the instance's precedence edges.
///
/// Cycle detection is not repeated here: an [`Instance`] can only be built
/// from an acyclic precedence graph.
#[derive(Debug, Clone, Copy)]
pub struct PrecedenceChecker<'a> {
    instance: &'a Instance,
}

impl<'a> PrecedenceChecker<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// Returns every violated edge (empty = satisfied).
    ///
    /// `placements[i]` must be the placement of task `i`, as produced by
    /// [`Instance::resolve`].
    pub fn check(&self, placements: &[Placement]) -> Vec<Violation> {
        self.check_with(placements, Reporting::All)
    }

    /// Like [`check`](Self::check), stopping at the first violation when
    /// `reporting` is [`Reporting::First`].
    pub fn check_with(&self, placements: &[Placement], reporting: Reporting) -> Vec<Violation> {
        let mut violations = Vec::new();

        for pred in placements {
            let finish = pred.end();
            for &succ in self.instance.successors(pred.task) {
                let Some(succ_placement) = placements.get(succ) else {
                    continue;
                };
                if succ_placement.start < finish {
                    trace!(
                        "precedence {} -> {} violated: finish {} > start {}",
                        pred.task,
                        succ,
                        finish,
                        succ_placement.start
                    );
                    violations.push(Violation::Precedence {
                        predecessor: pred.task,
                        successor: succ,
                        predecessor_finish: finish,
                        successor_start: succ_placement.start,
                    });
                    if reporting == Reporting::First {
                        return violations;
                    }
                }
            }
        }

        violations
    }
}
