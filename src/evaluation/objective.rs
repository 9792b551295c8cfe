//! Makespan objective.

use crate::models::{Instance, Placement, Schedule, Violation};

/// Computes the makespan `max(start + duration)` of a schedule.
///
/// Pure and deterministic; feasibility is not checked here.
#[derive(Debug, Clone, Copy)]
pub struct ObjectiveEvaluator<'a> {
    instance: &'a Instance,
}

impl<'a> ObjectiveEvaluator<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// Makespan of resolved placements (0 when there are none).
    pub fn makespan(placements: &[Placement]) -> i64 {
        placements.iter().map(Placement::end).max().unwrap_or(0)
    }

    /// Resolves `schedule` and returns its makespan.
    ///
    /// Fails with the structural violations if the schedule cannot be
    /// resolved against the instance.
    pub fn evaluate(&self, schedule: &Schedule) -> Result<i64, Vec<Violation>> {
        self.instance
            .resolve(schedule)
            .map(|placements| Self::makespan(&placements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Resource, Task};

    fn instance() -> Instance {
        Instance::new(
            vec![Resource::new(0, 5), Resource::new(1, 5)],
            vec![
                Task::new(0).with_mode(0, 3, 3),
                Task::new(1).with_mode(0, 2, 4).with_mode(1, 7, 1),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_makespan() {
        let inst = instance();
        let eval = ObjectiveEvaluator::new(&inst);
        assert_eq!(eval.evaluate(&Schedule::new(vec![0, 0], vec![0, 3])), Ok(5));
        assert_eq!(eval.evaluate(&Schedule::new(vec![0, 1], vec![0, 3])), Ok(10));
    }

    #[test]
    fn test_makespan_is_deterministic() {
        let inst = instance();
        let eval = ObjectiveEvaluator::new(&inst);
        let schedule = Schedule::new(vec![0, 1], vec![4, 1]);
        let first = eval.evaluate(&schedule);
        for _ in 0..10 {
            assert_eq!(eval.evaluate(&schedule), first);
        }
    }

    #[test]
    fn test_empty_placements() {
        assert_eq!(ObjectiveEvaluator::makespan(&[]), 0);
    }

    #[test]
    fn test_unresolvable_schedule() {
        let inst = instance();
        let eval = ObjectiveEvaluator::new(&inst);
        assert!(eval.evaluate(&Schedule::new(vec![1, 0], vec![0, 0])).is_err());
    }
}
