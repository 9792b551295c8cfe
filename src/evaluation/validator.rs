//! Single entry point for evaluating candidate schedules.
//!
//! A search procedure calls [`ScheduleValidator::validate`] once per
//! candidate. Infeasibility never panics or errors: it is encoded in the
//! returned [`Verdict`] so an optimizer can score it and move on.

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::ObjectiveEvaluator;
use crate::checker::{PrecedenceChecker, Reporting, ResourceLoadChecker};
use crate::models::{Instance, Schedule, Violation};

/// Validator options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Whether to collect every violation or stop at the first one.
    pub reporting: Reporting,
    /// Compute the makespan of resolvable schedules that violate
    /// precedence or capacity constraints.
    pub infeasible_makespan: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            reporting: Reporting::All,
            infeasible_makespan: true,
        }
    }
}

impl ValidatorConfig {
    /// Sets the violation reporting mode.
    pub fn with_reporting(mut self, reporting: Reporting) -> Self {
        self.reporting = reporting;
        self
    }

    /// Enables or disables the makespan of infeasible schedules.
    pub fn with_infeasible_makespan(mut self, enabled: bool) -> Self {
        self.infeasible_makespan = enabled;
        self
    }
}

/// Feasibility and cost of one candidate schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// No violation of any kind.
    pub feasible: bool,
    /// Every violation found (or the first, see [`Reporting`]).
    pub violations: Vec<Violation>,
    /// Makespan. Always present when `feasible`; on an infeasible verdict it
    /// is informational only and absent if the schedule did not resolve.
    pub makespan: Option<i64>,
}

impl Verdict {
    /// Makespan as a minimization fitness; `f64::INFINITY` when infeasible.
    pub fn fitness(&self) -> f64 {
        match (self.feasible, self.makespan) {
            (true, Some(makespan)) => makespan as f64,
            _ => f64::INFINITY,
        }
    }

    /// Makespan of a feasible schedule, `None` otherwise.
    pub fn feasible_makespan(&self) -> Option<i64> {
        self.makespan.filter(|_| self.feasible)
    }
}

/// Orchestrates resolution, precedence and capacity checks, and the
/// makespan objective.
///
/// Borrows the instance immutably; `validate` takes `&self` and keeps no
/// state between calls, so one validator can serve many threads.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleValidator<'a> {
    instance: &'a Instance,
    config: ValidatorConfig,
}

impl<'a> ScheduleValidator<'a> {
    /// Creates a validator with the default configuration.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            config: ValidatorConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Validates one candidate schedule.
    pub fn validate(&self, schedule: &Schedule) -> Verdict {
        let reporting = self.config.reporting;

        let placements = match self.instance.resolve(schedule) {
            Ok(placements) => placements,
            Err(mut violations) => {
                if reporting == Reporting::First {
                    violations.truncate(1);
                }
                debug!("schedule rejected: {} structural violation(s)", violations.len());
                return Verdict {
                    feasible: false,
                    violations,
                    makespan: None,
                };
            }
        };

        let mut violations =
            PrecedenceChecker::new(self.instance).check_with(&placements, reporting);

        if reporting == Reporting::All || violations.is_empty() {
            violations.extend(
                ResourceLoadChecker::new(self.instance)
                    .check_with(&placements, reporting)
                    .into_iter()
                    .flat_map(|load| load.violations),
            );
        }

        let feasible = violations.is_empty();
        let makespan = (feasible || self.config.infeasible_makespan)
            .then(|| ObjectiveEvaluator::makespan(&placements));

        debug!(
            "schedule {}: {} violation(s), makespan {:?}",
            if feasible { "feasible" } else { "infeasible" },
            violations.len(),
            makespan
        );

        Verdict {
            feasible,
            violations,
            makespan,
        }
    }

    /// Validates many candidates in parallel. Verdicts are in input order.
    pub fn validate_batch(&self, schedules: &[Schedule]) -> Vec<Verdict> {
        schedules.par_iter().map(|s| self.validate(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Resource, Task, ViolationType};

    fn capacity_instance() -> Instance {
        Instance::new(
            vec![Resource::new(0, 5)],
            vec![Task::new(0).with_mode(0, 3, 3), Task::new(1).with_mode(0, 2, 4)],
        )
        .unwrap()
    }

    fn precedence_instance() -> Instance {
        Instance::new(
            vec![Resource::new(0, 10)],
            vec![
                Task::new(0).with_mode(0, 4, 1).with_successor(1),
                Task::new(1).with_mode(0, 4, 1),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_feasible_verdict() {
        let inst = capacity_instance();
        let verdict = ScheduleValidator::new(&inst).validate(&Schedule::new(vec![0, 0], vec![0, 3]));
        assert!(verdict.feasible);
        assert!(verdict.violations.is_empty());
        assert_eq!(verdict.makespan, Some(5));
        assert_eq!(verdict.feasible_makespan(), Some(5));
        assert!((verdict.fitness() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_capacity_violation() {
        let inst = capacity_instance();
        let verdict = ScheduleValidator::new(&inst).validate(&Schedule::new(vec![0, 0], vec![0, 0]));
        assert!(!verdict.feasible);
        assert_eq!(verdict.violations.len(), 1);
        assert!(matches!(
            verdict.violations[0],
            Violation::Capacity { resource: 0, start: 0, end: 2, peak_load: 7, capacity: 5, .. }
        ));
        // labelled informational makespan
        assert_eq!(verdict.makespan, Some(3));
        assert_eq!(verdict.feasible_makespan(), None);
        assert!(verdict.fitness().is_infinite());
    }

    #[test]
    fn test_infeasible_makespan_disabled() {
        let inst = capacity_instance();
        let validator = ScheduleValidator::new(&inst)
            .with_config(ValidatorConfig::default().with_infeasible_makespan(false));
        let verdict = validator.validate(&Schedule::new(vec![0, 0], vec![0, 0]));
        assert!(!verdict.feasible);
        assert_eq!(verdict.makespan, None);
    }

    #[test]
    fn test_precedence_violation() {
        let inst = precedence_instance();
        let validator = ScheduleValidator::new(&inst);

        let verdict = validator.validate(&Schedule::new(vec![0, 0], vec![0, 3]));
        assert!(!verdict.feasible);
        assert_eq!(
            verdict.violations[0].violation_type(),
            ViolationType::PrecedenceViolation
        );

        let verdict = validator.validate(&Schedule::new(vec![0, 0], vec![0, 4]));
        assert!(verdict.feasible);
        assert_eq!(verdict.makespan, Some(8));
    }

    #[test]
    fn test_invalid_schedule_has_no_makespan() {
        let inst = capacity_instance();
        let verdict = ScheduleValidator::new(&inst).validate(&Schedule::new(vec![0], vec![0]));
        assert!(!verdict.feasible);
        assert_eq!(verdict.makespan, None);
        assert_eq!(
            verdict.violations[0].violation_type(),
            ViolationType::InvalidSchedule
        );
    }

    #[test]
    fn test_first_reporting() {
        let inst = Instance::new(
            vec![Resource::new(0, 1)],
            vec![
                Task::new(0).with_mode(0, 2, 1).with_successor(1),
                Task::new(1).with_mode(0, 2, 1),
                Task::new(2).with_mode(0, 2, 1),
            ],
        )
        .unwrap();
        let schedule = Schedule::new(vec![0, 0, 0], vec![0, 0, 0]);

        let all = ScheduleValidator::new(&inst).validate(&schedule);
        assert!(all.violations.len() >= 2);

        let first = ScheduleValidator::new(&inst)
            .with_config(ValidatorConfig::default().with_reporting(Reporting::First))
            .validate(&schedule);
        assert_eq!(first.violations.len(), 1);
        assert!(!first.feasible);
    }

    #[test]
    fn test_validate_batch_keeps_order() {
        let inst = capacity_instance();
        let schedules: Vec<Schedule> = (0..20)
            .map(|i| Schedule::new(vec![0, 0], vec![0, i % 5]))
            .collect();
        let validator = ScheduleValidator::new(&inst);
        let batch = validator.validate_batch(&schedules);
        let sequential: Vec<Verdict> = schedules.iter().map(|s| validator.validate(s)).collect();
        assert_eq!(batch, sequential);
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: ValidatorConfig = serde_json::from_str(r#"{"reporting":"first"}"#).unwrap();
        assert_eq!(config.reporting, Reporting::First);
        assert!(config.infeasible_makespan);
    }
}
