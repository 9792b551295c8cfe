//! Schedule quality metrics (KPIs).
//!
//! Computes cumulative-scheduling performance indicators from resolved
//! placements.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Latest completion time |
//! | Peak Load | Highest concurrent usage per resource |
//! | Utilization | Load area / (capacity × makespan) per resource |
//! | Avg Utilization | Mean over resources |
//! | Task Count | Tasks assigned per resource |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::{Deserialize, Serialize};

use super::ObjectiveEvaluator;
use crate::checker::ResourceLoadChecker;
use crate::models::{Instance, Placement};

/// Schedule performance indicators. Vectors are indexed by resource id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Makespan: latest completion time.
    pub makespan: i64,
    /// Peak concurrent load per resource.
    pub peak_load_by_resource: Vec<i64>,
    /// Fraction of the capacity-time rectangle used, per resource (0.0..1.0
    /// for feasible schedules).
    pub utilization_by_resource: Vec<f64>,
    /// Mean utilization over resources.
    pub avg_utilization: f64,
    /// Number of tasks assigned to each resource.
    pub tasks_by_resource: Vec<usize>,
}

impl ScheduleKpi {
    /// Computes KPIs from placements resolved against `instance`.
    pub fn calculate(instance: &Instance, placements: &[Placement]) -> Self {
        let makespan = ObjectiveEvaluator::makespan(placements);
        let profiles = ResourceLoadChecker::new(instance).profiles(placements);

        let mut tasks_by_resource = vec![0usize; instance.num_resources()];
        for p in placements {
            if let Some(count) = tasks_by_resource.get_mut(p.resource) {
                *count += 1;
            }
        }

        let peak_load_by_resource = profiles.iter().map(|p| p.peak()).collect();

        let utilization_by_resource: Vec<f64> = profiles
            .iter()
            .map(|p| {
                let available = p.capacity.saturating_mul(makespan);
                if available <= 0 {
                    0.0
                } else {
                    p.area() as f64 / available as f64
                }
            })
            .collect();

        let avg_utilization = if utilization_by_resource.is_empty() {
            0.0
        } else {
            utilization_by_resource.iter().sum::<f64>() / utilization_by_resource.len() as f64
        };

        Self {
            makespan,
            peak_load_by_resource,
            utilization_by_resource,
            avg_utilization,
            tasks_by_resource,
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_makespan: i64, min_utilization: f64) -> bool {
        self.makespan <= max_makespan && self.avg_utilization >= min_utilization
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Resource, Schedule, Task};

    fn instance() -> Instance {
        Instance::new(
            vec![Resource::new(0, 4), Resource::new(1, 2)],
            vec![
                Task::new(0).with_mode(0, 2, 2),
                Task::new(1).with_mode(0, 2, 2).with_mode(1, 4, 1),
                Task::new(2).with_mode(1, 4, 2),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_kpi_basic() {
        let inst = instance();
        let placements = inst
            .resolve(&Schedule::new(vec![0, 0, 1], vec![0, 0, 0]))
            .unwrap();
        let kpi = ScheduleKpi::calculate(&inst, &placements);

        assert_eq!(kpi.makespan, 4);
        assert_eq!(kpi.peak_load_by_resource, vec![4, 2]);
        assert_eq!(kpi.tasks_by_resource, vec![2, 1]);
        // R0: area 8 / (4 × 4) = 0.5, R1: area 8 / (2 × 4) = 1.0
        assert!((kpi.utilization_by_resource[0] - 0.5).abs() < 1e-10);
        assert!((kpi.utilization_by_resource[1] - 1.0).abs() < 1e-10);
        assert!((kpi.avg_utilization - 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_sequential_on_resource() {
        let inst = instance();
        let placements = inst
            .resolve(&Schedule::new(vec![0, 0, 1], vec![0, 2, 4]))
            .unwrap();
        let kpi = ScheduleKpi::calculate(&inst, &placements);
        assert_eq!(kpi.makespan, 8);
        assert_eq!(kpi.peak_load_by_resource, vec![2, 2]);
    }

    #[test]
    fn test_kpi_empty() {
        let inst = Instance::new(vec![Resource::new(0, 3)], vec![]).unwrap();
        let kpi = ScheduleKpi::calculate(&inst, &[]);
        assert_eq!(kpi.makespan, 0);
        assert_eq!(kpi.peak_load_by_resource, vec![0]);
        assert!((kpi.avg_utilization - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_extreme_capacity() {
        let inst = Instance::new(
            vec![Resource::new(0, i64::MAX)],
            vec![Task::new(0).with_mode(0, i64::MAX / 2, i64::MAX)],
        )
        .unwrap();
        let placements = inst
            .resolve(&Schedule::new(vec![0], vec![i64::MAX / 2]))
            .unwrap();
        let kpi = ScheduleKpi::calculate(&inst, &placements);
        assert_eq!(kpi.makespan, i64::MAX - 1);
        assert_eq!(kpi.peak_load_by_resource, vec![i64::MAX]);
        assert!(kpi.utilization_by_resource[0] > 0.0);
    }

    #[test]
    fn test_meets_thresholds() {
        let inst = instance();
        let placements = inst
            .resolve(&Schedule::new(vec![0, 0, 1], vec![0, 0, 0]))
            .unwrap();
        let kpi = ScheduleKpi::calculate(&inst, &placements);
        assert!(kpi.meets_thresholds(4, 0.7));
        assert!(!kpi.meets_thresholds(3, 0.0));
        assert!(!kpi.meets_thresholds(10, 0.8));
    }
}
