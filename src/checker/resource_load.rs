//! Cumulative capacity feasibility via an event sweep.
//!
//! # Algorithm
//!
//! For one resource, every placement that consumes capacity contributes a
//! `+weight` event at its start and a `-weight` event at its end. Events are
//! sorted by time with ends before starts at equal timestamps, so a task
//! ending at `t` frees its capacity before a task starting at `t` claims it
//! (half-open intervals). After all events of one timestamp are applied the
//! running load is the height of the resource profile up to the next
//! timestamp.
//!
//! Cost: O(T log T) per resource for T placements on it.
//!
//! # Reference
//! Schutt (2011), "Improving Scheduling by Learning", Ch. 3.3 (time-table
//! profiles); Baptiste, Le Pape & Nuijten (2001), Ch. 2.1

use log::trace;
use serde::{Deserialize, Serialize};

use super::Reporting;
use crate::models::{Instance, Placement, Violation};

/// A maximal interval `[start, end)` of constant, positive resource usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceProfile {
    /// Inclusive start.
    pub start: i64,
    /// Exclusive end.
    pub end: i64,
    /// Cumulative usage of every task running over the interval.
    pub height: i64,
}

impl ResourceProfile {
    #[inline]
    pub fn length(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }
}

/// Step function of the load on one resource.
///
/// Profiles are sorted, non-overlapping, and only cover instants where the
/// load is positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadProfile {
    pub resource: usize,
    pub capacity: i64,
    pub profiles: Vec<ResourceProfile>,
}

impl LoadProfile {
    /// Highest load at any instant (0 for an unused resource).
    pub fn peak(&self) -> i64 {
        self.profiles.iter().map(|p| p.height).max().unwrap_or(0)
    }

    /// Integral of the load over time, saturating at `i64::MAX`.
    pub fn area(&self) -> i64 {
        self.profiles
            .iter()
            .map(|p| p.height.saturating_mul(p.length()))
            .fold(0, i64::saturating_add)
    }

    /// Load at instant `time`.
    pub fn load_at(&self, time: i64) -> i64 {
        let idx = self.profiles.partition_point(|p| p.end <= time);
        match self.profiles.get(idx) {
            Some(p) if p.start <= time => p.height,
            _ => 0,
        }
    }

    /// Maximal runs of contiguous profiles whose height exceeds capacity,
    /// as `(start, end, peak)`.
    pub fn overloaded_windows(&self) -> Vec<(i64, i64, i64)> {
        let mut windows: Vec<(i64, i64, i64)> = Vec::new();
        for p in self.profiles.iter().filter(|p| p.height > self.capacity) {
            match windows.last_mut() {
                Some((_, end, peak)) if *end == p.start => {
                    *end = p.end;
                    *peak = (*peak).max(p.height);
                }
                _ => windows.push((p.start, p.end, p.height)),
            }
        }
        windows
    }
}

/// Capacity verdict for one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLoad {
    pub resource: usize,
    pub capacity: i64,
    pub peak_load: i64,
    /// `Violation::Capacity` entries, one per overloaded window.
    pub violations: Vec<Violation>,
}

impl ResourceLoad {
    /// Whether the load never exceeds capacity.
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct Event {
    time: i64,
    delta: i64,
}

/// Checks candidate placements against every resource's capacity.
#[derive(Debug, Clone, Copy)]
pub struct ResourceLoadChecker<'a> {
    instance: &'a Instance,
}

impl<'a> ResourceLoadChecker<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// Checks all resources and reports every overloaded window.
    pub fn check(&self, placements: &[Placement]) -> Vec<ResourceLoad> {
        self.check_with(placements, Reporting::All)
    }

    /// Checks all resources. With [`Reporting::First`] the check stops after
    /// the first resource that has a violation, reporting one window.
    pub fn check_with(&self, placements: &[Placement], reporting: Reporting) -> Vec<ResourceLoad> {
        let by_resource = self.group_by_resource(placements);
        let mut loads = Vec::with_capacity(by_resource.len());

        for (resource, on_resource) in by_resource.iter().enumerate() {
            let load = self.check_group(resource, on_resource, reporting);
            let stop = reporting == Reporting::First && !load.is_feasible();
            loads.push(load);
            if stop {
                break;
            }
        }

        loads
    }

    /// Checks a single resource.
    pub fn check_resource(&self, resource: usize, placements: &[Placement]) -> ResourceLoad {
        let on_resource: Vec<&Placement> =
            placements.iter().filter(|p| p.resource == resource).collect();
        self.check_group(resource, &on_resource, Reporting::All)
    }

    /// Builds the load profile of `resource`.
    pub fn profile(&self, resource: usize, placements: &[Placement]) -> LoadProfile {
        let on_resource: Vec<&Placement> =
            placements.iter().filter(|p| p.resource == resource).collect();
        self.sweep(resource, &on_resource)
    }

    /// Load profiles of every resource.
    pub fn profiles(&self, placements: &[Placement]) -> Vec<LoadProfile> {
        self.group_by_resource(placements)
            .iter()
            .enumerate()
            .map(|(resource, on_resource)| self.sweep(resource, on_resource))
            .collect()
    }

    fn group_by_resource<'p>(&self, placements: &'p [Placement]) -> Vec<Vec<&'p Placement>> {
        let mut groups = vec![Vec::new(); self.instance.num_resources()];
        for p in placements {
            if let Some(group) = groups.get_mut(p.resource) {
                group.push(p);
            }
        }
        groups
    }

    fn check_group(
        &self,
        resource: usize,
        on_resource: &[&Placement],
        reporting: Reporting,
    ) -> ResourceLoad {
        let profile = self.sweep(resource, on_resource);
        let mut violations = Vec::new();

        for (start, end, peak_load) in profile.overloaded_windows() {
            let mut tasks: Vec<usize> = on_resource
                .iter()
                .filter(|p| p.consumes_capacity() && p.overlaps(start, end))
                .map(|p| p.task)
                .collect();
            tasks.sort_unstable();
            violations.push(Violation::Capacity {
                resource,
                start,
                end,
                peak_load,
                capacity: profile.capacity,
                tasks,
            });
            if reporting == Reporting::First {
                break;
            }
        }

        ResourceLoad {
            resource,
            capacity: profile.capacity,
            peak_load: profile.peak(),
            violations,
        }
    }

    fn sweep(&self, resource: usize, on_resource: &[&Placement]) -> LoadProfile {
        let capacity = self.instance.capacity(resource).unwrap_or(0);

        let mut events = Vec::with_capacity(2 * on_resource.len());
        for p in on_resource.iter().filter(|p| p.consumes_capacity()) {
            events.push(Event {
                time: p.start,
                delta: p.weight,
            });
            events.push(Event {
                time: p.end(),
                delta: -p.weight,
            });
        }
        // Negative deltas (ends) sort before positive ones (starts).
        events.sort_unstable_by_key(|e| (e.time, e.delta));

        // Instances bound the load per resource to i64; hand-built
        // placements may not, so heights clamp at i64::MAX.
        let mut profiles: Vec<ResourceProfile> = Vec::new();
        let mut running: i128 = 0;
        let mut i = 0;
        while i < events.len() {
            let time = events[i].time;
            while i < events.len() && events[i].time == time {
                running += i128::from(events[i].delta);
                i += 1;
            }
            if running == 0 {
                continue;
            }
            let load = i64::try_from(running).unwrap_or(i64::MAX);
            let Some(next) = events.get(i) else {
                break;
            };
            match profiles.last_mut() {
                Some(last) if last.end == time && last.height == load => last.end = next.time,
                _ => profiles.push(ResourceProfile {
                    start: time,
                    end: next.time,
                    height: load,
                }),
            }
        }

        trace!(
            "resource {resource}: {} placements, {} profiles",
            on_resource.len(),
            profiles.len()
        );

        LoadProfile {
            resource,
            capacity,
            profiles,
        }
    }
}
