//! Random candidate schedules.
//!
//! Produces the unbiased candidates a population-based search starts from,
//! and the random inputs used to cross-check the evaluators. Candidates are
//! not guaranteed to be feasible.

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::models::{Instance, Schedule};

/// Draws a random schedule.
///
/// Each task gets a uniformly chosen eligible resource and a start time
/// uniform in `0..=instance.horizon()`.
pub fn random_schedule<R: Rng>(instance: &Instance, rng: &mut R) -> Schedule {
    let horizon = instance.horizon();
    let mut task_resources = Vec::with_capacity(instance.num_tasks());
    let mut start_times = Vec::with_capacity(instance.num_tasks());

    for task in instance.tasks() {
        // Every task of a built instance has at least one eligible resource.
        let resource = task
            .eligibility
            .choose(rng)
            .map(|e| e.resource)
            .unwrap_or(0);
        task_resources.push(resource);
        start_times.push(rng.random_range(0..=horizon));
    }

    Schedule::new(task_resources, start_times)
}
