//! Schedule evaluation: objective, validator, and KPIs.
//!
//! # Flow
//!
//! ```text
//! Schedule ──resolve──▶ Placements ──▶ PrecedenceChecker ─┐
//!                                   └─▶ ResourceLoadChecker ├─▶ Verdict
//!                                   └─▶ ObjectiveEvaluator ─┘
//! ```
//!
//! [`ScheduleValidator`] is the entry point a search procedure calls per
//! candidate. [`ScheduleKpi`] reports secondary metrics for accepted
//! schedules.

mod kpi;
mod objective;
mod validator;

pub use crate::models::{Violation, ViolationType};
pub use kpi::ScheduleKpi;
pub use objective::ObjectiveEvaluator;
pub use validator::{ScheduleValidator, ValidatorConfig, Verdict};
