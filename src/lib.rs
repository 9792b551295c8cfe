//! Flexible cumulative scheduling for the U-Engine ecosystem.
//!
//! Defines the flexible cumulative scheduling problem (FCSP): every task is
//! assigned to one of its eligible resources and a start time, precedence
//! edges must be respected, and at every instant the summed weight of the
//! tasks running on a resource may not exceed its capacity. The objective is
//! the makespan.
//!
//! This crate is the evaluation core a search procedure calls per candidate.
//! It contains no solver.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Eligibility`, `Resource`,
//!   `Instance`, `Schedule`, `Placement`, `Violation`
//! - **`validation`**: Structural instance checks and cycle detection
//! - **`parser`**: Instance file loader
//! - **`checker`**: Precedence and cumulative capacity checkers
//! - **`evaluation`**: Makespan objective, `ScheduleValidator`, KPIs
//! - **`sampling`**: Random candidate schedules
//!
//! # Example
//!
//! ```
//! use u_cumulative::evaluation::ScheduleValidator;
//! use u_cumulative::models::Schedule;
//! use u_cumulative::parser::parse_instance;
//!
//! let instance = parse_instance("2 1\n5\n3 3\n2 4\n0\n0\n").unwrap();
//! let validator = ScheduleValidator::new(&instance);
//!
//! let overlap = validator.validate(&Schedule::new(vec![0, 0], vec![0, 0]));
//! assert!(!overlap.feasible);
//!
//! let sequential = validator.validate(&Schedule::new(vec![0, 0], vec![0, 3]));
//! assert_eq!(sequential.feasible_makespan(), Some(5));
//! ```
//!
//! # References
//!
//! - Brucker et al. (1999), "Resource-constrained project scheduling"
//! - Baptiste, Le Pape & Nuijten (2001), "Constraint-Based Scheduling"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod checker;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod parser;
pub mod sampling;
pub mod validation;

pub use error::{InstanceError, InstanceResult};
