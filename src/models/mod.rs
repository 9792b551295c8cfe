//! Flexible cumulative scheduling domain models.
//!
//! Provides the instance representation (tasks, resources, eligibility,
//! precedence) and the candidate-solution types evaluated against it.
//!
//! # Domain Mappings
//!
//! | u-cumulative | Project Scheduling | Cloud | Manufacturing |
//! |--------------|--------------------|-------|---------------|
//! | Task | Activity | Job | Operation |
//! | Resource | Renewable Resource | Node Pool | Work Center |
//! | Eligibility | Execution Mode | Instance Type | Routing Alternative |
//! | Schedule | Baseline Plan | Placement Plan | Production Plan |

mod instance;
mod resource;
mod schedule;
mod task;

pub use instance::{Instance, RawInstance};
pub use resource::Resource;
pub use schedule::{Placement, Schedule, Violation, ViolationType};
pub use task::{Eligibility, Task};
