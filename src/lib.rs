//! Participation, question-asking, verbosity and readability metrics for
//! legislative members, with population baselines and per-member standing.

pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;

pub use input::{FactSet, InputError};
pub use model::config::{MetricsConfig, PercentileKind, ScopeSelection};
pub use model::metrics::{GroupField, MemberMetricRecord, Metric};
pub use pipeline::{PipelineError, PipelineInputs, PipelineOutput, member_standing, run_pipeline};
