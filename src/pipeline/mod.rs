pub mod stage1_join;
pub mod stage2_aggregate;
pub mod stage3_metrics;
pub mod stage4_baseline;
pub mod stage5_standing;
pub mod stage6_questions;

use crate::input::{FactSet, InputError};
use crate::model::baseline::{BaselinePartition, BaselineScope, PopulationBaseline};
use crate::model::config::{ConfigError, MetricsConfig, ScopeSelection};
use crate::model::metrics::{GroupField, MemberMetricRecord};
use crate::model::standing::MemberStanding;
use stage1_join::{Stage1Inputs, run_stage1};
use stage3_metrics::{Stage3Inputs, run_stage3};
use stage4_baseline::{Stage4Inputs, baseline_for, run_stage4};
use stage5_standing::{Stage5Inputs, run_stage5};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid grouping: {0}")]
    InvalidGrouping(String),

    #[error("unknown member {0:?}")]
    UnknownMember(String),
}

#[derive(Debug, Clone)]
pub struct PipelineInputs<'a> {
    pub facts: &'a FactSet,
    pub config: &'a MetricsConfig,
    pub scope: &'a ScopeSelection,
    pub fields: &'a [GroupField],
    pub partition: BaselinePartition,
}

#[derive(Debug)]
pub struct PipelineOutput {
    pub records: Vec<MemberMetricRecord>,
    pub baselines: Vec<PopulationBaseline>,
    pub dropped_presiding: usize,
    pub dropped_out_of_scope: usize,
    pub zero_attendance: usize,
}

impl PipelineOutput {
    pub fn baseline(&self, scope: BaselineScope) -> PopulationBaseline {
        baseline_for(&self.baselines, scope)
    }
}

/// Join, aggregate and build baselines for one scope selection.
pub fn run_pipeline(inputs: &PipelineInputs<'_>) -> Result<PipelineOutput, PipelineError> {
    inputs.config.validate()?;

    let stage1 = run_stage1(&Stage1Inputs {
        speeches: &inputs.facts.speeches,
        attendance: &inputs.facts.attendance,
        config: inputs.config,
        scope: inputs.scope,
    });
    let stage3 = run_stage3(&Stage3Inputs {
        facts: &stage1.facts,
        fields: inputs.fields,
    })?;
    let stage4 = run_stage4(&Stage4Inputs {
        records: &stage3.records,
        partition: inputs.partition,
    });

    tracing::info!(
        facts = stage1.facts.len(),
        records = stage3.records.len(),
        baselines = stage4.baselines.len(),
        dropped_presiding = stage1.dropped_presiding,
        zero_attendance = stage3.zero_attendance,
        "member metrics computed"
    );

    Ok(PipelineOutput {
        records: stage3.records,
        baselines: stage4.baselines,
        dropped_presiding: stage1.dropped_presiding,
        dropped_out_of_scope: stage1.dropped_out_of_scope,
        zero_attendance: stage3.zero_attendance,
    })
}

/// Standing of one member against `baseline`.
pub fn member_standing(
    member_id: &str,
    records: &[MemberMetricRecord],
    baseline: &PopulationBaseline,
    facts: &FactSet,
    config: &MetricsConfig,
) -> Result<MemberStanding, PipelineError> {
    run_stage5(&Stage5Inputs {
        member_id,
        records,
        baseline,
        positions: &facts.positions,
        config,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/fixtures.rs"]
pub(crate) mod fixtures;

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
