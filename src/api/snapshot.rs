use serde::{Deserialize, Serialize};

use crate::api::pipeline::BuildPlan;
use crate::core::{AxisScale, BarPlan, ScaleSelection, TrendOverlay, Viewport};
use crate::error::{ChartError, ChartResult};

pub const PLAN_SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Deterministic view of a build's geometry, for regression fixtures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    pub viewport: Viewport,
    pub selection: ScaleSelection,
    pub axis: AxisScale,
    pub max_min: bool,
    pub bars: BarPlan,
    pub trend: Option<TrendOverlay>,
}

impl From<&BuildPlan> for PlanSnapshot {
    fn from(plan: &BuildPlan) -> Self {
        Self {
            viewport: plan.viewport,
            selection: plan.selection,
            axis: plan.axis,
            max_min: plan.max_min,
            bars: plan.bars.clone(),
            trend: plan.trend.clone(),
        }
    }
}

/// Versioned wrapper used when snapshots are stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: PlanSnapshot,
}

impl PlanSnapshot {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let contract = PlanSnapshotJsonContractV1 {
            schema_version: PLAN_SNAPSHOT_SCHEMA_VERSION,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&contract).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract: {e}"))
        })
    }

    pub fn from_json_contract_v1_str(input: &str) -> ChartResult<Self> {
        let contract: PlanSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse snapshot contract: {e}"))
        })?;
        if contract.schema_version != PLAN_SNAPSHOT_SCHEMA_VERSION {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                contract.schema_version
            )));
        }
        Ok(contract.snapshot)
    }
}
