use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::{CHART_OPTIONS_SCHEMA_V1, ChartOptions};

/// Versioned envelope for persisted chart options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptionsJsonContractV1 {
    pub schema_version: u32,
    pub options: ChartOptions,
}

impl ChartOptions {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartOptionsJsonContractV1 {
            schema_version: CHART_OPTIONS_SCHEMA_V1,
            options: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidOptions(format!("failed to serialize options contract v1: {e}"))
        })
    }

    /// Accepts either the versioned envelope or a bare options object.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidOptions(format!("failed to parse options json: {e}")))?;

        let is_envelope = value.get("schema_version").is_some() && value.get("options").is_some();
        if !is_envelope {
            return Self::from_json_value(value);
        }

        let payload: ChartOptionsJsonContractV1 = serde_json::from_value(value).map_err(|e| {
            ChartError::InvalidOptions(format!("failed to parse options contract: {e}"))
        })?;
        if payload.schema_version != CHART_OPTIONS_SCHEMA_V1 {
            return Err(ChartError::InvalidOptions(format!(
                "unsupported options schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.options)
    }
}
