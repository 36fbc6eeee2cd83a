//! Preprocessing configuration

use super::{ImputeStrategy, ScalerType};
use crate::error::{PrepError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the churn preprocessing pipeline.
///
/// Defaults match the Telco customer-churn layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessingConfig {
    /// Columns reinterpreted as floats before deduplication
    pub coerce_columns: Vec<String>,

    /// Replacement for values that do not parse as numbers
    pub coerce_strategy: ImputeStrategy,

    /// Whether to drop exact duplicate rows
    pub deduplicate: bool,

    /// Identifier columns dropped before encoding
    pub id_columns: Vec<String>,

    /// Target column label-encoded instead of one-hot expanded
    pub target_column: Option<String>,

    /// Separator between column name and category in indicator names
    pub indicator_separator: String,

    /// Columns scaled together; scaling is skipped unless all are present
    pub scale_columns: Vec<String>,

    /// Type of scaler to use for the scale columns
    pub scaler_type: ScalerType,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            coerce_columns: vec!["TotalCharges".to_string()],
            coerce_strategy: ImputeStrategy::Constant(0.0),
            deduplicate: true,
            id_columns: vec!["customerID".to_string()],
            target_column: Some("Churn".to_string()),
            indicator_separator: "_".to_string(),
            scale_columns: vec![
                "tenure".to_string(),
                "MonthlyCharges".to_string(),
                "TotalCharges".to_string(),
            ],
            scaler_type: ScalerType::Standard,
        }
    }
}

impl PreprocessingConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PrepError::ConfigError(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| PrepError::ConfigError(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.indicator_separator.is_empty() {
            return Err(PrepError::ConfigError(
                "indicator_separator must not be empty".to_string(),
            ));
        }
        if let ImputeStrategy::Constant(value) = self.coerce_strategy {
            if !value.is_finite() {
                return Err(PrepError::InvalidParameter {
                    name: "coerce_strategy".to_string(),
                    value: value.to_string(),
                    reason: "fill value must be finite".to_string(),
                });
            }
        }
        if let Some(target) = &self.target_column {
            if self.id_columns.contains(target) {
                return Err(PrepError::ConfigError(format!(
                    "column {target} cannot be both identifier and target"
                )));
            }
        }
        Ok(())
    }

    /// Builder method to set the coerced columns
    pub fn with_coerce_columns(mut self, columns: &[&str]) -> Self {
        self.coerce_columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Builder method to set the coercion fill strategy
    pub fn with_coerce_strategy(mut self, strategy: ImputeStrategy) -> Self {
        self.coerce_strategy = strategy;
        self
    }

    /// Builder method to toggle deduplication
    pub fn with_deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }

    /// Builder method to set identifier columns
    pub fn with_id_columns(mut self, columns: &[&str]) -> Self {
        self.id_columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Builder method to set the target column
    pub fn with_target(mut self, target: Option<&str>) -> Self {
        self.target_column = target.map(str::to_string);
        self
    }

    /// Builder method to set the scaled columns
    pub fn with_scale_columns(mut self, columns: &[&str]) -> Self {
        self.scale_columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Builder method to set scaler type
    pub fn with_scaler(mut self, scaler_type: ScalerType) -> Self {
        self.scaler_type = scaler_type;
        self
    }
}
