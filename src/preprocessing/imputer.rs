//! Numeric coercion with fill values for unparseable entries

use super::float_values;
use crate::error::{PrepError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Strategy for replacing values that are missing or not numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImputeStrategy {
    /// Replace with a constant value
    Constant(f64),
    /// Replace with the mean of the values that parsed
    Mean,
    /// Replace with the median of the values that parsed
    Median,
}

/// Coerces columns to Float64, filling entries that do not parse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Imputer {
    strategy: ImputeStrategy,
    fill_values: HashMap<String, f64>,
    replaced: usize,
}

impl Imputer {
    /// Create a new imputer with the specified strategy
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self {
            strategy,
            fill_values: HashMap::new(),
            replaced: 0,
        }
    }

    /// Reinterpret `columns` as Float64.
    ///
    /// Null, unparseable and non-finite cells become the strategy's fill
    /// value. Every listed column must exist.
    pub fn coerce(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        let mut result = df.clone();

        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| PrepError::ColumnNotFound(col_name.to_string()))?;

            let parsed: Vec<Option<f64>> = float_values(column)?
                .into_iter()
                .map(|v| v.filter(|x| x.is_finite()))
                .collect();

            let fill = self.compute_fill_value(&parsed);
            let misses = parsed.iter().filter(|v| v.is_none()).count();
            if misses > 0 {
                debug!(column = %col_name, count = misses, fill, "Replaced non-numeric values");
            }

            let values: Vec<f64> = parsed.into_iter().map(|v| v.unwrap_or(fill)).collect();
            result.with_column(Column::new(col_name.to_string().into(), values))?;

            self.fill_values.insert(col_name.to_string(), fill);
            self.replaced += misses;
        }

        Ok(result)
    }

    /// Number of cells replaced across all coerced columns
    pub fn replaced_count(&self) -> usize {
        self.replaced
    }

    /// Fill value used for a column, once coerced
    pub fn fill_value(&self, column: &str) -> Option<f64> {
        self.fill_values.get(column).copied()
    }

    fn compute_fill_value(&self, parsed: &[Option<f64>]) -> f64 {
        match self.strategy {
            ImputeStrategy::Constant(value) => value,
            ImputeStrategy::Mean => {
                let ca: Float64Chunked = parsed.iter().copied().collect();
                ca.mean().unwrap_or(0.0)
            }
            ImputeStrategy::Median => {
                let ca: Float64Chunked = parsed.iter().copied().collect();
                ca.median().unwrap_or(0.0)
            }
        }
    }
}
