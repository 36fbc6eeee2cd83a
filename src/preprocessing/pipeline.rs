//! Data preprocessing pipeline

use super::{
    config::PreprocessingConfig,
    dedup::drop_duplicates,
    encoder::{Encoder, EncoderType},
    float_values, infer_column_type,
    imputer::Imputer,
    normalize_boolean,
    scaler::{Scaler, ScalerType},
    ColumnType,
};
use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Summary of a single pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub input_rows: usize,
    pub input_columns: usize,
    /// Cells replaced during numeric coercion
    pub coerced_values: usize,
    pub duplicates_removed: usize,
    /// Identifier columns that were present and dropped
    pub dropped_columns: Vec<String>,
    /// Target labels in encoded order (index = code)
    pub target_labels: Vec<String>,
    /// Indicator columns produced by one-hot expansion
    pub indicator_columns: Vec<String>,
    pub scaled: bool,
    pub output_rows: usize,
    pub output_columns: usize,
    pub elapsed_secs: f64,
}

/// Main data preprocessing pipeline.
///
/// Steps run in a fixed order: numeric coercion, deduplication,
/// identifier removal, target label encoding, one-hot expansion with a
/// Float64 cast, then scaling.
#[derive(Debug, Clone)]
pub struct DataPreprocessor {
    config: PreprocessingConfig,
    column_types: Vec<(String, ColumnType)>,
    report: Option<PipelineReport>,
}

impl Default for DataPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DataPreprocessor {
    /// Create a new preprocessor with default configuration
    pub fn new() -> Self {
        Self::with_config(PreprocessingConfig::default())
    }

    /// Create a new preprocessor with custom configuration
    pub fn with_config(config: PreprocessingConfig) -> Self {
        Self {
            config,
            column_types: Vec::new(),
            report: None,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &PreprocessingConfig {
        &self.config
    }

    /// Column kinds detected during the last run, in input order
    pub fn column_types(&self) -> &[(String, ColumnType)] {
        &self.column_types
    }

    /// Report of the last run
    pub fn report(&self) -> Option<&PipelineReport> {
        self.report.as_ref()
    }

    /// Run every step on `df` and return the numeric result
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<DataFrame> {
        let start = Instant::now();
        let mut report = PipelineReport {
            input_rows: df.height(),
            input_columns: df.width(),
            ..Default::default()
        };
        info!(rows = df.height(), columns = df.width(), "Starting preprocessing");

        let df = self.coerce_numeric(df, &mut report)?;
        let df = self.deduplicate(df, &mut report)?;
        self.detect_column_types(&df)?;
        let df = self.drop_identifiers(df, &mut report)?;
        let df = self.encode_target(df, &mut report)?;
        let df = self.expand_categoricals(&df, &mut report)?;
        let df = Self::cast_to_f64(&df)?;
        let df = self.scale(df, &mut report)?;

        report.output_rows = df.height();
        report.output_columns = df.width();
        report.elapsed_secs = start.elapsed().as_secs_f64();
        info!(
            rows = report.output_rows,
            columns = report.output_columns,
            elapsed_secs = report.elapsed_secs,
            "Preprocessing finished"
        );

        self.report = Some(report);
        Ok(df)
    }

    fn coerce_numeric(&self, df: &DataFrame, report: &mut PipelineReport) -> Result<DataFrame> {
        let columns: Vec<&str> = self.config.coerce_columns.iter().map(String::as_str).collect();
        let mut imputer = Imputer::new(self.config.coerce_strategy.clone());
        let result = imputer.coerce(df, &columns)?;

        report.coerced_values = imputer.replaced_count();
        debug!(columns = ?columns, replaced = report.coerced_values, "Numeric coercion done");
        Ok(result)
    }

    fn deduplicate(&self, df: DataFrame, report: &mut PipelineReport) -> Result<DataFrame> {
        if !self.config.deduplicate {
            return Ok(df);
        }

        let (result, removed) = drop_duplicates(&df)?;
        report.duplicates_removed = removed;
        if removed > 0 {
            info!(removed, "Dropped duplicate rows");
        }
        Ok(result)
    }

    fn detect_column_types(&mut self, df: &DataFrame) -> Result<()> {
        self.column_types.clear();

        for column in df.get_columns() {
            let name = column.name().to_string();
            let kind = if self.config.id_columns.contains(&name) {
                ColumnType::Identifier
            } else if self.config.target_column.as_ref() == Some(&name) {
                ColumnType::Target
            } else {
                infer_column_type(column)?
            };
            self.column_types.push((name, kind));
        }

        Ok(())
    }

    fn drop_identifiers(&self, mut df: DataFrame, report: &mut PipelineReport) -> Result<DataFrame> {
        for id in &self.config.id_columns {
            if df.column(id).is_ok() {
                df = df.drop(id)?;
                report.dropped_columns.push(id.clone());
                debug!(column = %id, "Dropped identifier column");
            }
        }
        Ok(df)
    }

    fn encode_target(&self, df: DataFrame, report: &mut PipelineReport) -> Result<DataFrame> {
        let Some(target) = self.config.target_column.as_deref() else {
            return Ok(df);
        };
        if df.column(target).is_err() {
            return Ok(df);
        }

        let mut encoder = Encoder::new(EncoderType::Label);
        let result = encoder.fit_transform(&df, &[target])?;

        report.target_labels = encoder.categories(target).unwrap_or_default();
        info!(column = %target, labels = ?report.target_labels, "Encoded target");
        Ok(result)
    }

    fn expand_categoricals(&self, df: &DataFrame, report: &mut PipelineReport) -> Result<DataFrame> {
        let categorical: Vec<&str> = self
            .column_types
            .iter()
            .filter(|(_, kind)| matches!(kind, ColumnType::Categorical | ColumnType::Boolean))
            .map(|(name, _)| name.as_str())
            .filter(|name| df.column(name).is_ok())
            .collect();

        // Boolean columns share one spelling per truth value
        let mut df = df.clone();
        for (name, kind) in &self.column_types {
            if *kind == ColumnType::Boolean {
                if let Ok(column) = df.column(name) {
                    let normalized = normalize_boolean(column)?;
                    df.with_column(normalized)?;
                }
            }
        }

        let mut encoder = Encoder::new(EncoderType::OneHot)
            .with_separator(self.config.indicator_separator.as_str());
        let result = encoder.fit_transform(&df, &categorical)?;

        report.indicator_columns = encoder.feature_names();
        debug!(
            columns = categorical.len(),
            indicators = encoder.n_features(),
            "One-hot expansion done"
        );
        Ok(result)
    }

    /// Cast every column to Float64.
    /// Text columns here hold only numbers, so parsing cannot lose values.
    fn cast_to_f64(df: &DataFrame) -> Result<DataFrame> {
        let columns: Vec<Column> = df
            .get_columns()
            .iter()
            .map(|col| -> Result<Column> {
                if col.dtype() == &DataType::Float64 {
                    Ok(col.clone())
                } else {
                    Ok(Column::new(col.name().clone(), float_values(col)?))
                }
            })
            .collect::<Result<_>>()?;

        Ok(DataFrame::new(columns)?)
    }

    fn scale(&self, df: DataFrame, report: &mut PipelineReport) -> Result<DataFrame> {
        if self.config.scaler_type == ScalerType::None || self.config.scale_columns.is_empty() {
            return Ok(df);
        }

        let missing: Vec<&str> = self
            .config
            .scale_columns
            .iter()
            .map(String::as_str)
            .filter(|name| df.column(name).is_err())
            .collect();
        if !missing.is_empty() {
            warn!(missing = ?missing, "Scaling columns not found, skipping scaling");
            return Ok(df);
        }

        let columns: Vec<&str> = self.config.scale_columns.iter().map(String::as_str).collect();
        let mut scaler = Scaler::new(self.config.scaler_type);
        let result = scaler.fit_transform(&df, &columns)?;

        report.scaled = true;
        info!(columns = ?columns, scaler = ?self.config.scaler_type, "Scaled numeric features");
        Ok(result)
    }
}
