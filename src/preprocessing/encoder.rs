//! Categorical encoding implementations

use super::{parse_number, text_values};
use crate::error::{PrepError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Type of encoder to use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EncoderType {
    /// Label encoding: sorted distinct values map to 0..n-1
    Label,
    /// One-hot encoding: one indicator column per distinct value
    OneHot,
}

/// Distinct values of a fitted column, in encoding order
#[derive(Debug, Clone, Serialize, Deserialize)]
enum Categories {
    Text(Vec<String>),
    Numeric(Vec<f64>),
}

impl Categories {
    fn labels(&self) -> Vec<String> {
        match self {
            Categories::Text(values) => values.clone(),
            Categories::Numeric(values) => values.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Categories::Text(values) => values.len(),
            Categories::Numeric(values) => values.len(),
        }
    }
}

/// Categorical encoder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encoder {
    encoder_type: EncoderType,
    separator: String,
    // Fitted columns in fit order
    mappings: Vec<(String, Categories)>,
    is_fitted: bool,
}

impl Encoder {
    /// Create a new encoder
    pub fn new(encoder_type: EncoderType) -> Self {
        Self {
            encoder_type,
            separator: "_".to_string(),
            mappings: Vec::new(),
            is_fitted: false,
        }
    }

    /// Set the separator placed between column name and category
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Fit the encoder to the data
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        self.mappings.clear();

        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| PrepError::ColumnNotFound(col_name.to_string()))?;

            let categories = self.build_categories(column)?;
            self.mappings.push((col_name.to_string(), categories));
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the data
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PrepError::NotFitted("Encoder"));
        }

        match self.encoder_type {
            EncoderType::Label => self.transform_label(df),
            EncoderType::OneHot => self.transform_onehot(df),
        }
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    /// Category labels of a fitted column, in encoding order
    pub fn categories(&self, column: &str) -> Option<Vec<String>> {
        self.mappings
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, categories)| categories.labels())
    }

    /// Names of the indicator columns a one-hot transform produces
    pub fn feature_names(&self) -> Vec<String> {
        self.mappings
            .iter()
            .flat_map(|(name, categories)| {
                categories
                    .labels()
                    .into_iter()
                    .map(move |label| format!("{}{}{}", name, self.separator, label))
            })
            .collect()
    }

    /// Number of indicator columns a one-hot transform produces
    pub fn n_features(&self) -> usize {
        self.mappings.iter().map(|(_, c)| c.len()).sum()
    }

    fn build_categories(&self, column: &Column) -> Result<Categories> {
        let values = text_values(column)?;
        let present: Vec<&str> = values.iter().flatten().map(String::as_str).collect();

        // Label targets that are all numbers sort by value, like a numeric column would
        if self.encoder_type == EncoderType::Label {
            let numbers: Option<Vec<f64>> = present.iter().map(|v| parse_number(v)).collect();
            if let Some(mut numbers) = numbers {
                numbers.sort_by(|a, b| a.total_cmp(b));
                numbers.dedup_by(|a, b| a == b || (a.is_nan() && b.is_nan()));
                return Ok(Categories::Numeric(numbers));
            }
        }

        let mut distinct: Vec<String> = present.iter().map(|v| v.to_string()).collect();
        distinct.sort();
        distinct.dedup();
        Ok(Categories::Text(distinct))
    }

    fn transform_label(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut result = df.clone();

        for (col_name, categories) in &self.mappings {
            let Ok(column) = df.column(col_name) else {
                continue;
            };
            let values = text_values(column)?;

            let missing = values.iter().filter(|v| v.is_none()).count();
            if missing > 0 {
                return Err(PrepError::DataError(format!(
                    "column '{}' has {} empty value(s) and cannot be label encoded",
                    col_name, missing
                )));
            }

            let encoded: Vec<Option<i64>> = match categories {
                Categories::Text(labels) => {
                    let index: HashMap<&str, i64> = labels
                        .iter()
                        .enumerate()
                        .map(|(i, label)| (label.as_str(), i as i64))
                        .collect();
                    values
                        .iter()
                        .map(|v| v.as_deref().and_then(|v| index.get(v).copied()))
                        .collect()
                }
                Categories::Numeric(labels) => values
                    .iter()
                    .map(|v| {
                        let x = v.as_deref().and_then(parse_number)?;
                        labels
                            .binary_search_by(|probe| numeric_order(*probe, x))
                            .ok()
                            .map(|i| i as i64)
                    })
                    .collect(),
            };

            result.with_column(Column::new(col_name.as_str().into(), encoded))?;
        }

        Ok(result)
    }

    fn transform_onehot(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut columns: Vec<Column> = df
            .get_columns()
            .iter()
            .filter(|c| !self.mappings.iter().any(|(name, _)| c.name().as_str() == name))
            .cloned()
            .collect();

        for (col_name, categories) in &self.mappings {
            let Ok(column) = df.column(col_name) else {
                continue;
            };
            let values = text_values(column)?;

            for category in categories.labels() {
                let indicator: Vec<f64> = values
                    .iter()
                    .map(|v| if v.as_deref() == Some(category.as_str()) { 1.0 } else { 0.0 })
                    .collect();
                let name = format!("{}{}{}", col_name, self.separator, category);
                columns.push(Column::new(name.into(), indicator));
            }
        }

        Ok(DataFrame::new(columns)?)
    }
}

fn numeric_order(a: f64, b: f64) -> Ordering {
    if a == b {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}
