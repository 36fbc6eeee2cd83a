//! Data preprocessing module
//!
//! Turns a raw churn table into a fully numeric one:
//! - Numeric coercion with a fill value for unparseable entries
//! - Exact-duplicate row removal
//! - Identifier column removal
//! - Label encoding of the target column
//! - One-hot expansion of categorical columns
//! - Standard scaling of the charge/tenure features

mod config;
mod dedup;
mod encoder;
mod imputer;
mod pipeline;
mod scaler;

pub use config::PreprocessingConfig;
pub use dedup::drop_duplicates;
pub use encoder::{Encoder, EncoderType};
pub use imputer::{ImputeStrategy, Imputer};
pub use pipeline::{DataPreprocessor, PipelineReport};
pub use scaler::{Scaler, ScalerType};

use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Column kind, which decides the transform applied to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Numeric,
    Categorical,
    Boolean,
    Identifier,
    Target,
}

/// Check if dtype is numeric
pub(crate) fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Parse a textual cell as a float, ignoring surrounding whitespace
pub(crate) fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

/// Read a column as optional strings, whatever its dtype
pub(crate) fn text_values(column: &Column) -> Result<Vec<Option<String>>> {
    let casted = column.cast(&DataType::String)?;
    let ca = casted.str()?;
    Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
}

/// Read a numeric or numeric-looking text column as optional floats.
///
/// Text cells that do not parse come back as `None`.
pub(crate) fn float_values(column: &Column) -> Result<Vec<Option<f64>>> {
    if is_numeric_dtype(column.dtype()) {
        let casted = column.cast(&DataType::Float64)?;
        let ca = casted.f64()?;
        return Ok(ca.into_iter().collect());
    }

    Ok(text_values(column)?
        .into_iter()
        .map(|v| v.as_deref().and_then(parse_number))
        .collect())
}

/// Rewrite a boolean column's values as `True`/`False`, whatever their case
pub(crate) fn normalize_boolean(column: &Column) -> Result<Column> {
    let values: Vec<Option<&str>> = text_values(column)?
        .iter()
        .map(|v| {
            v.as_deref().map(|v| {
                if v.eq_ignore_ascii_case("true") {
                    "True"
                } else {
                    "False"
                }
            })
        })
        .collect();
    Ok(Column::new(column.name().clone(), values))
}

/// Infer the kind of a column from its dtype and, for text, its values.
///
/// A text column is numeric when every non-null value parses as a number,
/// boolean when every non-null value is `true`/`false`, categorical
/// otherwise. A column without any non-null value counts as numeric.
pub fn infer_column_type(column: &Column) -> Result<ColumnType> {
    let dtype = column.dtype();
    if is_numeric_dtype(dtype) {
        return Ok(ColumnType::Numeric);
    }
    if matches!(dtype, DataType::Boolean) {
        return Ok(ColumnType::Boolean);
    }

    let values = text_values(column)?;
    let present: Vec<&str> = values.iter().flatten().map(String::as_str).collect();

    if present.iter().all(|v| parse_number(v).is_some()) {
        Ok(ColumnType::Numeric)
    } else if present
        .iter()
        .all(|v| v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("false"))
    {
        Ok(ColumnType::Boolean)
    } else {
        Ok(ColumnType::Categorical)
    }
}
