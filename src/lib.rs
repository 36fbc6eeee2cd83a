//! Churn Prep - customer-churn data preprocessing
//!
//! Converts a raw customer-churn CSV into a model-ready numeric table in a
//! single pass: load, clean and encode, write.
//!
//! # Modules
//! - [`preprocessing`] - Coercion, deduplication, encoding and scaling steps
//! - [`utils`] - CSV loading and saving
//! - [`cli`] - Command-line interface

// Core error handling
pub mod error;

pub mod preprocessing;
pub mod utils;

// Services
pub mod cli;

pub use error::{PrepError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{PrepError, Result};
    pub use crate::preprocessing::{
        ColumnType, DataPreprocessor, Encoder, EncoderType, ImputeStrategy, Imputer,
        PipelineReport, PreprocessingConfig, Scaler, ScalerType,
    };
    pub use crate::utils::{DataLoader, DataSaver};
}
