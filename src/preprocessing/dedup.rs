//! Exact-duplicate row removal

use crate::error::Result;
use polars::prelude::*;

/// Remove every row that repeats an earlier row in all columns.
///
/// First occurrences keep their relative order. Returns the filtered
/// frame and the number of rows removed.
pub fn drop_duplicates(df: &DataFrame) -> Result<(DataFrame, usize)> {
    if df.height() == 0 {
        return Ok((df.clone(), 0));
    }

    let result = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
    let removed = df.height() - result.height();
    Ok((result, removed))
}
