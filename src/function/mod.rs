use crate::error::{ParseError, PdfResult};

pub use self::postscript_calculator::PostScriptCalculatorFunction;

mod postscript_calculator;

/// Checks that `intervals` is a non-empty list of `[min max]` pairs with
/// `min <= max`, as required of both `Domain` and `Range`
fn validate_intervals(key: &'static str, intervals: &[f32]) -> PdfResult<()> {
    let is_valid = !intervals.is_empty()
        && intervals.len() % 2 == 0
        && intervals
            .chunks_exact(2)
            .all(|interval| interval[0] <= interval[1]);

    if !is_valid {
        anyhow::bail!(ParseError::InvalidInterval {
            key,
            found: intervals.to_vec(),
        });
    }

    Ok(())
}

/// Clips `n` to the nearest boundary of a `[min max]` pair
fn clip(n: f32, interval: &[f32]) -> f32 {
    if n < interval[0] {
        interval[0]
    } else if n > interval[1] {
        interval[1]
    } else {
        n
    }
}
