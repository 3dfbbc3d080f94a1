use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::tensor::Tensor;

/// Output tensors returned by a predict call, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionResponse {
    pub outputs: HashMap<String, Tensor>,
}

/// The winning class of a prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationResult {
    pub index: usize,
    pub value: f32,
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Result class is {} with response {}", self.index, self.value)
    }
}

/// Pick the highest value of the output tensor called `output_name`.
///
/// Ties resolve to the lowest index. A NaN score poisons the maximum, so the
/// first NaN is selected wherever it sits.
pub fn select_class(
    response: &PredictionResponse,
    output_name: &str,
) -> Result<ClassificationResult> {
    let tensor = response
        .outputs
        .get(output_name)
        .ok_or_else(|| Error::MissingOutput(output_name.to_string()))?;

    let first = *tensor
        .values
        .first()
        .ok_or_else(|| Error::EmptyResult(output_name.to_string()))?;

    let mut best = ClassificationResult {
        index: 0,
        value: first,
    };
    for (index, value) in tensor.values.iter().copied().enumerate() {
        if value.is_nan() {
            return Ok(ClassificationResult { index, value });
        }
        if value > best.value {
            best = ClassificationResult { index, value };
        }
    }

    Ok(best)
}
