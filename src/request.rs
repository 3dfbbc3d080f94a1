use std::collections::HashMap;

use crate::config::Config;
use crate::tensor::Tensor;

/// Signature used when a model is named without one.
pub const DEFAULT_SIGNATURE: &str = "serving_default";

/// Description of a model
///
/// Names a served model, which of its signatures to invoke and optionally a
/// version. A `str` or `String` converts into a description using the
/// `serving_default` signature and no pinned version:
///
/// ```rust
/// # use tf_serving_classify::ModelDescription;
/// let description: ModelDescription = "resnet".into();
/// assert_eq!(description.signature_name, "serving_default");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescription {
    /// Name of the model
    pub name: String,
    /// Signature to invoke
    pub signature_name: String,
    /// Optional version of the model
    pub version: Option<i64>,
}

impl ModelDescription {
    pub fn from_config(config: &Config) -> Self {
        ModelDescription {
            name: config.model_name.clone(),
            signature_name: config.signature_name.clone(),
            version: config.model_version,
        }
    }
}

impl<S: Into<String>> From<S> for ModelDescription {
    fn from(name: S) -> Self {
        ModelDescription {
            name: name.into(),
            signature_name: DEFAULT_SIGNATURE.to_string(),
            version: None,
        }
    }
}

/// A predict call: which model to run and its named input tensors.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    pub model: ModelDescription,
    pub inputs: HashMap<String, Tensor>,
}

/// Wrap `tensor` as the single input of a request addressed per `config`.
pub fn build_request(config: &Config, tensor: Tensor) -> PredictionRequest {
    let mut inputs = HashMap::new();
    inputs.insert(config.input_name.clone(), tensor);

    PredictionRequest {
        model: ModelDescription::from_config(config),
        inputs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_input_keyed_by_configured_name() {
        let config = Config {
            input_name: "pixels".into(),
            model_name: "inception".into(),
            signature_name: "classify".into(),
            model_version: Some(3),
            ..Default::default()
        };
        let tensor = Tensor::floats(vec![1, 1, 1, 3], vec![1.0, 2.0, 3.0]);

        let request = build_request(&config, tensor.clone());

        assert_eq!(request.inputs.len(), 1);
        assert_eq!(request.inputs["pixels"], tensor);
        assert_eq!(
            request.model,
            ModelDescription {
                name: "inception".into(),
                signature_name: "classify".into(),
                version: Some(3),
            }
        );
    }

    #[test]
    fn name_converts_with_default_signature() {
        let description: ModelDescription = "resnet".into();
        assert_eq!(description.name, "resnet");
        assert_eq!(description.signature_name, DEFAULT_SIGNATURE);
        assert_eq!(description.version, None);
    }
}
