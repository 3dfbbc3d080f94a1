use clap::Parser;
use std::path::PathBuf;

use crate::client::{Connector, Predictor};
use crate::config::{
    Config, DEFAULT_HOST, DEFAULT_INPUT_NAME, DEFAULT_MODEL_NAME, DEFAULT_OUTPUT_NAME,
    DEFAULT_PORT, DEFAULT_SIGNATURE_NAME,
};
use crate::error::{Error, Result};
use crate::pixels::ImageSource;
use crate::request::build_request;
use crate::response::{select_class, ClassificationResult};
use crate::tensor::encode;

const MISSING_IMAGE: &str =
    "Please provide a path to the image to be recognized via TensorFlow Serving";

/// Classify an image with a model served by Tensorflow Serving.
#[derive(Debug, Parser)]
#[command(name = "tf-serving-classify", version)]
pub struct Arguments {
    /// Image to classify
    image: Option<PathBuf>,
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
    #[arg(short = 'm', long = "model", default_value = DEFAULT_MODEL_NAME)]
    model_name: String,
    #[arg(long = "signature", default_value = DEFAULT_SIGNATURE_NAME)]
    signature_name: String,
    #[arg(long = "input", default_value = DEFAULT_INPUT_NAME)]
    input_name: String,
    #[arg(long = "output", default_value = DEFAULT_OUTPUT_NAME)]
    output_name: String,
    #[arg(long = "model-version")]
    model_version: Option<i64>,
}

impl Arguments {
    pub fn config(&self) -> Config {
        Config {
            host: self.host.clone(),
            port: self.port,
            model_name: self.model_name.clone(),
            signature_name: self.signature_name.clone(),
            input_name: self.input_name.clone(),
            output_name: self.output_name.clone(),
            model_version: self.model_version,
        }
    }

    /// Classify the image named on the command line.
    pub async fn run<C: Connector>(self, connector: &C) -> Result<ClassificationResult> {
        let config = self.config();
        let image = self
            .image
            .ok_or_else(|| Error::Argument(MISSING_IMAGE.to_string()))?;
        classify(&config, &image, connector).await
    }
}

/// Load, encode, send and select: one full classification.
///
/// The channel is only opened once the image has been decoded and encoded.
pub async fn classify<S, C>(
    config: &Config,
    source: &S,
    connector: &C,
) -> Result<ClassificationResult>
where
    S: ImageSource + ?Sized,
    C: Connector,
{
    let img = source.to_image()?;
    let tensor = encode(&img)?;
    let request = build_request(config, tensor);

    let mut service = connector.connect(config).await?;
    let response = service.predict(request).await?;

    let result = select_class(&response, &config.output_name)?;
    log::info!("class {} scored {}", result.index, result.value);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_default_to_compiled_in_config() {
        let arguments = Arguments::try_parse_from(["tf-serving-classify", "cat.png"]).unwrap();
        assert_eq!(arguments.image, Some(PathBuf::from("cat.png")));
        assert_eq!(arguments.config(), Config::default());
    }

    #[test]
    fn flags_override_config() {
        let arguments = Arguments::try_parse_from([
            "tf-serving-classify",
            "--host",
            "localhost",
            "--port",
            "8500",
            "-m",
            "inception",
            "--signature",
            "serving_default",
            "--input",
            "pixels",
            "--output",
            "logits",
            "--model-version",
            "2",
            "cat.png",
        ])
        .unwrap();

        assert_eq!(
            arguments.config(),
            Config {
                host: "localhost".into(),
                port: 8500,
                model_name: "inception".into(),
                signature_name: "serving_default".into(),
                input_name: "pixels".into(),
                output_name: "logits".into(),
                model_version: Some(2),
            }
        );
    }

    #[test]
    fn image_is_optional_for_the_parser() {
        let arguments = Arguments::try_parse_from(["tf-serving-classify"]).unwrap();
        assert_eq!(arguments.image, None);
    }
}
