/// Default Tensorflow Serving host.
pub const DEFAULT_HOST: &str = "yourhost.com";
/// Default Tensorflow Serving gRPC port.
pub const DEFAULT_PORT: u16 = 9000;
/// Default served model name.
pub const DEFAULT_MODEL_NAME: &str = "default";
/// Default model signature.
pub const DEFAULT_SIGNATURE_NAME: &str = "predict";
/// Default name of the image input tensor.
pub const DEFAULT_INPUT_NAME: &str = "images";
/// Default name of the scores output tensor.
pub const DEFAULT_OUTPUT_NAME: &str = "scores";

/// Everything needed to reach the server and address the model.
///
/// Constructed once at startup and handed to each step that needs it. The
/// defaults are the compiled-in values; tests and command line flags override
/// individual fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub model_name: String,
    pub signature_name: String,
    pub input_name: String,
    pub output_name: String,
    /// Pin a specific model version, otherwise the server picks the latest.
    pub model_version: Option<i64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_name: DEFAULT_MODEL_NAME.to_string(),
            signature_name: DEFAULT_SIGNATURE_NAME.to_string(),
            input_name: DEFAULT_INPUT_NAME.to_string(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            model_version: None,
        }
    }
}

impl Config {
    /// Plaintext gRPC endpoint of the server.
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_compiled_in_values() {
        let config = Config::default();
        assert_eq!(config.host, "yourhost.com");
        assert_eq!(config.port, 9000);
        assert_eq!(config.model_name, "default");
        assert_eq!(config.signature_name, "predict");
        assert_eq!(config.input_name, "images");
        assert_eq!(config.output_name, "scores");
        assert_eq!(config.model_version, None);
    }

    #[test]
    fn endpoint_is_plaintext_http() {
        let config = Config {
            host: "127.0.0.1".into(),
            port: 8500,
            ..Default::default()
        };
        assert_eq!(config.endpoint(), "http://127.0.0.1:8500");
    }
}
