use async_trait::async_trait;
use std::collections::HashMap;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::proto::serving::{
    model_spec::VersionChoice, prediction_service_client::PredictionServiceClient, ModelSpec,
    PredictRequest, PredictResponse,
};
use crate::proto::{tensor_shape_proto, TensorProto, TensorShapeProto};
use crate::request::{ModelDescription, PredictionRequest};
use crate::response::PredictionResponse;
use crate::tensor::{DataType, Tensor};

/// Something that can answer predict calls.
#[async_trait]
pub trait Predictor {
    /// Perform one blocking predict call.
    async fn predict(&mut self, request: PredictionRequest) -> Result<PredictionResponse>;
}

/// Opens the channel a [`Predictor`] talks over.
#[async_trait]
pub trait Connector {
    type Service: Predictor + Send;

    async fn connect(&self, config: &Config) -> Result<Self::Service>;
}

/// Connects a [`TensorflowServing`] client to the configured endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrpcConnector;

#[async_trait]
impl Connector for GrpcConnector {
    type Service = TensorflowServing;

    async fn connect(&self, config: &Config) -> Result<TensorflowServing> {
        let mut builder = TensorflowServing::new();
        builder.hostname(config.host.as_str()).port(config.port);
        builder.build().await
    }
}

/// Builder pattern used to build the client.
///
/// This struct is created by calling `TensorflowServing::new()`. It represents a partially
/// configured client. Use the builder pattern to construct a client gradually. Then call the
/// `build` method to construct a concrete `TensorflowServing` instance.
///
/// Required parameters are:
///
/// * hostname
/// * port
///
#[derive(Default)]
pub struct TensorflowServingBuilder {
    hostname: Option<String>,
    port: Option<u16>,
}

impl TensorflowServingBuilder {
    /// Set the hostname for the client
    ///
    pub fn hostname<S: Into<String>>(&mut self, hostname: S) -> &mut Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Set the port for the client
    ///
    pub fn port(&mut self, port: u16) -> &mut Self {
        self.port = Some(port);
        self
    }

    /// Build a `TensorflowServing` client, opening a plaintext channel.
    ///
    pub async fn build(&mut self) -> Result<TensorflowServing> {
        let hostname = self
            .hostname
            .take()
            .ok_or_else(|| Error::Argument("hostname not provided".into()))?;
        let port = self
            .port
            .ok_or_else(|| Error::Argument("port not provided".into()))?;

        let endpoint = format!("http://{}:{}", hostname, port);
        log::debug!("connecting to {}", endpoint);
        let prediction_client = PredictionServiceClient::connect(endpoint).await?;

        Ok(TensorflowServing { prediction_client })
    }
}

/// Tensorflow Serving client
///
/// Used to talk to a Tensorflow Serving server.
///
#[derive(Clone)]
pub struct TensorflowServing {
    prediction_client: PredictionServiceClient<tonic::transport::Channel>,
}

impl TensorflowServing {
    /// Construct a new `TensorflowServing` builder struct.
    ///
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> TensorflowServingBuilder {
        TensorflowServingBuilder::default()
    }
}

#[async_trait]
impl Predictor for TensorflowServing {
    async fn predict(&mut self, request: PredictionRequest) -> Result<PredictionResponse> {
        let request = PredictRequest::from(request);
        log::debug!(
            "sending predict request for model {:?} with inputs {:?}",
            request.model_spec.as_ref().map(|spec| spec.name.as_str()),
            request.inputs.keys().collect::<Vec<_>>()
        );
        let resp = self.prediction_client.predict(request).await?;
        PredictionResponse::try_from(resp.into_inner())
    }
}

impl From<&ModelDescription> for ModelSpec {
    fn from(desc: &ModelDescription) -> Self {
        ModelSpec {
            name: desc.name.clone(),
            version_choice: desc.version.map(VersionChoice::Version),
            signature_name: desc.signature_name.clone(),
        }
    }
}

impl From<Tensor> for TensorProto {
    fn from(tensor: Tensor) -> Self {
        let dims = tensor
            .shape
            .iter()
            .map(|d| tensor_shape_proto::Dim {
                size: *d,
                name: "".to_string(),
            })
            .collect();

        let tensor_shape = TensorShapeProto {
            dim: dims,
            ..Default::default()
        };

        TensorProto {
            dtype: tensor.dtype.tag(),
            tensor_shape: Some(tensor_shape),
            float_val: tensor.values,
            ..Default::default()
        }
    }
}

impl TryFrom<TensorProto> for Tensor {
    type Error = Error;

    fn try_from(proto: TensorProto) -> Result<Self> {
        let dtype = DataType::from_tag(proto.dtype);
        let shape = proto
            .tensor_shape
            .map(|shape| shape.dim.iter().map(|d| d.size).collect())
            .unwrap_or_default();

        // Servers may pack floats into the raw content bytes instead.
        let values = if proto.float_val.is_empty() && dtype == DataType::Float {
            unpack_floats(&proto.tensor_content)?
        } else {
            proto.float_val
        };

        Ok(Tensor {
            dtype,
            shape,
            values,
        })
    }
}

fn unpack_floats(content: &[u8]) -> Result<Vec<f32>> {
    if content.len() % 4 != 0 {
        return Err(Error::connection(format!(
            "malformed response: {} content bytes do not pack 32-bit floats",
            content.len()
        )));
    }
    Ok(content
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

impl From<PredictionRequest> for PredictRequest {
    fn from(request: PredictionRequest) -> Self {
        let inputs = request
            .inputs
            .into_iter()
            .map(|(name, tensor)| (name, tensor.into()))
            .collect();

        PredictRequest {
            model_spec: Some(ModelSpec::from(&request.model)),
            inputs,
            ..Default::default()
        }
    }
}

impl TryFrom<PredictResponse> for PredictionResponse {
    type Error = Error;

    fn try_from(resp: PredictResponse) -> Result<Self> {
        let outputs = resp
            .outputs
            .into_iter()
            .map(|(name, tensor)| Ok((name, Tensor::try_from(tensor)?)))
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(PredictionResponse { outputs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_model_spec_and_float_tensor() {
        let mut inputs = HashMap::new();
        inputs.insert(
            "images".to_string(),
            Tensor::floats(vec![1, 1, 1, 3], vec![30.0, 20.0, 10.0]),
        );
        let request = PredictionRequest {
            model: ModelDescription {
                name: "default".into(),
                signature_name: "predict".into(),
                version: Some(7),
            },
            inputs,
        };

        let proto = PredictRequest::from(request);

        let spec = proto.model_spec.unwrap();
        assert_eq!(spec.name, "default");
        assert_eq!(spec.signature_name, "predict");
        assert_eq!(spec.version_choice, Some(VersionChoice::Version(7)));

        let tensor = &proto.inputs["images"];
        assert_eq!(tensor.dtype, 1);
        let dims: Vec<i64> = tensor
            .tensor_shape
            .as_ref()
            .unwrap()
            .dim
            .iter()
            .map(|d| d.size)
            .collect();
        assert_eq!(dims, vec![1, 1, 1, 3]);
        assert_eq!(tensor.float_val, vec![30.0, 20.0, 10.0]);
    }

    #[test]
    fn unversioned_model_has_no_version_choice() {
        let spec = ModelSpec::from(&ModelDescription::from("resnet"));
        assert_eq!(spec.version_choice, None);
    }

    #[test]
    fn response_reads_float_list() {
        let mut outputs = HashMap::new();
        outputs.insert(
            "scores".to_string(),
            TensorProto::from(Tensor::floats(vec![1, 2], vec![0.25, 0.75])),
        );
        let resp = PredictionResponse::try_from(PredictResponse {
            outputs,
            ..Default::default()
        })
        .unwrap();

        let scores = &resp.outputs["scores"];
        assert_eq!(scores.shape, vec![1, 2]);
        assert_eq!(scores.values, vec![0.25, 0.75]);
    }

    #[test]
    fn response_unpacks_tensor_content() {
        let content: Vec<u8> = [0.5f32, 1.5]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let proto = TensorProto {
            dtype: DataType::FLOAT_TAG,
            tensor_content: content,
            ..Default::default()
        };

        let tensor = Tensor::try_from(proto).unwrap();
        assert_eq!(tensor.values, vec![0.5, 1.5]);
        assert!(tensor.shape.is_empty());
    }

    #[test]
    fn truncated_tensor_content_is_a_connection_error() {
        let proto = TensorProto {
            dtype: DataType::FLOAT_TAG,
            tensor_content: vec![0, 0, 128],
            ..Default::default()
        };
        assert!(matches!(
            Tensor::try_from(proto),
            Err(Error::Connection(_))
        ));
    }

    #[tokio::test]
    async fn builder_requires_hostname_and_port() {
        let err = TensorflowServing::new().port(9000).build().await.err().unwrap();
        assert!(matches!(err, Error::Argument(_)));

        let err = TensorflowServing::new()
            .hostname("localhost")
            .build()
            .await
            .err()
            .unwrap();
        assert!(matches!(err, Error::Argument(_)));
    }
}
