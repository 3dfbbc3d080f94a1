//! Classify an image with a model hosted by Tensorflow Serving.
//!
//! The pipeline is linear: load an image, encode it as a `[1, W, H, 3]` float
//! tensor, wrap it in a predict request, send it over a gRPC channel and pick
//! the highest scoring class out of the named output tensor.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod pixels;
pub mod request;
pub mod response;
pub mod tensor;

/// Generated wire types for the prediction service.
pub mod proto {
    tonic::include_proto!("tensorflow");

    pub mod serving {
        tonic::include_proto!("tensorflow.serving");
    }
}

pub use crate::client::{
    Connector, GrpcConnector, Predictor, TensorflowServing, TensorflowServingBuilder,
};
pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::pixels::{ImageSource, PixelImage};
pub use crate::request::{build_request, ModelDescription, PredictionRequest};
pub use crate::response::{select_class, ClassificationResult, PredictionResponse};
pub use crate::tensor::{encode, encode_with, DataType, Tensor};
