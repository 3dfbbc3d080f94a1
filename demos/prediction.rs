use clap::Parser;
use std::path::PathBuf;
use tf_serving_classify::request::DEFAULT_SIGNATURE;
use tf_serving_classify::{
    build_request, encode_with, Config, ImageSource, Predictor, TensorflowServing,
};

/// Send a normalised image and dump every output tensor.
#[derive(Parser, Debug)]
struct Opts {
    image: PathBuf,
    #[arg(short = 'm', long = "model")]
    model: String,
    #[arg(long = "version")]
    model_version: Option<i64>,
    #[arg(long = "signature", default_value = DEFAULT_SIGNATURE)]
    signature: String,
    #[arg(long = "hostname", default_value = "127.0.0.1")]
    hostname: String,
    #[arg(long = "port", default_value = "9000")]
    port: u16,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> tf_serving_classify::Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let config = Config {
        host: opts.hostname,
        port: opts.port,
        model_name: opts.model,
        signature_name: opts.signature,
        model_version: opts.model_version,
        ..Default::default()
    };

    let img = opts.image.to_image()?;
    let tensor = encode_with(&img, |value| value / 255.)?;

    let mut serving = TensorflowServing::new()
        .hostname(config.host.as_str())
        .port(config.port)
        .build()
        .await?;

    let response = serving.predict(build_request(&config, tensor)).await?;
    for (name, output) in &response.outputs {
        println!("{} {:?}: {:?}", name, output.shape, output.values);
    }
    Ok(())
}
