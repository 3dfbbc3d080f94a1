use clap::Parser;
use std::process;
use tf_serving_classify::{cli::Arguments, GrpcConnector};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match Arguments::parse().run(&GrpcConnector).await {
        Ok(result) => println!("{}", result),
        Err(error) => {
            log::debug!("{:?}", error);
            eprintln!("{}", error);
            process::exit(error.exit_code());
        }
    }
}
