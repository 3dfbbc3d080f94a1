use std::path::PathBuf;
use walkdir::WalkDir;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }

    for entry in WalkDir::new("protos") {
        let entry = entry?;
        if entry.path().extension().map_or(false, |ext| ext == "proto") {
            println!("cargo:rerun-if-changed={}", entry.path().display());
        }
    }

    let protos = &["protos/tensorflow_serving/apis/prediction_service.proto"];
    let includes: &[PathBuf] = &["protos".into(), protoc_bin_vendored::include_path()?];
    tonic_build::configure().compile_protos(protos, includes)?;
    Ok(())
}
