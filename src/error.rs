use std::path::PathBuf;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Our custom result type
pub type Result<T> = std::result::Result<T, Error>;

/// Every way a classification run can fail. All of them are terminal.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Argument(String),

    #[error("could not open provided image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ::image::ImageError,
    },

    #[error(
        "pixel (column {col}, row {row}) lies outside the {width}x{height} image; \
         only square images can be encoded"
    )]
    PixelOutOfBounds {
        col: u32,
        row: u32,
        width: u32,
        height: u32,
    },

    #[error(
        "no connection to Tensorflow Serving, please check your connection \
         or the server's availability: {}",
        with_causes(.0)
    )]
    Connection(#[source] BoxError),

    #[error("response has no output tensor named {0:?}")]
    MissingOutput(String),

    #[error("output tensor {0:?} holds no values")]
    EmptyResult(String),
}

/// Render an error followed by every cause in its source chain.
fn with_causes(err: &BoxError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&**err);
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}

impl Error {
    pub(crate) fn connection<E: Into<BoxError>>(err: E) -> Self {
        Error::Connection(err.into())
    }

    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Argument(_) => 2,
            Error::Decode { .. } => 3,
            Error::Connection(_) => 4,
            Error::MissingOutput(_) => 5,
            Error::EmptyResult(_) => 6,
            Error::PixelOutOfBounds { .. } => 7,
        }
    }
}

impl From<tonic::transport::Error> for Error {
    fn from(err: tonic::transport::Error) -> Self {
        Error::connection(err)
    }
}

impl From<tonic::Status> for Error {
    fn from(status: tonic::Status) -> Self {
        Error::connection(status)
    }
}
