use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("reading request file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unknown file extension: {extension:?} ({})", path.display())]
    UnknownExtension { path: PathBuf, extension: String },
    #[error("parsing {} as yaml: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("parsing {} as json: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid request line {line:?} in {}", path.display())]
    InvalidRequestLine { path: PathBuf, line: String },
}
