use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("table capacity must be greater than zero")]
    InvalidCapacity,
    #[error("key {key} was inserted but could not be found in the table")]
    KeyNotFound { key: usize },
    #[error("unknown hash function `{0}`")]
    UnknownHashFunction(String),
    #[error("invalid benchmark configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
