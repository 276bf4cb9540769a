use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not access configuration: {0}")]
    Io(#[from] io::Error),

    #[error("configuration is not valid JSON: {0}")]
    Serde(String),

    #[error("configured directory `{}` is not a directory", .0.display())]
    NotADirectory(PathBuf),
}
