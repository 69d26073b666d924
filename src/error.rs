use std::path::PathBuf;

use thiserror::Error;

/// Why an image or sound could not be loaded. Never fatal: loaders log it
/// and fall back to a placeholder sprite or a silent clip.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is empty", .path.display())]
    Empty { path: PathBuf },

    #[error("{}: unknown colour `{name}`", .path.display())]
    UnknownColor { path: PathBuf, name: String },

    #[error("{}: unknown header option `{token}`", .path.display())]
    BadHeader { path: PathBuf, token: String },
}
