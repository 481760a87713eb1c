use crate::format::FileType;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported file type: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// Decoder failure, carried through untouched.
    #[error("{format} extraction failed: {source}")]
    Extraction {
        format: FileType,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn extraction<E>(format: FileType, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Extraction {
            format,
            source: source.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, Error::UnsupportedFormat { .. })
    }
}
