use std::path::{Path, PathBuf};
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The source workbook could not be opened or parsed.
#[derive(Debug, Error)]
#[error("failed to load workbook '{}': {message}", path.display())]
pub struct LoadError {
    path: PathBuf,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl LoadError {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct InvalidConfigError {
    message: String,
    field: Option<&'static str>,
}

impl InvalidConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn field(&self) -> Option<&'static str> {
        self.field
    }
}

/// Serializing one chunk's output workbook failed.
#[derive(Debug, Error)]
#[error("failed to write chunk {chunk} to '{}': {source}", path.display())]
pub struct WriteError {
    chunk: usize,
    path: PathBuf,
    #[source]
    source: BoxError,
}

impl WriteError {
    pub fn new(chunk: usize, path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        Self {
            chunk,
            path: path.into(),
            source: source.into(),
        }
    }

    /// One-based chunk index, matching the number in the output file name.
    pub fn chunk(&self) -> usize {
        self.chunk
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Error)]
pub enum SplitError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] InvalidConfigError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

impl SplitError {
    pub fn code(&self) -> &'static str {
        match self {
            SplitError::Load(_) => "LOAD_ERROR",
            SplitError::InvalidConfig(_) => "INVALID_CONFIG",
            SplitError::Write(_) => "WRITE_ERROR",
        }
    }
}
