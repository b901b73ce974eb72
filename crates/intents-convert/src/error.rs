//! Error types for the conversion pipeline.

use std::io;
use std::path::{Path, PathBuf};

use intents_core::SchemaViolation;
use thiserror::Error;

/// Errors that abort a conversion run.
///
/// Every variant names the offending path; decode and write failures also
/// carry the 1-based index of the document within that file.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input path (or a resolved file) does not exist.
    #[error("path {} does not exist", .path.display())]
    NotFound { path: PathBuf },

    /// The input path exists but could not be inspected, listed or opened.
    #[error("failed to access {}: {source}", .path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading a file failed part-way through.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A document is not well-formed YAML.
    #[error("unable to parse YAML file {} (document {document}): {source}", .path.display())]
    Syntax {
        path: PathBuf,
        document: usize,
        #[source]
        source: serde_yaml::Error,
    },

    /// A document is well-formed but does not match the intents schema.
    #[error("invalid intents in {} (document {document}): {source}", .path.display())]
    Schema {
        path: PathBuf,
        document: usize,
        #[source]
        source: SchemaError,
    },

    /// The converted resource could not be written to the output.
    #[error("failed to write resource for {} (document {document}): {source}", .path.display())]
    Write {
        path: PathBuf,
        document: usize,
        #[source]
        source: PrintError,
    },
}

/// Coarse classification of a [`ConvertError`], for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertErrorKind {
    NotFound,
    Access,
    Read,
    Syntax,
    Schema,
    Write,
}

impl ConvertError {
    /// Classify an I/O failure on `path` that happened before any content was read.
    pub fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Access {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub(crate) fn decode(path: &Path, document: usize, err: DecodeError) -> Self {
        let path = path.to_path_buf();
        match err {
            DecodeError::Syntax(source) => Self::Syntax {
                path,
                document,
                source,
            },
            DecodeError::Schema(source) => Self::Schema {
                path,
                document,
                source,
            },
        }
    }

    pub fn kind(&self) -> ConvertErrorKind {
        match self {
            Self::NotFound { .. } => ConvertErrorKind::NotFound,
            Self::Access { .. } => ConvertErrorKind::Access,
            Self::Read { .. } => ConvertErrorKind::Read,
            Self::Syntax { .. } => ConvertErrorKind::Syntax,
            Self::Schema { .. } => ConvertErrorKind::Schema,
            Self::Write { .. } => ConvertErrorKind::Write,
        }
    }

    /// The file (or input path) the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::Access { path, .. }
            | Self::Read { path, .. }
            | Self::Syntax { path, .. }
            | Self::Schema { path, .. }
            | Self::Write { path, .. } => path,
        }
    }

    /// Index of the offending document within its file, when known.
    pub fn document(&self) -> Option<usize> {
        match self {
            Self::Syntax { document, .. }
            | Self::Schema { document, .. }
            | Self::Write { document, .. } => Some(*document),
            _ => None,
        }
    }
}

/// Failure to decode a single raw document.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed YAML: {0}")]
    Syntax(#[source] serde_yaml::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// A document that parsed but does not fit the intents schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Unknown or missing field, or a record of the wrong shape.
    #[error(transparent)]
    Violation(#[from] SchemaViolation),

    /// A field value of the wrong type (e.g. an unsupported HTTP method).
    #[error("invalid field value: {0}")]
    InvalidValue(#[source] serde_yaml::Error),
}

/// Failure to print a resource.
#[derive(Debug, Error)]
pub enum PrintError {
    #[error("failed to serialize resource as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to serialize resource as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write to output: {0}")]
    Io(#[from] io::Error),
}
