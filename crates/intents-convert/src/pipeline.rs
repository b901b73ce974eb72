//! The conversion pipeline.
//!
//! ```text
//! resolve(path) ─► for each file ─► open ─► split documents ─► decode ─► build ─► print
//! ```
//!
//! Files are processed one at a time in resolution order and documents one at
//! a time in stream order. The first error stops the run: no later document or
//! file is touched, and resources already printed are left as they are.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use intents_core::ClientIntents;

use crate::decoder::decode;
use crate::error::ConvertError;
use crate::printer::{OutputFormat, ResourcePrinter};
use crate::resolver::resolve;
use crate::stream::DocumentStream;

/// Opens resolved files for reading.
pub trait DocumentSource {
    fn open(&mut self, path: &Path) -> io::Result<Box<dyn BufRead>>;
}

/// Reads files from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSource;

impl DocumentSource for FsSource {
    fn open(&mut self, path: &Path) -> io::Result<Box<dyn BufRead>> {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

/// Inputs to a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// A single intents file, or a directory of them.
    pub path: PathBuf,
    pub format: OutputFormat,
}

impl ConvertOptions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: OutputFormat::default(),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// Counts from a successful run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    pub files: usize,
    pub resources: usize,
}

/// Drives files through decode, build and print.
pub struct Converter<P, S = FsSource> {
    printer: P,
    source: S,
}

impl<P: ResourcePrinter> Converter<P> {
    pub fn new(printer: P) -> Self {
        Self {
            printer,
            source: FsSource,
        }
    }
}

impl<P: ResourcePrinter, S: DocumentSource> Converter<P, S> {
    /// Use a custom source for opening resolved files.
    pub fn with_source<T: DocumentSource>(self, source: T) -> Converter<P, T> {
        Converter {
            printer: self.printer,
            source,
        }
    }

    /// Convert every document under `path`, printing resources to `sink`.
    pub fn convert(
        &mut self,
        path: &Path,
        sink: &mut dyn Write,
    ) -> Result<ConvertSummary, ConvertError> {
        let files = resolve(path)?;
        tracing::debug!(path = %path.display(), files = files.len(), "Resolved intents files");

        let mut summary = ConvertSummary::default();
        for file in &files {
            summary.resources += self.convert_file(file, sink)?;
            summary.files += 1;
        }

        tracing::info!(
            files = summary.files,
            resources = summary.resources,
            "Converted intents"
        );
        Ok(summary)
    }

    /// Convert one file. The reader is dropped, closing the file, on every
    /// return path.
    fn convert_file(&mut self, path: &Path, sink: &mut dyn Write) -> Result<usize, ConvertError> {
        tracing::debug!(file = %path.display(), "Opening intents file");
        let reader = self
            .source
            .open(path)
            .map_err(|e| ConvertError::io(path, e))?;

        let mut converted = 0;
        for (idx, raw) in DocumentStream::new(reader).enumerate() {
            let document = idx + 1;
            let raw = raw.map_err(|source| ConvertError::Read {
                path: path.to_path_buf(),
                source,
            })?;

            let spec = decode(&raw).map_err(|e| ConvertError::decode(path, document, e))?;
            let resource = ClientIntents::from_spec(&spec);

            self.printer
                .print(&resource, sink)
                .map_err(|source| ConvertError::Write {
                    path: path.to_path_buf(),
                    document,
                    source,
                })?;

            tracing::debug!(
                file = %path.display(),
                document,
                name = %resource.name(),
                "Converted document"
            );
            converted += 1;
        }

        Ok(converted)
    }
}

/// Convert `options.path` with the printer for `options.format`.
pub fn convert(
    options: &ConvertOptions,
    sink: &mut dyn Write,
) -> Result<ConvertSummary, ConvertError> {
    Converter::new(options.format.printer()).convert(&options.path, sink)
}
