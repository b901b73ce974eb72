//! # intents-convert
//!
//! Converts intents YAML files into `ClientIntents` resources.
//!
//! ```no_run
//! use intents_convert::{ConvertOptions, convert};
//!
//! let options = ConvertOptions::new("intents/");
//! let mut stdout = std::io::stdout().lock();
//! let summary = convert(&options, &mut stdout)?;
//! eprintln!("converted {} resources", summary.resources);
//! # Ok::<(), intents_convert::ConvertError>(())
//! ```
//!
//! The stages are exposed individually as well:
//!
//! | Stage | Item |
//! |-------|------|
//! | path resolution | [`resolve`] |
//! | document splitting | [`DocumentStream`] |
//! | strict decoding | [`decode`] |
//! | resource building | [`intents_core::ClientIntents::from_spec`] |
//! | printing | [`ResourcePrinter`] |
//! | orchestration | [`Converter`] |

pub mod decoder;
pub mod error;
pub mod pipeline;
pub mod printer;
pub mod resolver;
pub mod stream;

pub use decoder::decode;
pub use error::{ConvertError, ConvertErrorKind, DecodeError, PrintError, SchemaError};
pub use pipeline::{
    ConvertOptions, ConvertSummary, Converter, DocumentSource, FsSource, convert,
};
pub use printer::{JsonPrinter, OutputFormat, ResourcePrinter, YamlPrinter};
pub use resolver::{INTENTS_EXTENSIONS, has_intents_extension, resolve};
pub use stream::DocumentStream;
