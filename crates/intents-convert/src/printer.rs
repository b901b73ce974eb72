//! Resource printers.
//!
//! A printer writes each resource to the sink in full and flushes it before
//! returning, so everything printed before a later failure stays visible
//! downstream.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use intents_core::ClientIntents;

use crate::error::PrintError;

/// Writes converted resources to an output sink.
pub trait ResourcePrinter {
    fn print(&mut self, resource: &ClientIntents, sink: &mut dyn Write) -> Result<(), PrintError>;
}

impl<P: ResourcePrinter + ?Sized> ResourcePrinter for Box<P> {
    fn print(&mut self, resource: &ClientIntents, sink: &mut dyn Write) -> Result<(), PrintError> {
        (**self).print(resource, sink)
    }
}

/// Multi-document YAML output. Every resource after the first is preceded by
/// a `---` line.
#[derive(Debug, Default)]
pub struct YamlPrinter {
    printed: usize,
}

impl YamlPrinter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResourcePrinter for YamlPrinter {
    fn print(&mut self, resource: &ClientIntents, sink: &mut dyn Write) -> Result<(), PrintError> {
        let body = serde_yaml::to_string(resource)?;
        if self.printed > 0 {
            sink.write_all(b"---\n")?;
        }
        sink.write_all(body.as_bytes())?;
        sink.flush()?;
        self.printed += 1;
        Ok(())
    }
}

/// Pretty-printed JSON, one object per resource.
#[derive(Debug, Default)]
pub struct JsonPrinter;

impl ResourcePrinter for JsonPrinter {
    fn print(&mut self, resource: &ClientIntents, sink: &mut dyn Write) -> Result<(), PrintError> {
        let mut body = serde_json::to_vec_pretty(resource)?;
        body.push(b'\n');
        sink.write_all(&body)?;
        sink.flush()?;
        Ok(())
    }
}

/// Output format selectable from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    /// A fresh printer for this format.
    pub fn printer(self) -> Box<dyn ResourcePrinter> {
        match self {
            OutputFormat::Yaml => Box::new(YamlPrinter::new()),
            OutputFormat::Json => Box::new(JsonPrinter),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unsupported output format '{}' (expected 'yaml' or 'json')",
                other
            )),
        }
    }
}
