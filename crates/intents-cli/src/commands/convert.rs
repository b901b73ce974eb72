//! `intents convert` command implementation.
//!
//! Converts a file, or every `.yaml`/`.yml` file in a directory, into
//! `ClientIntents` resources printed on stdout:
//!
//! ```text
//! intents convert -f intents/ | kubectl apply -f -
//! ```

use anyhow::{Context, Result};
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;

use intents_convert::{ConvertOptions, ConvertSummary, OutputFormat, convert};

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// File that contains the intents, or a directory containing intents files.
    #[arg(short = 'f', long = "filename", env = "INTENTS_FILENAME")]
    pub filename: PathBuf,

    /// Output format: yaml or json.
    #[arg(short, long, env = "INTENTS_OUTPUT", default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,
}

impl From<ConvertArgs> for ConvertOptions {
    fn from(args: ConvertArgs) -> Self {
        ConvertOptions::new(args.filename).with_format(args.output)
    }
}

/// Run the command, printing resources to stdout.
pub fn run(args: ConvertArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut sink = stdout.lock();
    run_with_sink(args, &mut sink)?;
    Ok(())
}

/// Run the command against an arbitrary sink.
pub fn run_with_sink(args: ConvertArgs, sink: &mut dyn Write) -> Result<ConvertSummary> {
    let options = ConvertOptions::from(args);
    tracing::info!(
        path = %options.path.display(),
        format = %options.format,
        "Converting intents"
    );

    let summary = convert(&options, sink).context("Intents conversion aborted")?;

    tracing::info!(
        files = summary.files,
        resources = summary.resources,
        "Conversion finished"
    );
    Ok(summary)
}
