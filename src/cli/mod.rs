//! Command-line interface for vdj-import.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **headers**: Print the header row of a CSV/TSV table
//! - **validate**: Check a table against a format's column rules
//! - **formats**: List supported formats and their required columns
//! - **serve**: Start the JSON API
//!
//! ## Usage
//!
//! ```text
//! # Print the sorted header of a table as a JSON array
//! vdj-import headers clones.tsv.gz
//!
//! # Validate an AIRR single-cell table
//! vdj-import validate clones.tsv --input-format airr-sc
//!
//! # Validate a custom mapping with UMI counts as primary count
//! vdj-import validate clones.csv --input-format custom --primary-count umi \
//!     --map cdr3-aa=aaSeq --map v-gene=bestV --map j-gene=bestJ --map umi-count=umis
//!
//! # JSON output for scripting
//! vdj-import --format json validate clones.tsv --input-format mixcr
//!
//! # Start the API
//! vdj-import serve --port 8080
//! ```

use clap::{Parser, Subcommand};

pub mod formats;
pub mod headers;
pub mod validate;

#[derive(Parser)]
#[command(name = "vdj-import")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Check V(D)J clonotype table headers against vendor column rules")]
#[command(
    long_about = "vdj-import checks whether a clonotype table exported by ImmunoSEQ, Qiagen, MiXCR, Cell Ranger or an AIRR-compliant tool carries the columns needed to import it.\n\nIt reads only the header row and reports:\n- Which required columns are missing for the chosen format\n- How native headers map to canonical fields\n- Whether the import arguments are complete"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the header row of a CSV/TSV table
    Headers(headers::HeadersArgs),

    /// Validate a table's headers against a format
    Validate(validate::ValidateArgs),

    /// List supported formats and their column rules
    Formats(formats::FormatsArgs),

    /// Start the JSON API server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
