use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::parsing::header::{read_header_columns, sorted_header_columns};
use crate::utils::validation::validate_dataset_path;

#[derive(Args)]
pub struct HeadersArgs {
    /// Input table (.csv, .csv.gz, .tsv or .tsv.gz)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Keep file column order instead of sorting
    #[arg(long)]
    pub unsorted: bool,
}

/// Execute headers subcommand
///
/// # Errors
///
/// Returns an error if the dataset extension is unsupported or the header row
/// cannot be read.
pub fn run(args: &HeadersArgs, format: OutputFormat) -> anyhow::Result<()> {
    validate_dataset_path(&args.input)?;

    let columns = if args.unsorted {
        read_header_columns(&args.input)?
    } else {
        sorted_header_columns(&args.input)?
    };

    match format {
        OutputFormat::Text | OutputFormat::Json => {
            println!("{}", serde_json::to_string(&columns)?);
        }
        OutputFormat::Tsv => println!("{}", columns.join("\t")),
    }

    Ok(())
}
