use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{debug, info};

use crate::cli::OutputFormat;
use crate::core::args::ImportArgs;
use crate::core::mapping::{CustomMapping, MappingEntry};
use crate::core::types::{Chain, CountType, FormatId};
use crate::matching::engine::resolve_columns;
use crate::matching::gate::{evaluate, options_from_args, GateState};
use crate::matching::resolver::ColumnMapping;
use crate::parsing::header::read_header_columns;
use crate::rules::RULES_VERSION;
use crate::utils::validation::validate_dataset_path;

#[derive(Args)]
pub struct ValidateArgs {
    /// Input table (.csv, .csv.gz, .tsv or .tsv.gz)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Table format: immunoSeq, qiagen, mixcr, mixcr-sc, cellranger, airr, airr-sc or custom
    #[arg(short = 't', long)]
    pub input_format: Option<FormatId>,

    /// Primary count type (read or umi); selects the abundance column for custom mappings
    #[arg(long)]
    pub primary_count: Option<CountType>,

    /// Custom mapping entry FIELD=HEADER (repeatable), e.g. --map v-gene=bestVGene
    #[arg(long = "map", value_name = "FIELD=HEADER")]
    pub mappings: Vec<MappingEntry>,

    /// Chain to import (repeatable); defaults to all chains
    #[arg(long = "chain", value_name = "CHAIN")]
    pub chains: Vec<Chain>,

    /// JSON file with import arguments (datasetRef, format, chains, customMapping, primaryCount);
    /// command-line options take precedence
    #[arg(long = "args", value_name = "FILE")]
    pub args_file: Option<PathBuf>,
}

/// Execute validate subcommand
///
/// Returns whether the import may run.
///
/// # Errors
///
/// Returns an error if the arguments file or the table header cannot be read,
/// or the dataset extension is unsupported.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ValidateArgs, format: OutputFormat) -> anyhow::Result<bool> {
    let import_args = build_import_args(&args)?;
    validate_dataset_path(&args.input)?;

    let headers = read_header_columns(&args.input)?;
    info!("Read {} header columns from {}", headers.len(), args.input.display());

    let state = evaluate(&import_args, Some(headers.as_slice()));
    debug!("Gate state: {}", state.as_str());

    let columns = import_args
        .format
        .map(|f| resolve_columns(f, headers.as_slice(), &options_from_args(&import_args)))
        .unwrap_or_default();

    match format {
        OutputFormat::Text => {
            print_text_report(&args.input, &import_args, headers.len(), &state, &columns);
        }
        OutputFormat::Json => {
            print_json_report(&args.input, &import_args, headers.len(), &state, &columns)?;
        }
        OutputFormat::Tsv => print_tsv_report(&args.input, &import_args, &state),
    }

    Ok(state.can_run())
}

/// Merge the optional arguments file with command-line options.
fn build_import_args(args: &ValidateArgs) -> anyhow::Result<ImportArgs> {
    let mut import_args = match &args.args_file {
        Some(path) => load_args_file(path)?,
        None => ImportArgs::default(),
    };

    import_args.dataset_ref = Some(args.input.display().to_string());
    if let Some(format) = args.input_format {
        import_args.format = Some(format);
    }
    if let Some(primary) = args.primary_count {
        import_args.primary_count = primary;
    }
    if !args.chains.is_empty() {
        import_args.chains.clone_from(&args.chains);
    }
    if !args.mappings.is_empty() {
        let overlay: CustomMapping = args.mappings.iter().cloned().collect();
        import_args.custom_mapping.merge(&overlay);
    }

    Ok(import_args)
}

fn load_args_file(path: &Path) -> anyhow::Result<ImportArgs> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read arguments file {}: {e}", path.display()))?;
    let parsed = serde_json::from_str(&text)
        .map_err(|e| anyhow::anyhow!("Invalid arguments file {}: {e}", path.display()))?;
    Ok(parsed)
}

fn print_text_report(
    input: &Path,
    import_args: &ImportArgs,
    header_count: usize,
    state: &GateState,
    columns: &ColumnMapping,
) {
    println!("Validation Results");
    println!("{}", "=".repeat(60));

    println!("\nDataset: {}", input.display());
    match import_args.format {
        Some(f) => println!("  Format: {} [{f}]", f.display_name()),
        None => println!("  Format: (none)"),
    }
    println!("  Header columns: {header_count}");
    println!("  Primary count: {}", import_args.primary_count.as_str());
    println!(
        "  Chains: {}",
        import_args
            .chains
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    println!("\nStatus: {}", state.as_str().to_uppercase());

    if !state.problems().is_empty() {
        println!("\nArgument problems:");
        for problem in state.problems() {
            println!("  - {problem}");
        }
    }

    if let Some(result) = state.result() {
        if !result.missing_columns().is_empty() {
            println!("\nMissing columns:");
            for column in result.missing_columns() {
                println!("  - {column}");
            }
        }
    }

    if !columns.is_empty() {
        println!("\nColumn mapping:");
        for (field, header) in columns.iter() {
            println!("  {:<12} <- {header}", field.as_str());
        }
    }
}

fn print_json_report(
    input: &Path,
    import_args: &ImportArgs,
    header_count: usize,
    state: &GateState,
    columns: &ColumnMapping,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "dataset": input.display().to_string(),
        "format": import_args.format,
        "primaryCount": import_args.primary_count,
        "chains": import_args.chains,
        "headerCount": header_count,
        "state": state.as_str(),
        "argsValid": state.problems().is_empty(),
        "problems": state.problems(),
        "result": state.result(),
        "columns": columns,
        "rulesVersion": RULES_VERSION,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_report(input: &Path, import_args: &ImportArgs, state: &GateState) {
    println!("dataset\tformat\tstate\tmissing_columns");
    let missing = state
        .result()
        .map(|r| r.missing_columns().join(","))
        .unwrap_or_default();
    println!(
        "{}\t{}\t{}\t{}",
        input.display(),
        import_args.format.map_or("", FormatId::as_str),
        state.as_str(),
        missing,
    );
}
