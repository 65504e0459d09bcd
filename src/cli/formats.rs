use clap::Args;

use crate::cli::OutputFormat;
use crate::core::field::ColumnDescription;
use crate::core::types::{CountType, FormatId};
use crate::rules::{all_rules, rule_for, FormatRule, RULES_VERSION};

#[derive(Args)]
pub struct FormatsArgs {
    /// Show only this format
    #[arg(short = 't', long)]
    pub input_format: Option<FormatId>,

    /// Primary count type used to label custom-format requirements
    #[arg(long, default_value = "read")]
    pub primary_count: CountType,

    /// Include accepted header aliases
    #[arg(long)]
    pub aliases: bool,
}

/// Execute formats subcommand
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(args: &FormatsArgs, format: OutputFormat) -> anyhow::Result<()> {
    let rules: Vec<&FormatRule> = match args.input_format {
        Some(f) => vec![rule_for(f)],
        None => all_rules().collect(),
    };

    match format {
        OutputFormat::Text => print_text_formats(&rules, args),
        OutputFormat::Json => print_json_formats(&rules, args)?,
        OutputFormat::Tsv => print_tsv_formats(&rules, args.primary_count),
    }

    Ok(())
}

/// JSON description of one rule, shared with the API.
#[must_use]
pub fn rule_to_json(rule: &FormatRule, primary_count: CountType, with_aliases: bool) -> serde_json::Value {
    let fields: Vec<serde_json::Value> = rule
        .required_fields(primary_count)
        .into_iter()
        .map(|field| {
            let ColumnDescription { label, description } = field.column_description();
            let mut value = serde_json::json!({
                "field": field,
                "label": label,
                "description": description,
            });
            if with_aliases {
                value["aliases"] = serde_json::json!(rule.aliases.aliases(field));
            }
            value
        })
        .collect();

    serde_json::json!({
        "format": rule.format,
        "displayName": rule.format.display_name(),
        "matching": rule.matching,
        "singleCell": rule.format.is_single_cell(),
        "requiredColumns": rule.requirement_labels(primary_count),
        "fields": fields,
    })
}

fn print_text_formats(rules: &[&FormatRule], args: &FormatsArgs) {
    println!("Supported Formats (rules v{RULES_VERSION})");
    println!("{}", "=".repeat(60));

    for rule in rules {
        println!("\n{} [{}]", rule.format.display_name(), rule.format);
        println!("  Matching: {:?}", rule.matching);
        println!("  Required columns:");
        for label in rule.requirement_labels(args.primary_count) {
            println!("    - {label}");
        }

        let fields = rule.required_fields(args.primary_count);
        if !fields.is_empty() {
            println!("  Fields:");
            for field in fields {
                println!("    {:<12} {}", field.as_str(), field.description());
                if args.aliases {
                    let aliases = rule.aliases.aliases(field);
                    if !aliases.is_empty() {
                        println!("    {:<12} aliases: {}", "", aliases.join(", "));
                    }
                }
            }
        }
    }
}

fn print_json_formats(rules: &[&FormatRule], args: &FormatsArgs) -> anyhow::Result<()> {
    let formats: Vec<serde_json::Value> = rules
        .iter()
        .map(|rule| rule_to_json(rule, args.primary_count, args.aliases))
        .collect();

    let output = serde_json::json!({
        "rulesVersion": RULES_VERSION,
        "formats": formats,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_formats(rules: &[&FormatRule], primary_count: CountType) {
    println!("format\tmatching\trequired_columns");
    for rule in rules {
        println!(
            "{}\t{:?}\t{}",
            rule.format,
            rule.matching,
            rule.requirement_labels(primary_count).join(",")
        );
    }
}
