use clap::{Args, Parser, Subcommand};
use jouken::prelude::*;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Extracts pick-list condition rules from form layouts and evaluates them
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides the filter)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract condition rules from a layout and print them as JSON
    Extract(ExtractArgs),
    /// Evaluate rules against form values
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Path to the layout JSON file
    #[arg(short, long, env = "JOUKEN_INPUT", default_value = DEFAULT_FIXTURE)]
    input: String,

    /// Additional data types to treat as pick lists (e.g. "picklist")
    #[arg(long = "data-type", value_name = "NAME")]
    data_types: Vec<String>,

    /// Turn map visibility and dependent values into `fulfilled` effects
    #[arg(long)]
    fulfill_dependents: bool,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    #[command(flatten)]
    layout: LayoutArgs,

    /// Write the rules to this file instead of stdout
    #[arg(short, long, env = "JOUKEN_OUTPUT")]
    output: Option<String>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    #[command(flatten)]
    layout: LayoutArgs,

    /// Path to a JSON object of form values keyed by api_name; without it the
    /// layout's starting values are used
    #[arg(long)]
    values: Option<String>,

    /// Evaluate a previously extracted rules file instead of extracting from the layout
    #[arg(long)]
    rules: Option<String>,

    /// Only evaluate rules affected by these fields
    #[arg(long = "updated", value_name = "API_NAME")]
    updated: Vec<String>,

    /// Apply maps and rule effects to the form and report visibility and validity
    #[arg(long)]
    form: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Extract(args) => run_extract(args),
        Command::Evaluate(args) => run_evaluate(args),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "jouken=debug" } else { "jouken=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_extractor(args: &LayoutArgs) -> ConditionExtractor {
    let policy = if args.fulfill_dependents {
        DependentPolicy::Fulfill
    } else {
        DependentPolicy::Ignore
    };
    args.data_types
        .iter()
        .fold(ConditionExtractor::builder(), |builder, data_type| {
            builder.with_data_type(data_type)
        })
        .with_dependents(policy)
        .build()
}

fn load_layout(path: &str) -> Document {
    LayoutLoader::from_path(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load layout: {}", e)))
}

fn run_extract(args: ExtractArgs) {
    let start = Instant::now();
    let document = load_layout(&args.layout.input);
    let extractor = build_extractor(&args.layout);

    let rules = extractor
        .extract(&document)
        .unwrap_or_else(|e| exit_with_error(&format!("Extraction failed: {}", e)));
    info!(
        rules = rules.len(),
        elapsed = ?start.elapsed(),
        "extracted rules from '{}'",
        args.layout.input
    );

    let rule_set = RuleSet::new(rules);
    let written = match &args.output {
        Some(path) => rule_set.save(path, args.pretty),
        None => rule_set.write_to(std::io::stdout().lock(), args.pretty),
    };
    if let Err(e) = written {
        exit_with_error(&format!("Failed to write rules: {}", e));
    }
}

fn run_evaluate(args: EvaluateArgs) {
    let document = load_layout(&args.layout.input);

    let mut rules = match &args.rules {
        Some(path) => {
            RuleSet::from_file(path)
                .unwrap_or_else(|e| {
                    exit_with_error(&format!("Failed to load rules from '{}': {}", path, e))
                })
                .rules
        }
        None => build_extractor(&args.layout)
            .extract(&document)
            .unwrap_or_else(|e| exit_with_error(&format!("Extraction failed: {}", e))),
    };
    // Rules bundled with the layout run after the extracted or loaded ones.
    rules.extend(document.rules.iter().cloned());

    let provided = match &args.values {
        Some(path) => FormValues::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load form values from '{}': {}", path, e))
        }),
        None => FormValues::new(),
    };
    let values = initial_values(&document, &provided).merged_with(&provided);
    debug!(fields = values.len(), "form values prepared");

    let evaluator = Evaluator::from_rules(&rules, &RuleCompiler::default())
        .unwrap_or_else(|e| exit_with_error(&format!("Rule compilation failed: {}", e)));

    let outcomes = if args.updated.is_empty() {
        evaluator.eval(&values)
    } else {
        let updated: Vec<&str> = args.updated.iter().map(String::as_str).collect();
        evaluator.eval_updated(&values, &updated)
    }
    .unwrap_or_else(|e| exit_with_error(&format!("Evaluation failed: {}", e)));

    println!("Evaluated {} of {} rules", outcomes.len(), rules.len());
    for outcome in &outcomes {
        let verdict = if outcome.fulfilled {
            "fulfilled"
        } else {
            "rejected"
        };
        println!("  -> Rule {} {}: {}", outcome.rule_index, verdict, outcome.reason);
        for effect in &outcome.effects {
            let effect_json = serde_json::to_string(effect)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to render effect: {}", e)));
            println!("       {}", effect_json);
        }
    }

    if args.form {
        report_form(&document, &evaluator, &provided);
    }
}

fn report_form(document: &Document, evaluator: &Evaluator, provided: &FormValues) {
    let state = FormState::new(document, evaluator, provided)
        .unwrap_or_else(|e| exit_with_error(&format!("Form state failed: {}", e)));

    println!("Form state:");
    for section in &document.sections {
        let label = section.id.as_deref().unwrap_or("<unnamed>");
        let shown = section.id.as_deref().is_none_or(|id| state.is_section_visible(id));
        println!("  [{}] {}", if shown { "shown" } else { "hidden" }, label);
        for api_name in section.fields.iter().filter_map(|f| f.api_name.as_deref()) {
            let visibility = if state.is_field_visible(api_name) {
                "shown"
            } else {
                "hidden"
            };
            let value = state.value(api_name).unwrap_or("unset");
            println!("      {} = {} ({})", api_name, value, visibility);
        }
    }

    let missing = state.missing_required();
    if missing.is_empty() {
        println!("Form is valid");
    } else {
        println!("Form is invalid, missing: {}", missing.join(", "));
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
