use clap::Parser;
use jouken::layout::{RawDocument, RawField, RawFieldMap, RawPickListValue, RawSection};
use jouken::prelude::PICK_LIST;
use rand::Rng;
use rand::rngs::ThreadRng;
use std::fs;

/// A CLI tool to generate synthetic layout fixtures for the jouken extractor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "fixture.json")]
    output: String,

    /// Number of sections to generate
    #[arg(long, default_value_t = 3)]
    sections: usize,

    /// Number of fields per section
    #[arg(long, default_value_t = 6)]
    fields: usize,

    /// Number of values per pick-list field
    #[arg(long, default_value_t = 4)]
    values: usize,

    /// Probability that a pick-list value declares maps
    #[arg(long, default_value_t = 0.3)]
    map_ratio: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if !(0.0..=1.0).contains(&cli.map_ratio) {
        eprintln!(
            "Error: --map-ratio ({}) must be between 0 and 1",
            cli.map_ratio
        );
        std::process::exit(1);
    }

    println!(
        "Generating layout ({} sections x {} fields, {} values per pick list)...",
        cli.sections, cli.fields, cli.values
    );

    let sections = (0..cli.sections)
        .map(|s| generate_section(&mut rng, &cli, s))
        .collect();
    let document = RawDocument {
        sections: Some(sections),
        rules: None,
    };

    let json_output = serde_json::to_string_pretty(&document)?;
    fs::write(&cli.output, json_output)?;

    println!("Successfully generated and saved layout to '{}'", cli.output);

    Ok(())
}

fn generate_section(rng: &mut ThreadRng, cli: &Cli, index: usize) -> RawSection {
    let fields: Vec<RawField> = (0..cli.fields)
        .map(|f| generate_field(rng, cli, index, f))
        .collect();
    let pick_lists = fields
        .iter()
        .filter(|f| f.data_type.as_deref() == Some(PICK_LIST))
        .count();
    println!(
        "-> Generated section {} with {} field(s), {} pick list(s).",
        index, cli.fields, pick_lists
    );
    RawSection {
        id: Some(format!("section_{}", index)),
        name: Some(format!("Section {}", index + 1)),
        visible: Some(true),
        fields: Some(fields),
    }
}

fn generate_field(rng: &mut ThreadRng, cli: &Cli, section: usize, index: usize) -> RawField {
    let api_name = format!("field_{}_{}", section, index);
    let data_type = ["text", "integer", PICK_LIST, PICK_LIST][rng.random_range(0..4)];
    let pick_list_values = (data_type == PICK_LIST).then(|| {
        (0..cli.values)
            .map(|v| generate_value(rng, cli, &api_name, v))
            .collect()
    });

    RawField {
        id: Some(format!("{}_id", api_name)),
        field_label: Some(format!("Field {}.{}", section + 1, index + 1)),
        data_type: Some(data_type.to_string()),
        json_type: Some("string".to_string()),
        required: Some(rng.random_bool(0.2)),
        visible: Some(true),
        api_name: Some(api_name),
        default_value: None,
        pick_list_values,
    }
}

fn generate_value(rng: &mut ThreadRng, cli: &Cli, api_name: &str, index: usize) -> RawPickListValue {
    let actual_value = format!("{}_v{}", api_name, index);
    let maps = rng.random_bool(cli.map_ratio).then(|| {
        let target = format!("{}_dependent", api_name);
        let dependents = (0..rng.random_range(0..=cli.values))
            .map(|d| RawPickListValue {
                actual_value: Some(format!("{}_d{}", actual_value, d)),
                display_value: Some(format!("Dependent {}", d + 1)),
                api_name: Some(target.clone()),
                maps: None,
            })
            .collect();
        Some(vec![RawFieldMap {
            api_name: Some(target),
            id: None,
            visible: Some(rng.random_bool(0.5)),
            pick_list_values: Some(dependents),
        }])
    });

    RawPickListValue {
        display_value: Some(format!("Value {}", index + 1)),
        actual_value: Some(actual_value),
        api_name: None,
        maps,
    }
}
