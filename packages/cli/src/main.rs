#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for peony field lookup and identification.
//!
//! Data locations come from `--config <file.toml>` when given, otherwise
//! from the `PEONY_FIELD_DATA` / `PEONY_CATALOG_DATA` environment
//! variables, otherwise from the bundled `data/` directory. Set
//! `RUST_LOG=debug` to see dataset loading.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use peony_identifier_catalog::DEFAULT_FUZZY_THRESHOLD;
use peony_identifier_catalog_models::CultivarRecord;
use peony_identifier_data::DataConfig;
use peony_identifier_field_models::FieldRecord;
use peony_identifier_identify::{Identifier, MatchStatus};

#[derive(Parser)]
#[command(name = "peony", about = "Peony field lookup and cultivar identification")]
struct Cli {
    /// TOML file naming the field and catalog data files
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List field identifiers
    Fields,
    /// List the parcels of a field
    Parcels { field: String },
    /// List the rows of a parcel
    Rows { field: String, parcel: String },
    /// List the positions of a row
    Positions {
        field: String,
        parcel: String,
        row: String,
    },
    /// Show every planting in a row, in position order
    Row {
        field: String,
        parcel: String,
        row: String,
    },
    /// Show the planting at an exact position
    Lookup {
        field: String,
        parcel: String,
        row: String,
        position: String,
    },
    /// Identify the cultivar planted at a position
    Identify {
        field: String,
        parcel: String,
        row: String,
        position: String,
    },
    /// Look up a catalog cultivar by exact name (case-insensitive) or id
    Cultivar {
        /// Cultivar name
        #[arg(required_unless_present = "id")]
        name: Option<String>,
        /// Catalog id
        #[arg(long, conflicts_with = "name")]
        id: Option<u32>,
    },
    /// List every catalog cultivar
    Cultivars,
    /// Fuzzy-match a name against the catalog (top 10)
    Fuzzy {
        name: String,
        /// Minimum similarity in [0, 1]
        #[arg(long, default_value_t = DEFAULT_FUZZY_THRESHOLD)]
        threshold: f64,
    },
    /// Find planted positions whose variety resembles a name
    Search { query: String },
    /// List every distinct planted variety
    Varieties,
}

fn print_record(record: &FieldRecord) {
    println!(
        "{:<8} {:<8} {:<6} {:<6} {}",
        record.field,
        record.parcel.as_deref().unwrap_or("-"),
        record.row.as_deref().unwrap_or("-"),
        record.position.as_deref().unwrap_or("-"),
        record.variety.as_deref().unwrap_or("(unlabeled)"),
    );
}

fn print_record_header() {
    println!("{:<8} {:<8} {:<6} {:<6} VARIETY", "FIELD", "PARCEL", "ROW", "POS");
    println!("{}", "-".repeat(60));
}

fn print_record_details(record: &FieldRecord) {
    println!("Field:    {}", record.field);
    for (label, value) in [
        ("Parcel", &record.parcel),
        ("Row", &record.row),
        ("Position", &record.position),
        ("Variety", &record.variety),
        ("Planted", &record.planting_year),
        ("Size", &record.size),
        ("Tag", &record.tag),
        ("For sale", &record.for_sale),
    ] {
        if let Some(value) = value {
            println!("{:<10}{value}", format!("{label}:"));
        }
    }
}

fn print_cultivar(cultivar: &CultivarRecord) {
    println!("#{} {}", cultivar.id, cultivar.cultivar_name);
    println!("  Originator: {}", cultivar.originator);
    println!("  Date:       {}", cultivar.registration_date);
    println!("  Group:      {}", cultivar.classification_group);
    if let Some(country) = &cultivar.country {
        println!("  Country:    {country}");
    }
    if let Some(image) = &cultivar.image_url {
        println!("  Image:      {image}");
    }
    println!("  Source:     {}", cultivar.source_url);

    let description = cultivar.plain_description();
    if !description.is_empty() {
        println!("  {description}");
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

#[allow(clippy::too_many_lines)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DataConfig::from_toml_file(path)?,
        None => DataConfig::from_env(),
    };
    let identifier = Identifier::from_config(config);
    identifier.spawn_preload();

    match cli.command {
        Commands::Fields => print_lines(&identifier.fields().distinct_fields().await?),
        Commands::Parcels { field } => {
            print_lines(&identifier.fields().distinct_parcels(&field).await?);
        }
        Commands::Rows { field, parcel } => {
            print_lines(&identifier.fields().distinct_rows(&field, &parcel).await?);
        }
        Commands::Positions { field, parcel, row } => {
            print_lines(
                &identifier
                    .fields()
                    .distinct_positions(&field, &parcel, &row)
                    .await?,
            );
        }
        Commands::Row { field, parcel, row } => {
            let records = identifier.fields().row_records(&field, &parcel, &row).await?;
            print_record_header();
            for record in &records {
                print_record(record);
            }
        }
        Commands::Lookup {
            field,
            parcel,
            row,
            position,
        } => {
            let record = identifier
                .fields()
                .record_at(&field, &parcel, &row, &position)
                .await?
                .ok_or_else(|| format!("Nothing planted at {field}/{parcel}/{row}/{position}"))?;
            print_record_details(&record);
        }
        Commands::Identify {
            field,
            parcel,
            row,
            position,
        } => {
            let found = identifier
                .identify(&field, &parcel, &row, &position)
                .await?
                .ok_or_else(|| format!("Nothing planted at {field}/{parcel}/{row}/{position}"))?;

            print_record_details(&found.record);
            println!();
            println!("Match: {}", found.status());
            match found.status() {
                MatchStatus::Exact => {
                    if let Some(cultivar) = &found.cultivar {
                        print_cultivar(cultivar);
                    }
                }
                MatchStatus::Fuzzy => {
                    println!("No exact catalog match. Similar cultivars:");
                    for cultivar in &found.fuzzy_matches {
                        println!("  #{:<6} {}", cultivar.id, cultivar.cultivar_name);
                    }
                }
                MatchStatus::NoMatch => println!("No catalog match."),
            }
        }
        Commands::Cultivar { name, id } => {
            let cultivar = match (id, name) {
                (Some(id), _) => identifier
                    .catalog()
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| format!("No cultivar with id {id}"))?,
                (None, Some(name)) => identifier
                    .catalog()
                    .find_by_name(&name)
                    .await?
                    .ok_or_else(|| format!("No cultivar named {name:?}"))?,
                (None, None) => return Err("Pass a cultivar name or --id".into()),
            };
            print_cultivar(&cultivar);
        }
        Commands::Cultivars => {
            let cultivars = identifier.catalog().get_all().await?;
            println!("{:<8} NAME", "ID");
            println!("{}", "-".repeat(50));
            for cultivar in cultivars.iter() {
                println!("{:<8} {}", cultivar.id, cultivar.cultivar_name);
            }
        }
        Commands::Fuzzy { name, threshold } => {
            let matches = identifier
                .catalog()
                .find_fuzzy_scored(&name, threshold)
                .await?;
            if matches.is_empty() {
                log::info!("No catalog names within {threshold} of {name:?}");
            }
            for (cultivar, score) in &matches {
                println!("{score:.3}  #{:<6} {}", cultivar.id, cultivar.cultivar_name);
            }
        }
        Commands::Search { query } => {
            let matches = identifier.search().search(&query).await?;
            if matches.is_empty() {
                log::info!("No planted variety resembles {query:?}");
            }
            for found in &matches {
                println!(
                    "{}: {}",
                    found.label,
                    found.variety.as_deref().unwrap_or_default()
                );
            }
        }
        Commands::Varieties => {
            print_lines(&identifier.search().all_unique_varieties().await?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_position_arguments() {
        let cli = Cli::try_parse_from(["peony", "identify", "1", "A", "3", "7"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Identify { ref row, ref position, .. } if row == "3" && position == "7"
        ));
    }

    #[test]
    fn fuzzy_threshold_defaults_to_catalog_default() {
        let cli = Cli::try_parse_from(["peony", "fuzzy", "Kanzas"]).unwrap();
        let Commands::Fuzzy { threshold, .. } = cli.command else {
            panic!("expected fuzzy command");
        };
        assert!((threshold - DEFAULT_FUZZY_THRESHOLD).abs() < f64::EPSILON);
    }

    #[test]
    fn cultivar_needs_name_or_id() {
        assert!(Cli::try_parse_from(["peony", "cultivar"]).is_err());
        assert!(Cli::try_parse_from(["peony", "cultivar", "--id", "3"]).is_ok());
        assert!(Cli::try_parse_from(["peony", "--config", "p.toml", "cultivar", "Kansas"]).is_ok());
    }
}
