use clap::{Parser, Subcommand};
use log::{info, warn};
use schemaform::schema::utils::collect_controls;
use schemaform::{
    EngineConfig, FormError, LiveForm, SchemaFileOperations, SchemaStore, SchemaValidator,
};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the engine configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the starter schema to a JSON file
    Init {
        /// Destination of the schema JSON file
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Import a schema file and audit it
    Validate {
        /// Path to the schema JSON file
        #[arg(required = true)]
        schema: PathBuf,
    },
    /// Compile a schema, apply values and print the submission
    Fill {
        /// Path to the schema JSON file
        #[arg(required = true)]
        schema: PathBuf,

        /// Path to a JSON object of values keyed by control key
        #[arg(required = true)]
        values: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig, FormError> {
    match path {
        Some(path) => {
            Ok(EngineConfig::from_file(path)?)
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Entry point for the schemaform CLI.
///
/// # Command-Line Arguments
///
/// * `-c, --config <PATH>` - Engine configuration file (defaults apply when omitted)
/// * Subcommands:
///   * `init <PATH>` - Write the starter schema
///   * `validate <SCHEMA>` - Import and audit a schema file
///   * `fill <SCHEMA> <VALUES>` - Print the submission snapshot or the validation errors
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    // RUST_LOG hands logging to env_logger instead of the buffered logger.
    if std::env::var_os("RUST_LOG").is_some() {
        env_logger::init();
    } else if let Err(e) = schemaform::logging::init(&config.logging) {
        eprintln!("Logging unavailable: {}", e);
    }
    if let Some(path) = &cli.config {
        info!("Loaded config from: {}", path.display());
    }

    match cli.command {
        Commands::Init { path } => {
            let mut store = SchemaStore::with_config(config);
            store.load_default();
            let schema = store.current_schema().ok_or(FormError::NoSchema)?;
            SchemaFileOperations::write_schema_file(&path, schema)?;
            info!("Starter schema written to {}", path.display());
        }
        Commands::Validate { schema } => {
            info!("Validating schema file: {}", schema.display());
            let schema = SchemaFileOperations::read_schema_file(&schema)?;
            SchemaValidator::validate_schema(&schema)?;
            info!(
                "Schema '{}' is valid ({} controls)",
                schema.name,
                collect_controls(&schema.root).len()
            );
        }
        Commands::Fill { schema, values } => {
            let schema = SchemaFileOperations::read_schema_file(&schema)?;
            let values: Value = serde_json::from_str(&fs::read_to_string(&values)?)?;
            let Some(values) = values.as_object() else {
                return Err("values file must contain a JSON object".into());
            };

            let mut form = LiveForm::new(&schema);
            for key in form.set_values(values) {
                warn!("No control with key '{}'", key);
            }

            match form.submit() {
                Ok(snapshot) => println!("{}", serde_json::to_string_pretty(&snapshot)?),
                Err(errors) => {
                    println!("{}", serde_json::to_string_pretty(&errors.errors)?);
                    return Err(errors.into());
                }
            }
        }
    }

    Ok(())
}
