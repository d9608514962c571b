//! Pattern CLI
//!
//! Loads a pattern schema, fills it with values from a JSON file, and
//! validates or renders the result.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use clap::{Parser, Subcommand};
use pattern_schemas::{
    Catalog, Component, ContextBuilder, HandlebarsEngine, PatternError, PropertyNode, Settings,
};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pattern")]
#[command(about = "Validate and render schema-driven patterns")]
struct Cli {
    /// Configuration file (defaults to patterns.toml lookup)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate values against a pattern schema
    Validate {
        /// Schema file
        schema: PathBuf,
        /// JSON file with the values to set
        #[arg(short, long)]
        values: Option<PathBuf>,
        /// Name the schema is registered under (defaults to the file stem)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Render a pattern through its template
    Render {
        /// Schema file
        schema: PathBuf,
        /// JSON file with the values to set
        #[arg(short, long)]
        values: Option<PathBuf>,
        /// Name the schema is registered under (defaults to the file stem)
        #[arg(short, long)]
        name: Option<String>,
        /// Template directory (overrides [templates] directory)
        #[arg(short, long)]
        templates: Option<PathBuf>,
        /// Validate before rendering
        #[arg(long)]
        developer: bool,
    },

    /// Write the effective configuration to a file
    InitConfig {
        /// Output file
        #[arg(default_value = "patterns.toml")]
        output: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load_from(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Validate { schema, values, name } => {
            let component = load_component(&settings, None, &schema, name, values.as_deref())?;

            match component.validate(false) {
                Ok(()) => {
                    println!("✅ {} - valid", component.label());
                    Ok(())
                }
                Err(errors) => {
                    println!("❌ {} - {} error(s)", component.label(), errors.len());
                    for error in &errors {
                        println!("  - {}", error);
                    }
                    std::process::exit(1);
                }
            }
        }

        Commands::Render {
            schema,
            values,
            name,
            templates,
            developer,
        } => {
            let mut settings = settings;
            if developer {
                settings.render.developer_mode = true;
            }

            let template_dir = templates.or_else(|| settings.template_directory());
            let engine = match template_dir {
                Some(dir) => HandlebarsEngine::from_directory(&dir, &settings.render.template_extension)
                    .with_context(|| format!("loading templates from {}", dir.display()))?,
                None => HandlebarsEngine::new(),
            };

            let component = load_component(&settings, Some(engine), &schema, name, values.as_deref())?;

            match component.render() {
                Value::String(output) => {
                    println!("{}", output);
                    Ok(())
                }
                Value::Null => bail!("nothing rendered for {}", component.label()),
                other => {
                    println!("{}", serde_json::to_string_pretty(&other)?);
                    Ok(())
                }
            }
        }

        Commands::InitConfig { output } => {
            settings.save(&output)?;
            println!("📝 Wrote {}", output.display());
            Ok(())
        }
    }
}

fn load_component(
    settings: &Settings,
    engine: Option<HandlebarsEngine>,
    schema: &Path,
    name: Option<String>,
    values: Option<&Path>,
) -> Result<Component> {
    let mut builder = ContextBuilder::from_settings(settings);
    if let Some(engine) = engine {
        builder = builder.templates(std::sync::Arc::new(engine));
    }
    let mut catalog = Catalog::from_settings(builder.build(), settings);

    let name = match name {
        Some(name) => name,
        None => schema
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| PatternError::InvalidFormat(format!("no file name in {}", schema.display())))?,
    };

    let text = std::fs::read_to_string(schema)
        .with_context(|| format!("reading schema {}", schema.display()))?;
    let schema_path = schema.to_string_lossy();
    catalog.register_str(name.as_str(), &text, Some(schema_path.as_ref()))?;

    let mut component = catalog.try_load(&name)?;

    if let Some(path) = values {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading values {}", path.display()))?;
        let Value::Object(fields) = serde_json::from_str::<Value>(&text)? else {
            bail!("values in {} must be a JSON object", path.display());
        };
        for (field, value) in fields {
            component.set(&field, value);
        }
    }

    Ok(component)
}
