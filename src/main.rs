use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use woodshop::{
    build_project, init_logging, list_templates, plan_project, BridgeConfig, TcpExecutor,
    TemplateRequest,
};

/// Parametric woodworking projects
#[derive(Parser)]
#[command(name = "woodshop")]
#[command(about = "Generate woodworking projects and build them in a modeling application", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available templates
    List,

    /// Generate a project and build it in the modeling application
    Build {
        /// Template name (e.g., "bookshelf", "picture_frame")
        #[arg(name = "TEMPLATE")]
        template: String,

        /// Overall width (mm)
        #[arg(long)]
        width: Option<f64>,

        /// Overall height (mm)
        #[arg(long)]
        height: Option<f64>,

        /// Overall depth (mm)
        #[arg(long)]
        depth: Option<f64>,

        /// Stock as WIDTHxTHICKNESS in mm
        #[arg(long, default_value = "90x19")]
        lumber: String,

        /// Joinery style (template default when omitted)
        #[arg(long)]
        joinery: Option<String>,

        #[arg(long, default_value = "pine")]
        material: String,

        #[arg(long)]
        region: Option<String>,

        /// Leave out joint markers
        #[arg(long)]
        no_markers: bool,

        /// Template option as KEY=VALUE (repeatable)
        #[arg(long = "option", value_name = "KEY=VALUE")]
        options: Vec<String>,

        /// Print the generated script and cut list without connecting
        #[arg(long)]
        dry_run: bool,

        /// Bridge config file (.toml or .json)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Split `key=value`; the value is JSON when it parses, otherwise a string.
fn parse_option(raw: &str) -> Result<(String, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("Option '{}' must be KEY=VALUE", raw);
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("Option '{}' has an empty key", raw);
    }
    let value = serde_json::from_str(value.trim())
        .unwrap_or_else(|_| Value::String(value.trim().to_string()));
    Ok((key.to_string(), value))
}

/// Execute one command and return its JSON response.
fn run(command: Commands) -> Result<Value> {
    match command {
        Commands::List => Ok(serde_json::to_value(list_templates())?),
        Commands::Build {
            template,
            width,
            height,
            depth,
            lumber,
            joinery,
            material,
            region,
            no_markers,
            options,
            dry_run,
            config,
        } => {
            let mut request = TemplateRequest::new(template)
                .with_lumber(lumber)
                .with_material(material)
                .with_joint_markers(!no_markers);
            request.width = width;
            request.height = height;
            request.depth = depth;
            if let Some(joinery) = joinery {
                request = request.with_joinery(joinery);
            }
            if let Some(region) = region {
                request.region = region;
            }
            for raw in &options {
                let (key, value) = parse_option(raw)?;
                request = request.with_option(key, value);
            }

            let response = if dry_run {
                plan_project(&request)?
            } else {
                let config = BridgeConfig::load_or_default(config.as_deref())
                    .context("Failed to load bridge config")?;
                let mut executor = TcpExecutor::new(config);
                build_project(&request, &mut executor)?
            };
            Ok(serde_json::to_value(response)?)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging()?;

    let response = run(cli.command)?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
