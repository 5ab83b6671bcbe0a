use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use oam_core::config::{self, CONFIG_FILE_NAME, ConvertOptions, OamConfig};
use oam_core::model::Environment;
use oam_core::parse::spec::ApiDocument;
use oam_core::parse::{self, SourceFormat};

#[derive(Parser)]
#[command(
    name = "oam",
    about = "Convert Swagger 2.0 / OpenAPI 3.x documents into mock environments",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document into a mock environment (JSON)
    Convert {
        /// Path to the Swagger/OpenAPI file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Where to write the environment; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Port used when the document declares none
        #[arg(long)]
        port: Option<u16>,

        /// Nesting bound for generated example bodies
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Show the routes a document would produce
    Inspect {
        /// Path to the Swagger/OpenAPI file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new oam configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            port,
            max_depth,
        } => cmd_convert(input, output, port, max_depth).await,

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "oam", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<OamConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

async fn cmd_convert(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    port: Option<u16>,
    max_depth: Option<usize>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output = output.or_else(|| cfg.output.as_ref().map(PathBuf::from));

    let defaults = cfg.convert_options();
    let options = ConvertOptions {
        default_port: port.unwrap_or(defaults.default_port),
        max_depth: max_depth.unwrap_or(defaults.max_depth),
    };

    let environment = oam_core::import_file(&input, &options)
        .await
        .with_context(|| format!("failed to convert {}", input.display()))?;
    let json = serde_json::to_string_pretty(&environment)?;

    match output {
        Some(path) => {
            write_output(&path, &json)?;
            eprintln!(
                "Converted {} → {} ({} routes)",
                input.display(),
                path.display(),
                environment.routes.len()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let content = fs::read_to_string(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let source = SourceFormat::from_extension(input.extension().and_then(|e| e.to_str()));

    let document = parse::parse_document(&content, source)?;
    let environment = oam_core::transform::convert(&document)?;
    let summary = build_inspect_summary(&document, &environment);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(document: &ApiDocument, env: &Environment) -> serde_json::Value {
    let routes: Vec<serde_json::Value> = env
        .routes
        .iter()
        .map(|route| {
            serde_json::json!({
                "method": route.method.as_str(),
                "endpoint": route.endpoint,
                "documentation": route.documentation,
                "responses": route
                    .responses
                    .iter()
                    .map(|r| {
                        serde_json::json!({
                            "status": format!("{} {}", r.status_code, r.status_code.reason()),
                            "label": r.label,
                        })
                    })
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "version": format!("{:?}", document.version()),
        "name": env.name,
        "port": env.port,
        "endpoint_prefix": env.endpoint_prefix,
        "proxy": {
            "mode": env.proxy_mode,
            "host": env.proxy_host,
        },
        "routes": routes,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
