//! rpm-gen: serve the RPM lesson-plan form, or drive the generator from the
//! command line.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rpm_core::config::{ConfigManager, RpmConfig, load_dotenv};
use rpm_core::export;
use rpm_core::lesson::LessonPlanRequest;
use rpm_core::llm::GenerationClient;
use rpm_core::prompts::PromptBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "rpm-gen",
    version,
    about = "Generate Rencana Pembelajaran Mendalam (RPM) documents with Gemini"
)]
struct Cli {
    /// Configuration file; defaults to rpm.toml lookup in the working directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the web form (default)
    Serve {
        /// Listen address, overrides [server].bind_address
        #[arg(long)]
        bind: Option<String>,
    },

    /// Print the prompt built from a request file without calling the API
    Prompt {
        /// JSON file holding a lesson-plan request
        request: PathBuf,

        /// Print the system instruction before the prompt
        #[arg(long)]
        system: bool,
    },

    /// Generate a document from a request file and write it to disk
    Generate {
        /// JSON file holding a lesson-plan request
        request: PathBuf,

        /// Output path; defaults to the download name in the working directory
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Write the cleaned HTML instead of a Word document
        #[arg(long)]
        html: bool,
    },

    /// Write a default configuration file
    SampleConfig {
        #[arg(default_value = "rpm.toml")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    load_dotenv();
    let args = Cli::parse();

    match args.command.unwrap_or(Commands::Serve { bind: None }) {
        Commands::Serve { bind } => {
            let mut config = load_config(args.config.as_deref())?;
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            info!(
                "Starting RPM generator v{} (model {})",
                env!("CARGO_PKG_VERSION"),
                config.generation.model
            );
            let client = GenerationClient::from_config(&config)
                .context("Failed to initialise the Gemini client")?;
            rpm_generator::serve(config, client).await
        }
        Commands::Prompt { request, system } => {
            let config = load_config(args.config.as_deref())?;
            let request = read_request(&request)?;
            let builder = PromptBuilder::new(config.school);
            if system {
                println!("{}\n", builder.system_instruction());
            }
            println!("{}", builder.build(&request));
            Ok(())
        }
        Commands::Generate {
            request,
            output,
            html,
        } => {
            let config = load_config(args.config.as_deref())?;
            let request = read_request(&request)?;
            let client = GenerationClient::from_config(&config)
                .context("Failed to initialise the Gemini client")?;

            let document = client.generate(&request).await?;
            let (body, default_name) = if html {
                let name = export::download_filename(&request).replace(".doc", ".html");
                (document, name)
            } else {
                (
                    export::word_document(&document),
                    export::download_filename(&request),
                )
            };
            let path = output.unwrap_or_else(|| PathBuf::from(default_name));
            fs::write(&path, body)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::SampleConfig { path } => {
            RpmConfig::create_sample_config(&path)?;
            println!("Wrote sample configuration to {}", path.display());
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<RpmConfig> {
    let manager = match path {
        Some(path) => ConfigManager::load_from_file(path)?,
        None => ConfigManager::load()?,
    };
    Ok(manager.into_config())
}

/// Read and validate a request; validation messages are reported together
fn read_request(path: &Path) -> Result<LessonPlanRequest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file: {}", path.display()))?;
    let request: LessonPlanRequest = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse request file: {}", path.display()))?;
    if let Err(errors) = request.validate() {
        bail!("Invalid request: {errors}");
    }
    Ok(request)
}
