use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use tokio::io::AsyncReadExt;

use runlet_core::{ExecutionRequest, ExecutorConfig, NativeCodeExecutor};

#[derive(Parser, Debug)]
#[clap(
    name = "Runlet",
    author,
    version = "0.1.0",
    about = "Runlet code execution service"
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(long, short, help = "Path to a YAML configuration file")]
    config: Option<PathBuf>,

    #[clap(long, short, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a source file (or stdin) and print the result as JSON
    Exec {
        #[clap(help = "Source file to execute; reads stdin when omitted")]
        file: Option<PathBuf>,

        #[clap(
            long,
            short,
            default_value = "python",
            help = "Language tag selecting the runtime binding"
        )]
        language: String,

        #[clap(
            long,
            short,
            help = "Wall-clock timeout in seconds; malformed values fall back to the configured default"
        )]
        timeout: Option<String>,
    },
    /// List runtime bindings and whether their interpreter is installed
    Runtimes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = cli
        .log_level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::Info);
    env_logger::Builder::new().filter_level(level).init();

    let config = ExecutorConfig::load(cli.config.as_deref()).await?;
    let executor = NativeCodeExecutor::with_config(config);

    match cli.command {
        Commands::Exec {
            file,
            language,
            timeout,
        } => {
            let code = match &file {
                Some(path) => tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    tokio::io::stdin()
                        .read_to_string(&mut buf)
                        .await
                        .context("failed to read source from stdin")?;
                    buf
                }
            };

            // Lenient by contract: a malformed timeout uses the default
            // instead of failing the request.
            let timeout = timeout.as_deref().and_then(|raw| raw.trim().parse().ok());

            let request = ExecutionRequest {
                code,
                language,
                timeout,
            };
            let result = executor.execute(&request).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Runtimes => {
            for probe in executor.bindings().probe() {
                match probe.path {
                    Some(path) => {
                        println!("{:<12} {} ({})", probe.language, probe.program, path.display())
                    }
                    None => println!("{:<12} {} (not found)", probe.language, probe.program),
                }
            }
        }
    }

    Ok(())
}
