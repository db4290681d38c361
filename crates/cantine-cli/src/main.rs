mod config;
mod decode;
mod ingest_cmd;
mod serve_cmd;
mod template_cmd;
#[cfg(test)]
mod test_util;

use clap::{Parser, Subcommand};

use config::CantineConfig;

#[derive(Parser)]
#[command(
    name = "cantine",
    about = "Weekly menu plan ingestion for care-facility meal services"
)]
struct Cli {
    /// Weekday-name locale (overrides CANTINE_LOCALE env var)
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a cantine config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Ingest a menu sheet and print the weekly plan
    Ingest {
        /// Path to the CSV sheet
        file: String,
        /// Print the plan as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print a sample sheet with the expected columns
    Template {
        /// Output file path (defaults to stdout)
        #[arg(long)]
        output: Option<String>,
    },
    /// Serve the ingestion endpoint over HTTP
    Serve {
        /// Bind address (overrides CANTINE_BIND and the config file)
        #[arg(long)]
        bind: Option<String>,
        /// Port (overrides CANTINE_PORT and the config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Execute the `cantine init` command: write the default config file.
fn cmd_init(force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile::default();
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  ingest.locale = {}", cfg.ingest.locale);
    println!("  server.bind = {}:{}", cfg.server.bind, cfg.server.port);

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => {
            cmd_init(force)?;
        }
        Commands::Ingest { file, json } => {
            let resolved = CantineConfig::resolve(cli.locale.as_deref())?;
            ingest_cmd::run_ingest(&file, resolved.locale, json)?;
        }
        Commands::Template { output } => {
            template_cmd::run_template(output.as_deref())?;
        }
        Commands::Serve { bind, port } => {
            let resolved = CantineConfig::resolve(cli.locale.as_deref())?;
            let bind = bind.unwrap_or(resolved.bind);
            let port = port.unwrap_or(resolved.port);
            serve_cmd::run_serve(resolved.locale, &bind, port).await?;
        }
    }

    Ok(())
}
