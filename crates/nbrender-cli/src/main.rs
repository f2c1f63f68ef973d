//! nbrender CLI - Render Jupyter notebooks to standalone HTML.

mod colors;
mod inspect;
mod render;
mod watcher;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nbrender_core::Theme;

#[derive(Parser)]
#[command(name = "nbrender")]
#[command(about = "Render Jupyter notebooks to standalone HTML")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a notebook as a standalone HTML file
    Render {
        /// Path to the notebook (.ipynb file)
        notebook: PathBuf,

        /// Output path for the HTML file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Color theme (light or dark)
        #[arg(long)]
        theme: Option<Theme>,

        /// JSON settings file (theme, displayOrder)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Re-render whenever the notebook changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Print how each cell of a notebook resolves
    Inspect {
        /// Path to the notebook (.ipynb file)
        notebook: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render {
            notebook,
            output,
            theme,
            config,
            watch,
        } => {
            let options = render::RenderOptions {
                output,
                theme,
                config,
            };
            if watch {
                render::watch(&notebook, &options).await?;
            } else {
                render::execute(&notebook, &options)?;
            }
        }

        Commands::Inspect { notebook } => inspect::execute(&notebook)?,
    }

    Ok(())
}
