mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "glossa",
    version,
    about = "Glossa — localization delivery client"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective display language.
    Resolve,
    /// Fetch a translation bundle and print its JSON.
    Fetch {
        /// Bundle sub-fragment, e.g. a panel name.
        #[arg(long)]
        fragment: Option<String>,
        /// Language code; resolved from preferences when omitted.
        #[arg(long)]
        language: Option<String>,
    },
    /// Persist a language selection.
    Set {
        /// Language code to select.
        language: String,
    },
    /// Check configuration, metadata, and server availability.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = glossa_core::config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(cfg.glossa.log_level.clone())
            }),
        )
        .init();

    match cli.command {
        Commands::Resolve => commands::resolve(&cfg).await,
        Commands::Fetch { fragment, language } => {
            commands::fetch(&cfg, fragment.as_deref(), language.as_deref()).await
        }
        Commands::Set { language } => commands::set(&cfg, &language),
        Commands::Status => commands::status(&cfg).await,
    }
}
