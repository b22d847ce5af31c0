//! solfa - turn lyrics into per-voice solfa notation
//!
//! Subcommands:
//! - `solfa generate <lyrics>` - Generate notation for the requested parts
//! - `solfa validate --part <part> <syllables>...` - Check a sequence against the rules
//! - `solfa config` - Print the effective configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use choirconf::ChoirConfig;
use clap::{Parser, Subcommand, ValueEnum};
use solfa::{Difficulty, VoicePart};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "solfa")]
#[command(about = "Generate solfa notation for choir voice parts from lyrics")]
#[command(version)]
struct Cli {
    /// Config file to load instead of ./choir.toml
    #[arg(long, global = true, env = "CHOIR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate notation, one syllable per word for each part
    Generate {
        /// Lyrics text
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        lyrics: Option<String>,

        /// Read lyrics from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Voice parts to generate
        #[arg(
            short,
            long,
            value_delimiter = ',',
            default_value = "soprano,alto,tenor,bass"
        )]
        parts: Vec<VoicePart>,

        /// Musical key (default from config)
        #[arg(short, long)]
        key: Option<String>,

        /// Tempo in BPM (default from config)
        #[arg(short, long)]
        tempo: Option<f64>,

        /// Style tag (default from config)
        #[arg(short, long)]
        style: Option<String>,

        /// beginner, intermediate or advanced (default from config)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Skip the completion backend and use the fallback pattern
        #[arg(long)]
        offline: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: Format,

        /// Also report where the notation came from
        #[arg(long)]
        explain: bool,
    },

    /// Check a syllable sequence against the syllable set and a part's range
    Validate {
        /// Voice part whose range applies
        #[arg(short, long)]
        part: VoicePart,

        /// Syllables to check
        #[arg(required = true)]
        syllables: Vec<String>,
    },

    /// Print the effective configuration as TOML
    Config {
        /// List the files and env vars that contributed
        #[arg(long)]
        sources: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Table,
}

fn init_tracing(config: &ChoirConfig) {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.telemetry.log_level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, sources) = ChoirConfig::load_with_sources_from(cli.config.as_deref())
        .context("Failed to load configuration")?;

    init_tracing(&config);
    tracing::debug!(files = ?sources.files, env = ?sources.env_overrides, "Configuration loaded");

    match cli.command {
        Commands::Generate {
            lyrics,
            file,
            parts,
            key,
            tempo,
            style,
            difficulty,
            offline,
            format,
            explain,
        } => {
            let lyrics = match (lyrics, file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read lyrics from {}", path.display()))?,
                (None, None) => anyhow::bail!("Lyrics or --file is required"),
            };

            let options = commands::options_from(&config.defaults, key, tempo, style, difficulty)?;

            commands::generate(
                &config,
                commands::GenerateArgs {
                    lyrics,
                    parts,
                    options,
                    offline,
                    format,
                    explain,
                },
            )
            .await?;
        }
        Commands::Validate { part, syllables } => {
            commands::validate(part, &syllables)?;
        }
        Commands::Config { sources: show } => {
            commands::show_config(&config, show.then_some(&sources));
        }
    }

    Ok(())
}
