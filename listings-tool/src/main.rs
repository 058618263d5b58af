use clap::{Parser, Subcommand};
use listings_compact::config::DATA_DIR_ENV;
use listings_compact::{
    inspect_artifact, write_artifact, ArtifactConfig, ArtifactNaming, DatasetError,
    DirectorySource, RawValue,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ============================================================================
// CLI
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "listings-tool", about = "Build and inspect the compact listings artifact")]
struct Cli {
    /// Directory holding the artifact.
    #[arg(long, global = true, env = DATA_DIR_ENV, default_value = "data")]
    out_dir: PathBuf,

    /// Extension of artifact files, without the dot.
    #[arg(long, global = true, default_value = "json")]
    extension: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Trim, encode and write a raw JSON dataset.
    Compact {
        /// Raw dataset (plain JSON).
        #[arg(long)]
        input: PathBuf,
        /// Fixed artifact file name instead of a content-addressed one.
        #[arg(long)]
        name: Option<String>,
        /// Prefix for content-addressed names.
        #[arg(long, default_value = "data", conflicts_with = "name")]
        prefix: String,
    },
    /// Load the artifact and print what it contains.
    Inspect,
}

impl Cli {
    fn config(&self) -> ArtifactConfig {
        ArtifactConfig {
            output_dir: self.out_dir.clone(),
            extension: self.extension.clone(),
        }
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "listings_tool=info,listings_compact=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    let result = match cli.command {
        Command::Compact {
            input,
            name,
            prefix,
        } => {
            let naming = match name {
                Some(name) => ArtifactNaming::Fixed(name),
                None => ArtifactNaming::ContentAddressed { prefix },
            };
            compact(input, &config, &naming).await
        }
        Command::Inspect => inspect(config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn compact(
    input: PathBuf,
    config: &ArtifactConfig,
    naming: &ArtifactNaming,
) -> Result<(), DatasetError> {
    let text = tokio::fs::read(&input)
        .await
        .map_err(|e| DatasetError::Io(format!("Cannot read {}: {}", input.display(), e)))?;
    let raw: serde_json::Value = serde_json::from_slice(&text).map_err(|e| {
        DatasetError::InvalidInput(format!("{} is not valid JSON: {}", input.display(), e))
    })?;

    let path = write_artifact(RawValue::from(raw), config, naming).await?;
    println!("{}", path.display());
    Ok(())
}

async fn inspect(config: ArtifactConfig) -> Result<(), DatasetError> {
    let source = DirectorySource::new(config);
    let report = inspect_artifact(&source).await?;
    println!(
        "artifact: {} ({} bytes)",
        source.path_of(&report.name).display(),
        report.bytes
    );

    let stats = report.stats;
    println!(
        "dictionary: {} entries ({} scalars, {} shared), {} references",
        stats.dictionary_len, stats.scalar_entries, stats.shared_entries, stats.references
    );

    for (key, len) in report.dataset.summary() {
        match len {
            Some(len) => println!("  {:<16} {}", key, len),
            None => println!("  {:<16} -", key),
        }
    }
    Ok(())
}
