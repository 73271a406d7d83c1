//! git-chunk-push - CLI entry point.

use std::num::NonZeroUsize;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use git_chunk_push::git::check_git_installed;
use git_chunk_push::{BatchCommitter, RunConfig, SystemGit};

/// Commit every changed file individually and push in batches.
#[derive(Parser, Debug)]
#[command(name = "git-chunk-push")]
#[command(about = "Commit every changed file individually and push in batches")]
#[command(version)]
struct Cli {
    /// Remote to push to (default: origin)
    #[arg(long)]
    remote: Option<String>,

    /// Branch to push (default: main)
    #[arg(long)]
    branch: Option<String>,

    /// Push after every N processed files (default: 50)
    #[arg(long)]
    batch_size: Option<NonZeroUsize>,

    /// Dry run - print planned commits without staging, committing or pushing
    #[arg(long)]
    dry_run: bool,

    /// Print the run summary as JSON when done
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Step 1: Check prerequisites
    check_git_installed().await.context("git is required")?;

    // Step 2: Locate the repository root
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let git = SystemGit::discover(&cwd)
        .context("Not a git repository. Run git-chunk-push from within a git working directory.")?;

    // Step 3: Resolve configuration
    let config = RunConfig::from_env().with_overrides(cli.remote, cli.branch, cli.batch_size, cli.dry_run);

    println!("🤖 git-chunk-push: starting in {}", git.workdir().display());

    // Step 4: Commit and push
    let summary = BatchCommitter::new(&git, &config)
        .run()
        .await
        .context("Run aborted before any file was processed")?;

    // Individual failures were already reported as warnings; they don't change the exit code.
    if cli.json {
        let json = serde_json::to_string_pretty(&summary).context("Failed to serialize run summary")?;
        println!("{}", json);
    } else {
        println!("✓ {}", summary.headline());
    }

    Ok(())
}
