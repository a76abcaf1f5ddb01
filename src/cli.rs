//! CLI for ssmtpl.
//!
//! One command: render the given template files against SSM Parameter
//! Store and write the results. Files are processed one at a time, each
//! fully rendered and written before the next begins; the first failure
//! aborts the whole batch.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;

use ssmtpl::{Renderer, Resolver, SsmStore};

/// Render templates with values from AWS SSM Parameter Store.
#[derive(Parser, Debug, Clone)]
#[command(name = "ssmtpl")]
#[command(version)]
#[command(about = "Render templates with values from AWS SSM Parameter Store", long_about = None)]
pub struct Cli {
    /// Template file to render (can be given multiple times, or comma-separated)
    #[arg(short = 'f', long = "values", required = true, value_delimiter = ',', action = clap::ArgAction::Append)]
    pub values: Vec<PathBuf>,

    /// Directory to write rendered files into; without it, each template
    /// file is overwritten in place
    #[arg(short = 'o', long = "target-dir", env = "SSMTPL_TARGET_DIR")]
    pub target_dir: Option<PathBuf>,

    /// AWS profile used to fetch SSM parameters
    #[arg(short = 'p', long, env = "SSMTPL_PROFILE")]
    pub profile: Option<String>,

    /// Prefix applied to parameter names by default
    #[arg(long, env = "SSMTPL_PREFIX")]
    pub prefix: Option<String>,

    /// Verbosity level; -v also echoes the rendered output
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Render without writing any files
    #[arg(short = 'd', long = "dry-run")]
    pub dry_run: bool,
}

impl Cli {
    /// Log verbosity derived from `-v` count.
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

/// Render every requested template, echo and write per the flags.
pub async fn run(cli: &Cli) -> ssmtpl::Result<()> {
    // A session failure is fatal before any template is touched.
    let store = SsmStore::connect(cli.profile.as_deref()).await?;
    let prefix = cli.prefix.clone().unwrap_or_default();
    let resolver = Arc::new(Resolver::new(Arc::new(store), prefix));
    let renderer = Renderer::new(resolver);

    for path in &cli.values {
        tracing::info!(path = %path.display(), "rendering template");
        let rendered = renderer.render_path(path)?;

        if cli.verbose > 0 {
            println!("{rendered}");
        }

        if cli.dry_run {
            tracing::info!(path = %path.display(), "dry-run, skipping write");
        } else {
            write_rendered(path, cli.target_dir.as_deref(), &rendered)?;
        }
    }

    Ok(())
}

/// Write rendered content next to its source or into the target directory,
/// creating the directory as needed.
fn write_rendered(
    source_path: &Path,
    target_dir: Option<&Path>,
    content: &str,
) -> ssmtpl::Result<()> {
    let target = match target_dir {
        Some(dir) => {
            fs::create_dir_all(dir).map_err(|err| ssmtpl::Error::OutputWrite {
                path: dir.to_path_buf(),
                source: err,
            })?;
            let file_name = source_path.file_name().unwrap_or(source_path.as_os_str());
            dir.join(file_name)
        }
        None => source_path.to_path_buf(),
    };

    tracing::debug!(path = %target.display(), "writing rendered output");
    fs::write(&target, content).map_err(|err| ssmtpl::Error::OutputWrite {
        path: target.clone(),
        source: err,
    })
}
