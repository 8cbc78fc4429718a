//! Command line tool for GIS project descriptors.
//!
//! # Usage
//!
//! ```bash
//! # Summarize a project and list its resolved resource references
//! gisproj inspect scene.json --base /data/scene
//!
//! # Decode and validate, exiting non-zero with the error code on failure
//! gisproj check scene.json
//!
//! # Re-encode in canonical form, optionally upgrading to the newest schema
//! gisproj normalize old.json --pretty --upgrade > new.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use gis_project::{
    decode_project, encode_project_with_options, validate_project, EncodeOptions, Project,
    SchemaVersion,
};

#[derive(Parser, Debug)]
#[command(name = "gisproj")]
#[command(version)]
#[command(about = "Inspect, check and normalize GIS project descriptors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a project summary and its resolved resource references
    Inspect {
        /// Descriptor file
        file: PathBuf,

        /// Directory references resolve against (defaults to the file's directory)
        #[arg(long, value_name = "DIR")]
        base: Option<PathBuf>,
    },

    /// Decode and validate a descriptor
    Check {
        /// Descriptor file
        file: PathBuf,
    },

    /// Re-encode a descriptor to stdout
    Normalize {
        /// Descriptor file
        file: PathBuf,

        /// Indent the output
        #[arg(long)]
        pretty: bool,

        /// Upgrade to the newest schema version first
        #[arg(long)]
        upgrade: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Inspect { file, base } => inspect(&file, base),
        Commands::Check { file } => check(&file),
        Commands::Normalize {
            file,
            pretty,
            upgrade,
        } => normalize(&file, pretty, upgrade),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// The single line written to stderr for a failed command.
fn failure_message(e: &anyhow::Error) -> String {
    format!("error: {e:#}")
}

fn load(file: &Path) -> Result<Project> {
    let bytes = fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    debug!(file = %file.display(), bytes = bytes.len(), "read descriptor");
    let project = decode_project(&bytes).with_context(|| format!("decoding {}", file.display()))?;
    Ok(project)
}

fn inspect(file: &Path, base: Option<PathBuf>) -> Result<()> {
    let mut project = load(file)?;
    let base = match base {
        Some(base) => base,
        None => file
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    project.set_base_path(base);

    println!("Project: {}", project.name.as_deref().unwrap_or("(unnamed)"));
    println!("Schema version: {}", project.version);
    if let Some(proj) = &project.default_proj {
        println!("Default projection: {proj}");
    }
    if let Some(origin) = &project.origin {
        println!("Origin: {:?}", origin.coordinates());
    }
    println!("Cameras: {}", project.cameras.len());
    println!("Recordsets: {}", project.recordsets.len());

    for (i, rs) in project.recordsets.iter().enumerate() {
        let label = rs
            .display_name
            .as_deref()
            .or(rs.id.as_deref())
            .unwrap_or("(no id)");
        let hidden = if rs.visible { "" } else { " [hidden]" };
        println!(
            "  [{i}] {label}: {} ({} units, {} data units){hidden}",
            rs.datatype,
            rs.all_units().count(),
            rs.data_units.len()
        );
    }

    let references = project.resolved_references();
    if !references.is_empty() {
        println!("References:");
        for r in references {
            println!("  {}.{} -> {}", r.owner, r.field, r.path.display());
        }
    }
    Ok(())
}

fn check(file: &Path) -> Result<()> {
    let project = load(file)?;
    validate_project(&project).with_context(|| format!("validating {}", file.display()))?;
    println!(
        "{}: ok (schema {}, {} recordsets)",
        file.display(),
        project.version,
        project.recordsets.len()
    );
    Ok(())
}

fn normalize(file: &Path, pretty: bool, upgrade: bool) -> Result<()> {
    let mut project = load(file)?;
    if upgrade {
        project.upgrade_to(SchemaVersion::LATEST)?;
    }
    let options = if pretty {
        EncodeOptions::pretty()
    } else {
        EncodeOptions::new()
    };
    let json = encode_project_with_options(&project, options)?;
    println!("{json}");
    Ok(())
}
