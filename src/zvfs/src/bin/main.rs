//! Command-line front end for the `zvfs` container format.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use zvfs::ops;

#[derive(Parser)]
#[command(name = "zvfs", version, about = "A fixed-capacity single-file virtual filesystem")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a fresh container.
    Mkfs {
        /// Path to the container file.
        container: PathBuf,
    },
    /// Print container occupancy and size.
    Gifs {
        /// Path to the container file.
        container: PathBuf,
    },
    /// Add a host file to the container.
    Addfs {
        /// Path to the container file.
        container: PathBuf,
        /// Path to the host file to store.
        source: PathBuf,
    },
    /// Extract a file from the container to the host filesystem.
    Getfs {
        /// Path to the container file.
        container: PathBuf,
        /// Name of the stored file to extract.
        name: String,
    },
    /// Soft-delete a file from the container.
    Rmfs {
        /// Path to the container file.
        container: PathBuf,
        /// Name of the stored file to remove.
        name: String,
    },
    /// List the files stored in the container.
    Lsfs {
        /// Path to the container file.
        container: PathBuf,
    },
    /// Write a stored file's bytes to standard output.
    Catfs {
        /// Path to the container file.
        container: PathBuf,
        /// Name of the stored file to print.
        name: String,
    },
    /// Compact the container, reclaiming space held by soft-deleted files.
    Dfrgfs {
        /// Path to the container file.
        container: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = dispatch(cli.command) {
        eprintln!("zvfs: {err}");
        std::process::exit(1);
    }
}

fn dispatch(command: Command) -> zvfs::Result<()> {
    match command {
        Command::Mkfs { container } => mkfs(&container),
        Command::Gifs { container } => gifs(&container),
        Command::Addfs { container, source } => addfs(&container, &source),
        Command::Getfs { container, name } => getfs(&container, &name),
        Command::Rmfs { container, name } => {
            ops::remove(&container, &name)?;
            println!("{name}");
            Ok(())
        }
        Command::Lsfs { container } => lsfs(&container),
        Command::Catfs { container, name } => ops::cat_to_stdout(&container, &name),
        Command::Dfrgfs { container } => dfrgfs(&container),
    }
}

/// `mkfs`: if `container` already exists, asks the user whether to
/// overwrite it or abort, per §6's interactive-prompt requirement.
fn mkfs(container: &Path) -> zvfs::Result<()> {
    if container.exists() {
        print!("{} already exists. OVERWRITE or ABORT? ", container.display());
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if answer.trim().to_uppercase() != "OVERWRITE" {
            println!("aborted");
            return Ok(());
        }
    }
    ops::create(container)?;
    println!("{}", container.display());
    Ok(())
}

fn gifs(container: &Path) -> zvfs::Result<()> {
    let info = ops::stat(container)?;
    println!("path:          {}", info.path.display());
    println!("files:         {}", info.file_count);
    println!("free slots:    {}", info.free_slots);
    println!("deleted files: {}", info.deleted_files);
    println!("size (bytes):  {}", info.size_bytes);
    Ok(())
}

fn addfs(container: &Path, source: &Path) -> zvfs::Result<()> {
    let data = std::fs::read(source)?;
    let name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| zvfs::Error::NameTooLong(source.display().to_string()))?;
    ops::add(container, name, &data)?;
    println!("{name}");
    Ok(())
}

/// `getfs`: if the destination already exists on the host, asks the user
/// whether to overwrite it or supply a different destination name, per §6.
fn getfs(container: &Path, name: &str) -> zvfs::Result<()> {
    let data = ops::extract(container, name)?;
    let mut destination = PathBuf::from(name);

    if destination.exists() {
        print!(
            "{} already exists. OVERWRITE or enter a new filename: ",
            destination.display()
        );
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        let answer = answer.trim();
        if answer.to_uppercase() != "OVERWRITE" {
            destination = PathBuf::from(answer);
        }
    }

    std::fs::write(&destination, &data)?;
    println!("{}", destination.display());
    Ok(())
}

fn lsfs(container: &Path) -> zvfs::Result<()> {
    let files = ops::list(container)?;
    println!("{:<31} {:>10}  {}", "NAME", "SIZE", "CREATED");
    for file in files {
        println!(
            "{:<31} {:>10}  {}",
            file.name,
            file.length,
            format_unix_seconds(file.created)
        );
    }
    Ok(())
}

fn dfrgfs(container: &Path) -> zvfs::Result<()> {
    let report = ops::defragment(container)?;
    println!("Removed file count: {}", report.removed_count);
    println!("Freed bytes: {}", report.removed_bytes);
    Ok(())
}

/// Renders a Unix timestamp as `YYYY-MM-DD HH:MM:SS` UTC.
fn format_unix_seconds(seconds: u64) -> String {
    match DateTime::<Utc>::from_timestamp(seconds as i64, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "invalid timestamp".to_string(),
    }
}
