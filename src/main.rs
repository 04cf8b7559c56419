//! Main entry point for the zonepack CLI application.
//!
//! This binary packages local files, inline text, and safe/blind zone
//! preview exports into a store-only ZIP archive.

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use zonepack::export::{PREVIEW_FILE_NAME, REPORT_FILE_NAME};
use zonepack::{ArchiveSink, Cli, LocalFileSink, StdoutSink, ZipWriter, load_payload};

/// Application entry point.
///
/// Parses command-line arguments, collects the entries, and hands the
/// finished archive to the selected sink.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.is_stdout() {
        return write_zip(&StdoutSink, &cli).await;
    }

    let sink = LocalFileSink::new(&cli.archive);

    match existing_archive_action(sink.path().exists(), &cli) {
        ExistingArchive::Write => write_zip(&sink, &cli).await,
        ExistingArchive::SkipExists => {
            if !cli.is_quiet() {
                eprintln!("Skipping: {} (file exists)", cli.archive);
            }
            Ok(())
        }
        ExistingArchive::SkipNeedsOverwrite => {
            if !cli.is_quiet() {
                eprintln!("Skipping: {} (use -o to overwrite)", cli.archive);
            }
            Ok(())
        }
    }
}

/// What to do about the output path before writing.
#[derive(Debug, PartialEq, Eq)]
enum ExistingArchive {
    Write,
    /// `-n`: never overwrite
    SkipExists,
    /// Default: skip and suggest `-o`
    SkipNeedsOverwrite,
}

fn existing_archive_action(exists: bool, cli: &Cli) -> ExistingArchive {
    if !exists || (cli.overwrite && !cli.never_overwrite) {
        ExistingArchive::Write
    } else if cli.never_overwrite {
        ExistingArchive::SkipExists
    } else {
        ExistingArchive::SkipNeedsOverwrite
    }
}

/// Build the archive from CLI inputs and write it to `sink`.
async fn write_zip<S: ArchiveSink>(sink: &S, cli: &Cli) -> Result<()> {
    let zip = collect_entries(cli).await?;

    if zip.is_empty() && !cli.is_very_quiet() {
        eprintln!("warning: {} will contain no entries", sink.describe());
    }

    let bytes = zip.build();
    let written = sink.write_archive(&bytes).await?;

    if cli.verbose && !cli.is_stdout() {
        list_entries(&zip);
    }

    if !cli.is_quiet() {
        eprintln!(
            "\nWrote {} ({}, {} entries)",
            sink.describe(),
            format_size(written),
            zip.len()
        );
    }

    Ok(())
}

/// Load every CLI input into a writer.
///
/// Entries are added in this order: the preview image, the report, files
/// given as positional arguments, then inline `-t` texts.
async fn collect_entries(cli: &Cli) -> Result<ZipWriter> {
    let mut zip = ZipWriter::new();

    if let Some(ref preview) = cli.preview {
        let data = load_payload(Path::new(preview)).await?;
        add_entry(&mut zip, cli, PREVIEW_FILE_NAME, data)?;
    }

    if let Some(ref report) = cli.report {
        let data = load_payload(Path::new(report)).await?;
        add_entry(&mut zip, cli, REPORT_FILE_NAME, data)?;
    }

    for file in &cli.files {
        let data = load_payload(Path::new(file)).await?;
        add_entry(&mut zip, cli, &cli.entry_name(file), data)?;
    }

    for (name, text) in &cli.texts {
        add_entry(&mut zip, cli, name, text.as_bytes().to_vec())?;
    }

    Ok(zip)
}

/// Add one entry and print the progress line.
fn add_entry(zip: &mut ZipWriter, cli: &Cli, name: &str, data: Vec<u8>) -> Result<()> {
    if !cli.is_quiet() {
        println!("  adding: {} (stored 0%)", name);
    }
    zip.add_file(name, data)?;
    Ok(())
}

/// Print a detailed table of the stored entries.
///
/// Mirrors `unzip -v`: size, CRC, DOS date and time, and name per entry,
/// followed by a totals line.
fn list_entries(zip: &ZipWriter) {
    println!(
        "{:>10}  {:>8}  {:>10}  {:>5}  Name",
        "Length", "CRC-32", "Date", "Time"
    );
    println!("{}", "-".repeat(60));

    let mut total = 0u64;
    for entry in zip.entries() {
        let (year, month, day) = entry.modified().date_parts();
        let (hour, minute, _second) = entry.modified().time_parts();

        println!(
            "{:>10}  {:08x}  {:04}-{:02}-{:02}  {:02}:{:02}  {}",
            entry.size(),
            entry.crc32(),
            year,
            month,
            day,
            hour,
            minute,
            entry.name()
        );
        total += entry.size() as u64;
    }

    println!("{}", "-".repeat(60));
    println!("{:>10}  {:>27}  {} files", total, "", zip.len());
}

/// Format a byte size into a human-readable string.
///
/// Automatically selects the appropriate unit (bytes, KB, MB, GB)
/// based on the size magnitude.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_size(500), "500 bytes");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
