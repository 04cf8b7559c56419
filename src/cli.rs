use clap::Parser;
use std::path::Path;

use crate::export::PACKAGE_FILE_NAME;

#[derive(Parser, Debug)]
#[command(name = "zonepack")]
#[command(version)]
#[command(about = "Package files into a store-only ZIP archive", long_about = None)]
#[command(after_help = "Examples:\n  \
  zonepack out.zip a.txt b.png           store a.txt and b.png in out.zip\n  \
  zonepack --preview p.png --report r.txt  package a safe/blind zone preview\n  \
  zonepack - -t notes.txt='hello' | xxd  write an archive to stdout")]
pub struct Cli {
    /// Archive to create ('-' for stdout)
    #[arg(value_name = "ARCHIVE", default_value = PACKAGE_FILE_NAME)]
    pub archive: String,

    /// Files to store, in archive order
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,

    /// Store inline UTF-8 text as NAME=TEXT
    #[arg(short = 't', long = "text", value_name = "NAME=TEXT", value_parser = parse_text_entry)]
    pub texts: Vec<(String, String)>,

    /// Rendered preview image, stored as the package preview
    #[arg(long, value_name = "PNG")]
    pub preview: Option<String>,

    /// Text report, stored as the package report
    #[arg(long, value_name = "TXT")]
    pub report: Option<String>,

    /// Write the archive to pipe, no messages
    #[arg(short = 'p')]
    pub pipe: bool,

    /// Never overwrite an existing archive
    #[arg(short = 'n')]
    pub never_overwrite: bool,

    /// Overwrite an existing archive WITHOUT prompting
    #[arg(short = 'o')]
    pub overwrite: bool,

    /// Junk paths (store base names only)
    #[arg(short = 'j')]
    pub junk_paths: bool,

    /// List stored entries verbosely after writing
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn is_stdout(&self) -> bool {
        self.pipe || self.archive == "-"
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet > 0 || self.is_stdout()
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }

    /// Name a file is stored under, given its path on disk
    pub fn entry_name(&self, path: &str) -> String {
        if self.junk_paths {
            if let Some(base) = Path::new(path).file_name() {
                return base.to_string_lossy().to_string();
            }
        }
        path.trim_start_matches('/').to_string()
    }
}

fn parse_text_entry(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, text)) if !name.is_empty() => Ok((name.to_string(), text.to_string())),
        _ => Err(format!("expected NAME=TEXT, got '{s}'")),
    }
}
