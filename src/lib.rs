//! # zonepack
//!
//! An in-memory, store-only ZIP writer for packaging safe/blind zone
//! preview exports.
//!
//! The safe/blind zone editor exports a rendered preview image and a text
//! report of the computed UI margins. This library bundles such payloads
//! into a minimal ZIP archive without any compression or archive library:
//! the local file headers, central directory, end-of-central-directory
//! record, CRC-32 and DOS timestamps are all produced here.
//!
//! ## Features
//!
//! - Byte-exact STORED archives readable by any standard ZIP tool
//! - Deterministic output: building twice yields identical bytes
//! - Insertion order is preserved, duplicate names are allowed
//! - Async sinks for writing the result to a file or stdout
//!
//! ## Example
//!
//! ```
//! use zonepack::ZipWriter;
//!
//! let mut zip = ZipWriter::new();
//! zip.add_text_file("safe-blind-zones-data.txt", "Top: 96 px")?;
//! zip.add_file("safe-blind-zones-preview.png", b"\x89PNG\r\n\x1a\n".to_vec())?;
//!
//! let bytes = zip.build();
//! assert_eq!(bytes.len() as u64, zip.archive_len());
//! # Ok::<(), zonepack::ZipWriteError>(())
//! ```

pub mod cli;
pub mod export;
pub mod io;
pub mod zip;

pub use cli::Cli;
pub use export::{PreviewPackage, package_preview};
pub use io::{ArchiveSink, LocalFileSink, StdoutSink, load_payload};
pub use crate::zip::{DosDateTime, Entry, ZipWriteError, ZipWriter, crc32};
