//! ZIP archive writing.
//!
//! This module builds minimal, store-only ZIP archives entirely in memory.
//!
//! ## Architecture
//!
//! The module is organized into four components:
//!
//! - [`structures`]: Fixed-layout ZIP records (LFH, CDFH, EOCD) and DOS timestamps
//! - [`crc`]: CRC-32 with a lazily built, process-wide lookup table
//! - [`writer`]: The [`ZipWriter`] builder that lays the records out
//! - [`error`]: Errors raised while adding entries
//!
//! ## ZIP Format Overview
//!
//! The archive produced by [`ZipWriter::build`] consists of:
//! 1. A Local File Header followed by the raw data for each file
//! 2. The Central Directory, one header per file pointing back at its LFH
//! 3. The End of Central Directory (EOCD) record
//!
//! All multi-byte fields are written little-endian regardless of the host.
//!
//! ## Limitations
//!
//! - STORED method only, no DEFLATE
//! - No ZIP64: entries and archives are limited to 4 GiB and 65535 entries
//! - No encryption, no multi-disk archives, no archive comment

mod crc;
mod error;
mod structures;
mod writer;

pub use crc::crc32;
pub use error::ZipWriteError;
pub use structures::*;
pub use writer::{Entry, ZipWriter};
