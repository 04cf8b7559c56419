//! In-memory ZIP archive builder.
//!
//! Entries are collected in insertion order and serialized on demand by
//! [`ZipWriter::build`]. Every entry uses the STORED method, so each local
//! header is followed by the payload exactly as it was added.

use std::io::Read;

use super::crc::crc32;
use super::error::ZipWriteError;
use super::structures::*;

/// Largest value any 32-bit size or offset field can carry.
const MAX_U32: u64 = u32::MAX as u64;

/// A file held by the writer, with its checksum and timestamp captured at
/// add time.
#[derive(Debug, Clone)]
pub struct Entry {
    name: String,
    data: Vec<u8>,
    modified: DosDateTime,
    crc32: u32,
}

impl Entry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Stored size, which is also the uncompressed size.
    pub fn size(&self) -> u32 {
        self.data.len() as u32
    }

    pub fn crc32(&self) -> u32 {
        self.crc32
    }

    pub fn modified(&self) -> DosDateTime {
        self.modified
    }

    /// Bytes this entry contributes to the archive: LFH, name and data, plus
    /// its CDFH and name.
    fn footprint(name_len: usize, data_len: usize) -> u64 {
        (LFH_SIZE + name_len + data_len + CDFH_SIZE + name_len) as u64
    }
}

/// Store-only ZIP writer that keeps the whole archive in memory.
///
/// ## Example
///
/// ```
/// use zonepack::ZipWriter;
///
/// let mut zip = ZipWriter::new();
/// zip.add_text_file("report.txt", "Top: 96 px")?;
/// zip.add_file("preview.png", vec![0x89, b'P', b'N', b'G'])?;
///
/// let bytes = zip.build();
/// assert_eq!(&bytes[0..4], b"PK\x03\x04");
/// assert_eq!(bytes.len() as u64, zip.archive_len());
/// # Ok::<(), zonepack::ZipWriteError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ZipWriter {
    entries: Vec<Entry>,
    /// Exact length `build()` will produce
    archive_len: u64,
}

impl Default for ZipWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ZipWriter {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            archive_len: EndOfCentralDirectory::SIZE as u64,
        }
    }

    /// Add a file stamped with the current time.
    ///
    /// Names are stored as raw UTF-8 with general purpose flags 0, so the
    /// UTF-8 flag (bit 11) is not set. Readers that rely on that flag decode
    /// non-ASCII names as CP437; keep names ASCII for maximum portability.
    pub fn add_file(
        &mut self,
        name: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Result<(), ZipWriteError> {
        self.add_file_at(name, data, DosDateTime::now())
    }

    /// Add a file with an explicit modification time.
    ///
    /// # Errors
    ///
    /// Fails without modifying the writer if the name does not fit the
    /// 16-bit length field, if the entry count is exhausted, or if the
    /// payload would push any size or offset past 4 GiB.
    pub fn add_file_at(
        &mut self,
        name: impl Into<String>,
        data: impl Into<Vec<u8>>,
        modified: impl Into<DosDateTime>,
    ) -> Result<(), ZipWriteError> {
        let name = name.into();
        let data = data.into();
        let archive_len = self.projected_len(&name, data.len())?;

        let crc32 = crc32(&data);
        self.entries.push(Entry {
            name,
            data,
            modified: modified.into(),
            crc32,
        });
        self.archive_len = archive_len;

        Ok(())
    }

    /// Archive length after adding an entry with this name and payload
    /// length, or the reason the entry cannot be stored.
    fn projected_len(&self, name: &str, data_len: usize) -> Result<u64, ZipWriteError> {
        if name.len() > u16::MAX as usize {
            return Err(ZipWriteError::NameTooLong { len: name.len() });
        }
        if self.entries.len() >= u16::MAX as usize {
            return Err(ZipWriteError::TooManyEntries);
        }
        if data_len as u64 > MAX_U32 {
            return Err(ZipWriteError::payload(
                name,
                format!("{} bytes exceeds the 4 GiB stored entry limit", data_len),
            ));
        }

        // Everything before the EOCD must stay addressable with 32-bit
        // offsets, which also bounds the central directory size.
        let archive_len = self.archive_len + Entry::footprint(name.len(), data_len);
        if archive_len - EndOfCentralDirectory::SIZE as u64 > MAX_U32 {
            return Err(ZipWriteError::payload(
                name,
                "archive would exceed the 4 GiB limit",
            ));
        }

        Ok(archive_len)
    }

    /// Add a UTF-8 text file stamped with the current time.
    pub fn add_text_file(
        &mut self,
        name: impl Into<String>,
        text: &str,
    ) -> Result<(), ZipWriteError> {
        self.add_file(name, text.as_bytes())
    }

    /// Add a UTF-8 text file with an explicit modification time.
    ///
    /// The text is stored byte for byte; line endings are not touched.
    pub fn add_text_file_at(
        &mut self,
        name: impl Into<String>,
        text: &str,
        modified: impl Into<DosDateTime>,
    ) -> Result<(), ZipWriteError> {
        self.add_file_at(name, text.as_bytes(), modified)
    }

    /// Read `reader` to the end and add the result as a file.
    ///
    /// A read error means the payload never became a concrete byte
    /// sequence; it is reported as [`ZipWriteError::InvalidPayload`] and
    /// nothing is added.
    pub fn add_reader<R: Read>(
        &mut self,
        name: impl Into<String>,
        mut reader: R,
    ) -> Result<(), ZipWriteError> {
        let name = name.into();
        let mut data = Vec::new();
        if let Err(e) = reader.read_to_end(&mut data) {
            return Err(ZipWriteError::InvalidPayload {
                reason: e.to_string(),
                name,
                source: Some(e),
            });
        }
        self.add_file(name, data)
    }

    /// Entries in the order they were added
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length in bytes of the archive [`build`](Self::build) produces.
    pub fn archive_len(&self) -> u64 {
        self.archive_len
    }

    /// Serialize all entries into a complete ZIP archive.
    ///
    /// Layout: one LFH + name + data per entry, then one CDFH + name per
    /// entry, then the EOCD. Calling this repeatedly yields identical bytes.
    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.archive_len as usize);
        let mut central_directory = Vec::with_capacity(
            self.entries
                .iter()
                .map(|e| CDFH_SIZE + e.name.len())
                .sum(),
        );

        // The `as u32` conversions below cannot truncate: add_file_at
        // rejects any entry that would push the archive past u32::MAX.
        for entry in &self.entries {
            let file_name = entry.name.as_bytes();
            let lfh_offset = out.len() as u32;

            LocalFileHeader {
                modified: entry.modified,
                crc32: entry.crc32,
                size: entry.size(),
                file_name,
            }
            .write_to(&mut out);
            out.extend_from_slice(&entry.data);

            CentralDirectoryHeader {
                modified: entry.modified,
                crc32: entry.crc32,
                size: entry.size(),
                lfh_offset,
                file_name,
            }
            .write_to(&mut central_directory);
        }

        let cd_offset = out.len() as u32;
        let cd_size = central_directory.len() as u32;
        out.extend_from_slice(&central_directory);

        EndOfCentralDirectory {
            total_entries: self.entries.len() as u16,
            cd_size,
            cd_offset,
        }
        .write_to(&mut out);

        out
    }
}
