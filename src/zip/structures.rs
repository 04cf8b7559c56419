use byteorder::{ByteOrder, LittleEndian};
use time::{OffsetDateTime, PrimitiveDateTime};

/// "Version needed to extract" and "version made by": 2.0, plain stored files.
pub const ZIP_VERSION: u16 = 20;

/// Compression method 0: data is stored as-is.
pub const METHOD_STORED: u16 = 0;

/// Modification timestamp packed into the two 16-bit DOS fields.
///
/// Time is `hour << 11 | minute << 5 | second / 2`, so the resolution is two
/// seconds. Date is `(year - 1980) << 9 | month << 5 | day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DosDateTime {
    pub time: u16,
    pub date: u16,
}

impl DosDateTime {
    /// First year the DOS date field can express.
    pub const MIN_YEAR: i32 = 1980;
    /// Last year the 7-bit year offset can express.
    pub const MAX_YEAR: i32 = 2107;

    /// Pack calendar fields. Years outside 1980..=2107 are clamped.
    pub fn new(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        let year = year.clamp(Self::MIN_YEAR, Self::MAX_YEAR);
        let dos_year = (year - Self::MIN_YEAR) as u16;

        let time = ((hour as u16) << 11) | ((minute as u16) << 5) | (second as u16 / 2);
        let date = (dos_year << 9) | ((month as u16) << 5) | day as u16;
        Self { time, date }
    }

    /// Current wall-clock time, local if the offset is known, UTC otherwise.
    pub fn now() -> Self {
        OffsetDateTime::now_local()
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
            .into()
    }

    /// Unpack the date into (year, month, day)
    pub fn date_parts(&self) -> (u16, u8, u8) {
        let day = (self.date & 0x1F) as u8;
        let month = ((self.date >> 5) & 0x0F) as u8;
        let year = ((self.date >> 9) & 0x7F) + 1980;
        (year, month, day)
    }

    /// Unpack the time into (hour, minute, second)
    pub fn time_parts(&self) -> (u8, u8, u8) {
        let second = ((self.time & 0x1F) * 2) as u8;
        let minute = ((self.time >> 5) & 0x3F) as u8;
        let hour = ((self.time >> 11) & 0x1F) as u8;
        (hour, minute, second)
    }
}

impl From<PrimitiveDateTime> for DosDateTime {
    fn from(dt: PrimitiveDateTime) -> Self {
        Self::new(
            dt.year(),
            dt.month() as u8,
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second(),
        )
    }
}

impl From<OffsetDateTime> for DosDateTime {
    /// Uses the calendar fields in the value's own offset.
    fn from(dt: OffsetDateTime) -> Self {
        Self::new(
            dt.year(),
            dt.month() as u8,
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second(),
        )
    }
}

/// Local File Header (LFH) - 30 bytes followed by the file name
pub const LFH_SIGNATURE: &[u8; 4] = b"PK\x03\x04";
pub const LFH_SIZE: usize = 30;

pub struct LocalFileHeader<'a> {
    pub modified: DosDateTime,
    pub crc32: u32,
    pub size: u32,
    pub file_name: &'a [u8],
}

impl LocalFileHeader<'_> {
    /// Fixed part of the header, without the file name.
    pub fn to_bytes(&self) -> [u8; LFH_SIZE] {
        let mut buf = [0u8; LFH_SIZE];
        buf[0..4].copy_from_slice(LFH_SIGNATURE);
        LittleEndian::write_u16(&mut buf[4..6], ZIP_VERSION);
        LittleEndian::write_u16(&mut buf[6..8], 0); // flags
        LittleEndian::write_u16(&mut buf[8..10], METHOD_STORED);
        LittleEndian::write_u16(&mut buf[10..12], self.modified.time);
        LittleEndian::write_u16(&mut buf[12..14], self.modified.date);
        LittleEndian::write_u32(&mut buf[14..18], self.crc32);
        // Stored: compressed and uncompressed sizes are the same
        LittleEndian::write_u32(&mut buf[18..22], self.size);
        LittleEndian::write_u32(&mut buf[22..26], self.size);
        LittleEndian::write_u16(&mut buf[26..28], self.file_name.len() as u16);
        LittleEndian::write_u16(&mut buf[28..30], 0); // extra field length
        buf
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_bytes());
        out.extend_from_slice(self.file_name);
    }
}

/// Central Directory File Header (CDFH) - 46 bytes followed by the file name
pub const CDFH_SIGNATURE: &[u8; 4] = b"PK\x01\x02";
pub const CDFH_SIZE: usize = 46;

pub struct CentralDirectoryHeader<'a> {
    pub modified: DosDateTime,
    pub crc32: u32,
    pub size: u32,
    pub lfh_offset: u32,
    pub file_name: &'a [u8],
}

impl CentralDirectoryHeader<'_> {
    pub fn to_bytes(&self) -> [u8; CDFH_SIZE] {
        let mut buf = [0u8; CDFH_SIZE];
        buf[0..4].copy_from_slice(CDFH_SIGNATURE);
        LittleEndian::write_u16(&mut buf[4..6], ZIP_VERSION); // made by
        LittleEndian::write_u16(&mut buf[6..8], ZIP_VERSION); // needed
        LittleEndian::write_u16(&mut buf[8..10], 0);
        LittleEndian::write_u16(&mut buf[10..12], METHOD_STORED);
        LittleEndian::write_u16(&mut buf[12..14], self.modified.time);
        LittleEndian::write_u16(&mut buf[14..16], self.modified.date);
        LittleEndian::write_u32(&mut buf[16..20], self.crc32);
        LittleEndian::write_u32(&mut buf[20..24], self.size);
        LittleEndian::write_u32(&mut buf[24..28], self.size);
        LittleEndian::write_u16(&mut buf[28..30], self.file_name.len() as u16);
        // Extra field, comment, disk number start, internal and external
        // attributes are all zero.
        LittleEndian::write_u16(&mut buf[30..32], 0);
        LittleEndian::write_u16(&mut buf[32..34], 0);
        LittleEndian::write_u16(&mut buf[34..36], 0);
        LittleEndian::write_u16(&mut buf[36..38], 0);
        LittleEndian::write_u32(&mut buf[38..42], 0);
        LittleEndian::write_u32(&mut buf[42..46], self.lfh_offset);
        buf
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_bytes());
        out.extend_from_slice(self.file_name);
    }
}

/// End of Central Directory (EOCD) - 22 bytes, no archive comment
pub struct EndOfCentralDirectory {
    pub total_entries: u16,
    pub cd_size: u32,
    pub cd_offset: u32,
}

impl EndOfCentralDirectory {
    pub const SIGNATURE: &'static [u8; 4] = b"PK\x05\x06";
    pub const SIZE: usize = 22;

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0..4].copy_from_slice(Self::SIGNATURE);
        LittleEndian::write_u16(&mut buf[4..6], 0); // disk number
        LittleEndian::write_u16(&mut buf[6..8], 0); // disk with central directory
        // Single volume: entries on this disk == total entries
        LittleEndian::write_u16(&mut buf[8..10], self.total_entries);
        LittleEndian::write_u16(&mut buf[10..12], self.total_entries);
        LittleEndian::write_u32(&mut buf[12..16], self.cd_size);
        LittleEndian::write_u32(&mut buf[16..20], self.cd_offset);
        LittleEndian::write_u16(&mut buf[20..22], 0); // comment length
        buf
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::ReadBytesExt;
    use std::io::Cursor;
    use time::macros::datetime;

    #[test]
    fn dos_encoding_of_known_instant() {
        let dos = DosDateTime::from(datetime!(2024-03-09 14:27:33));
        assert_eq!(dos.time, (14 << 11) | (27 << 5) | 16);
        assert_eq!(dos.date, (44 << 9) | (3 << 5) | 9);
        assert_eq!(dos.date_parts(), (2024, 3, 9));
        // Odd seconds round down to the two-second grid
        assert_eq!(dos.time_parts(), (14, 27, 32));
    }

    #[test]
    fn years_before_1980_clamp_to_epoch() {
        let dos = DosDateTime::from(datetime!(1970-01-01 00:00:00 UTC));
        assert_eq!(dos.date, (1 << 5) | 1);
        assert_eq!(dos.date_parts(), (1980, 1, 1));

        // Only the year is clamped, month and day are kept
        let dos = DosDateTime::new(1975, 6, 15, 8, 0, 0);
        assert_eq!(dos.date_parts(), (1980, 6, 15));
    }

    #[test]
    fn years_after_2107_clamp_to_max() {
        let dos = DosDateTime::new(2200, 12, 31, 23, 59, 59);
        assert_eq!(dos.date_parts(), (2107, 12, 31));
        assert_eq!(dos.time_parts(), (23, 59, 58));
    }

    #[test]
    fn offset_datetime_uses_its_own_calendar_fields() {
        let dos = DosDateTime::from(datetime!(2023-12-31 23:30:00 -05:00));
        assert_eq!(dos.date_parts(), (2023, 12, 31));
        assert_eq!(dos.time_parts(), (23, 30, 0));
    }

    #[test]
    fn local_file_header_layout() {
        let modified = DosDateTime::new(2020, 1, 2, 3, 4, 6);
        let header = LocalFileHeader {
            modified,
            crc32: 0xDEAD_BEEF,
            size: 1234,
            file_name: b"a.txt",
        };

        let mut out = Vec::new();
        header.write_to(&mut out);
        assert_eq!(out.len(), LFH_SIZE + 5);
        assert_eq!(&out[0..4], LFH_SIGNATURE);
        assert_eq!(&out[30..], b"a.txt");

        let mut cursor = Cursor::new(&out[4..30]);
        assert_eq!(cursor.read_u16::<LittleEndian>().unwrap(), 20);
        assert_eq!(cursor.read_u16::<LittleEndian>().unwrap(), 0);
        assert_eq!(cursor.read_u16::<LittleEndian>().unwrap(), 0);
        assert_eq!(cursor.read_u16::<LittleEndian>().unwrap(), modified.time);
        assert_eq!(cursor.read_u16::<LittleEndian>().unwrap(), modified.date);
        assert_eq!(cursor.read_u32::<LittleEndian>().unwrap(), 0xDEAD_BEEF);
        assert_eq!(cursor.read_u32::<LittleEndian>().unwrap(), 1234);
        assert_eq!(cursor.read_u32::<LittleEndian>().unwrap(), 1234);
        assert_eq!(cursor.read_u16::<LittleEndian>().unwrap(), 5);
        assert_eq!(cursor.read_u16::<LittleEndian>().unwrap(), 0);
    }

    #[test]
    fn central_directory_header_layout() {
        let header = CentralDirectoryHeader {
            modified: DosDateTime::new(2020, 1, 2, 3, 4, 6),
            crc32: 7,
            size: 9,
            lfh_offset: 0x0102_0304,
            file_name: b"dir/b.bin",
        };

        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..4], CDFH_SIGNATURE);
        assert_eq!(LittleEndian::read_u16(&bytes[4..6]), 20);
        assert_eq!(LittleEndian::read_u16(&bytes[6..8]), 20);
        assert_eq!(LittleEndian::read_u32(&bytes[16..20]), 7);
        assert_eq!(LittleEndian::read_u32(&bytes[20..24]), 9);
        assert_eq!(LittleEndian::read_u32(&bytes[24..28]), 9);
        assert_eq!(LittleEndian::read_u16(&bytes[28..30]), 9);
        assert!(bytes[30..42].iter().all(|&b| b == 0));
        assert_eq!(&bytes[42..46], &[0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn end_of_central_directory_layout() {
        let eocd = EndOfCentralDirectory {
            total_entries: 2,
            cd_size: 114,
            cd_offset: 109,
        };

        let bytes = eocd.to_bytes();
        assert_eq!(&bytes[0..4], b"PK\x05\x06");
        assert_eq!(&bytes[4..8], &[0, 0, 0, 0]);
        assert_eq!(LittleEndian::read_u16(&bytes[8..10]), 2);
        assert_eq!(LittleEndian::read_u16(&bytes[10..12]), 2);
        assert_eq!(LittleEndian::read_u32(&bytes[12..16]), 114);
        assert_eq!(LittleEndian::read_u32(&bytes[16..20]), 109);
        assert_eq!(&bytes[20..22], &[0, 0]);
    }
}
