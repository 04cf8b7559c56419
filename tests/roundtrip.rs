use std::io::{Cursor, Read};

use time::macros::datetime;
use zip::ZipArchive;
use zonepack::export::{PREVIEW_FILE_NAME, REPORT_FILE_NAME};
use zonepack::zip::{CDFH_SIZE, EndOfCentralDirectory, LFH_SIZE};
use zonepack::{ArchiveSink, LocalFileSink, PreviewPackage, ZipWriter};

/// Read every entry back with an independent ZIP reader.
fn read_back(bytes: Vec<u8>) -> Vec<(String, u64, u64, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("readable archive");
    let mut out = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).expect("entry");
        let mut data = Vec::new();
        // read_to_end also verifies the stored CRC-32
        file.read_to_end(&mut data).expect("entry data");
        out.push((
            file.name().to_string(),
            file.size(),
            file.compressed_size(),
            data,
        ));
    }
    out
}

fn sample_entries() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("report.txt", b"Top: 96 px".to_vec()),
        ("preview.png", (0u8..17).collect()),
        ("all-bytes.bin", (0..=255u8).collect()),
        ("empty", Vec::new()),
        ("nested/dir/notes.txt", b"line one\r\nline two\n".to_vec()),
    ]
}

#[test]
fn standard_reader_recovers_every_entry() {
    let mut zip = ZipWriter::new();
    for (name, data) in sample_entries() {
        zip.add_file(name, data).unwrap();
    }

    let entries = read_back(zip.build());
    assert_eq!(entries.len(), sample_entries().len());

    for ((name, size, compressed, data), (expected_name, expected)) in
        entries.into_iter().zip(sample_entries())
    {
        assert_eq!(name, expected_name);
        assert_eq!(size, expected.len() as u64);
        assert_eq!(compressed, size);
        assert_eq!(data, expected);
    }
}

#[test]
fn archive_length_follows_the_layout() {
    let mut zip = ZipWriter::new();
    let mut expected = EndOfCentralDirectory::SIZE;
    for (name, data) in sample_entries() {
        expected += LFH_SIZE + CDFH_SIZE + 2 * name.len() + data.len();
        zip.add_file(name, data).unwrap();
    }

    let bytes = zip.build();
    assert_eq!(bytes.len(), expected);
    assert_eq!(&bytes[0..4], b"PK\x03\x04");
    assert_eq!(&bytes[bytes.len() - 22..bytes.len() - 18], b"PK\x05\x06");
}

#[test]
fn empty_writer_produces_a_valid_empty_archive() {
    let archive = ZipArchive::new(Cursor::new(ZipWriter::new().build())).unwrap();
    assert_eq!(archive.len(), 0);
}

#[test]
fn building_twice_is_byte_identical() {
    let mut zip = ZipWriter::new();
    zip.add_text_file_at("a.txt", "alpha", datetime!(2001-02-03 04:05:06))
        .unwrap();
    let first = zip.build();
    let second = zip.build();
    assert_eq!(first, second);

    // Entries added later only extend what is already there
    zip.add_text_file_at("b.txt", "beta", datetime!(2001-02-03 04:05:06))
        .unwrap();
    let third = zip.build();
    assert_ne!(first, third);
    assert_eq!(&third[..30 + 5 + 5], &first[..30 + 5 + 5]);
}

#[tokio::test]
async fn preview_package_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exports/safe-blind-zones-package.zip");

    let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR".to_vec();
    let report = "Screen: 1080x1920\nTop: 96 px\nBottom: 48 px\n";
    let bytes = PreviewPackage::new(png.clone(), report)
        .modified(datetime!(2024-11-30 18:45:00 UTC))
        .build()
        .unwrap();

    let sink = LocalFileSink::new(&path);
    let written = sink.write_archive(&bytes).await.unwrap();
    assert_eq!(written, bytes.len() as u64);

    let on_disk = std::fs::read(&path).unwrap();
    let entries = read_back(on_disk);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].0, PREVIEW_FILE_NAME);
    assert_eq!(entries[0].3, png);
    assert_eq!(entries[1].0, REPORT_FILE_NAME);
    assert_eq!(entries[1].3, report.as_bytes());
}
