//! Packaging of an exported safe/blind zone preview.
//!
//! The preview editor exports two artifacts: the rendered preview as a PNG
//! and a plain-text report of the computed zones. They are bundled into a
//! single archive with fixed names, image first.

use crate::zip::{DosDateTime, ZipWriteError, ZipWriter};

/// Name of the rendered preview inside the package
pub const PREVIEW_FILE_NAME: &str = "safe-blind-zones-preview.png";
/// Name of the text report inside the package
pub const REPORT_FILE_NAME: &str = "safe-blind-zones-data.txt";
/// Suggested file name for the package itself
pub const PACKAGE_FILE_NAME: &str = "safe-blind-zones-package.zip";

/// A preview image and its report, ready to be packaged.
#[derive(Debug, Clone)]
pub struct PreviewPackage {
    pub image: Vec<u8>,
    pub report: String,
    /// Timestamp shared by both entries; the current time when `None`
    pub modified: Option<DosDateTime>,
}

impl PreviewPackage {
    pub fn new(image: impl Into<Vec<u8>>, report: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            report: report.into(),
            modified: None,
        }
    }

    pub fn modified(mut self, modified: impl Into<DosDateTime>) -> Self {
        self.modified = Some(modified.into());
        self
    }

    /// Writer holding both entries, for callers that want to add more.
    pub fn into_writer(self) -> Result<ZipWriter, ZipWriteError> {
        let modified = self.modified.unwrap_or_else(DosDateTime::now);

        let mut zip = ZipWriter::new();
        zip.add_file_at(PREVIEW_FILE_NAME, self.image, modified)?;
        zip.add_text_file_at(REPORT_FILE_NAME, &self.report, modified)?;
        Ok(zip)
    }

    pub fn build(self) -> Result<Vec<u8>, ZipWriteError> {
        Ok(self.into_writer()?.build())
    }
}

/// Package a PNG preview and its text report into ZIP bytes.
pub fn package_preview(image_png: &[u8], report: &str) -> Result<Vec<u8>, ZipWriteError> {
    PreviewPackage::new(image_png, report).build()
}
