use super::ArchiveSink;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local file destination for a finished archive
pub struct LocalFileSink {
    path: PathBuf,
}

impl LocalFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ArchiveSink for LocalFileSink {
    async fn write_archive(&self, bytes: &[u8]) -> Result<u64> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Cannot create {}", parent.display()))?;
            }
        }

        let mut file = fs::File::create(&self.path)
            .await
            .with_context(|| format!("Cannot create {}", self.path.display()))?;
        file.write_all(bytes).await?;
        file.flush().await?;

        Ok(bytes.len() as u64)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Read a whole file into memory so it can be added to an archive
pub async fn load_payload(path: &Path) -> Result<Vec<u8>> {
    fs::read(path)
        .await
        .with_context(|| format!("Cannot read {}", path.display()))
}
