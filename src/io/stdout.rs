use super::ArchiveSink;
use anyhow::Result;
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

/// Writes the archive to standard output, for piping
pub struct StdoutSink;

#[async_trait]
impl ArchiveSink for StdoutSink {
    async fn write_archive(&self, bytes: &[u8]) -> Result<u64> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(bytes).await?;
        stdout.flush().await?;

        Ok(bytes.len() as u64)
    }

    fn describe(&self) -> String {
        "<stdout>".to_string()
    }
}
