mod local;
mod stdout;

pub use local::{LocalFileSink, load_payload};
pub use stdout::StdoutSink;

use anyhow::Result;
use async_trait::async_trait;

/// Trait for destinations that persist or transmit a finished archive
#[async_trait]
pub trait ArchiveSink: Send + Sync {
    /// Write the complete archive, returning the number of bytes written
    async fn write_archive(&self, bytes: &[u8]) -> Result<u64>;

    /// Human-readable name of the destination, for status messages
    fn describe(&self) -> String;
}
