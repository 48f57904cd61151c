//! Stdout delivery for dry runs.

use async_trait::async_trait;
use ddss_error::{DdssError, Result};
use std::io::Write;

use super::Delivery;

/// Prints each record on its own line instead of sending it anywhere.
///
/// Records are already single-line JSON, so the output is JSONL suitable for
/// piping to `jq` or counting with `wc -l`.
#[derive(Debug, Default)]
pub struct StdoutDelivery;

impl StdoutDelivery {
    /// Create a new StdoutDelivery.
    pub fn new() -> Self {
        Self
    }

    fn write_batch<W: Write>(writer: &mut W, records: &[String]) -> std::io::Result<()> {
        for record in records {
            writeln!(writer, "{record}")?;
        }
        writer.flush()
    }
}

#[async_trait]
impl Delivery for StdoutDelivery {
    async fn put_batch(&self, records: &[String]) -> Result<()> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        Self::write_batch(&mut lock, records)
            .map_err(|e| DdssError::delivery(self.name(), e))
    }

    fn name(&self) -> &str {
        "stdout"
    }
}
