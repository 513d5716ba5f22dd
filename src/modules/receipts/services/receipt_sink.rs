use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, instrument};

use crate::core::{AppError, Result};

/// Destination for rendered receipt bytes
#[async_trait]
pub trait ReceiptSink: Send + Sync {
    async fn send(&self, data: &[u8]) -> Result<()>;

    /// Human-readable target, used in logs and readiness output
    fn describe(&self) -> String;
}

/// Raw TCP thermal printer (usually port 9100)
#[derive(Debug, Clone)]
pub struct TcpPrinter {
    address: String,
    timeout: Duration,
}

impl TcpPrinter {
    pub fn new(address: impl Into<String>, timeout: Duration) -> Self {
        Self {
            address: address.into(),
            timeout,
        }
    }
}

#[async_trait]
impl ReceiptSink for TcpPrinter {
    #[instrument(skip(self, data), fields(addr = %self.address, data_len = data.len()))]
    async fn send(&self, data: &[u8]) -> Result<()> {
        let mut stream = tokio::time::timeout(self.timeout, TcpStream::connect(&self.address))
            .await
            .map_err(|_| AppError::printer(format!("Connection timeout: {}", self.address)))?
            .map_err(|e| AppError::printer(format!("{}: {}", self.address, e)))?;

        tokio::time::timeout(self.timeout, async {
            stream.write_all(data).await?;
            stream.flush().await
        })
        .await
        .map_err(|_| AppError::printer(format!("Write timeout: {}", self.address)))?
        .map_err(|e| AppError::printer(format!("Write failed: {}", e)))?;

        info!("Receipt sent to printer");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("tcp://{}", self.address)
    }
}
