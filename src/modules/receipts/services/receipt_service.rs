use std::sync::Arc;

use tracing::info;

use crate::core::{AppError, BusinessClock, Result};
use crate::modules::orders::models::Order;
use crate::modules::receipts::models::render_receipt;
use crate::modules::receipts::services::ReceiptSink;

/// Renders orders and forwards them to the configured printer
pub struct ReceiptService {
    sink: Option<Arc<dyn ReceiptSink>>,
    clock: BusinessClock,
    store_name: String,
}

impl ReceiptService {
    pub fn new(
        sink: Option<Arc<dyn ReceiptSink>>,
        clock: BusinessClock,
        store_name: impl Into<String>,
    ) -> Self {
        Self {
            sink,
            clock,
            store_name: store_name.into(),
        }
    }

    pub fn printer(&self) -> Option<String> {
        self.sink.as_ref().map(|sink| sink.describe())
    }

    pub async fn print_order(&self, order: &Order) -> Result<()> {
        let sink = self
            .sink
            .as_ref()
            .ok_or_else(|| AppError::printer("No receipt printer configured"))?;

        let bytes = render_receipt(order, &self.store_name, &self.clock);
        sink.send(&bytes).await?;

        info!(
            order_number = %order.order_number,
            printer = %sink.describe(),
            "Printed receipt"
        );
        Ok(())
    }
}
