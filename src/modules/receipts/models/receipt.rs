//! Plain-text receipt layout framed with ESC/POS commands

use crate::core::money::format_amount;
use crate::core::BusinessClock;
use crate::modules::orders::models::Order;

/// Characters per line on 58mm paper
pub const DEFAULT_RECEIPT_WIDTH: usize = 32;

const ESC_INIT: [u8; 2] = [0x1B, 0x40];
const ALIGN_LEFT: [u8; 3] = [0x1B, 0x61, 0x00];
const ALIGN_CENTER: [u8; 3] = [0x1B, 0x61, 0x01];
const FEED_LINES: [u8; 3] = [0x1B, 0x64, 0x03];
const GS_FULL_CUT: [u8; 3] = [0x1D, 0x56, 0x00];

/// Byte buffer for one receipt
pub struct ReceiptBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl ReceiptBuilder {
    pub fn new(width: usize) -> Self {
        let mut buf = Vec::with_capacity(1024);
        buf.extend_from_slice(&ESC_INIT);
        Self { buf, width }
    }

    pub fn center(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&ALIGN_CENTER);
        self
    }

    pub fn left(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&ALIGN_LEFT);
        self
    }

    pub fn line(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(s.as_bytes());
        self.buf.push(b'\n');
        self
    }

    pub fn separator(&mut self) -> &mut Self {
        let rule = "-".repeat(self.width);
        self.line(&rule)
    }

    /// Left and right text on one line, padded to the paper width
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let used = left.chars().count() + right.chars().count();
        let gap = if used >= self.width { 1 } else { self.width - used };
        let text = format!("{}{}{}", left, " ".repeat(gap), right);
        self.line(&text)
    }

    /// Feed and cut, then hand back the bytes
    pub fn finish(mut self) -> Vec<u8> {
        self.buf.extend_from_slice(&FEED_LINES);
        self.buf.extend_from_slice(&GS_FULL_CUT);
        self.buf
    }
}

/// Render an order as printer-ready bytes
pub fn render_receipt(order: &Order, store_name: &str, clock: &BusinessClock) -> Vec<u8> {
    let mut receipt = ReceiptBuilder::new(DEFAULT_RECEIPT_WIDTH);

    receipt
        .center()
        .line(store_name)
        .line(&format!("Order {}", order.order_number))
        .line(&clock.format_local(order.order_time, "%Y-%m-%d %H:%M"))
        .left()
        .separator();

    if let Some(table) = &order.table_number {
        receipt.line(&format!("Table: {}", table));
    }
    if let Some(customer) = &order.customer_name {
        receipt.line(&format!("Customer: {}", customer));
    }

    for item in &order.items {
        receipt.line_lr(
            &format!("{} x{}", item.name, item.quantity),
            &format_amount(item.line_total()),
        );
    }

    receipt
        .separator()
        .line_lr("Subtotal", &format_amount(order.total_amount));
    if !order.discount.is_zero() {
        receipt.line_lr("Discount", &format!("-{}", format_amount(order.discount)));
    }
    receipt
        .line_lr("TOTAL", &format_amount(order.final_amount))
        .line_lr("Payment", &order.payment_status)
        .center()
        .line("Thank you");

    receipt.finish()
}
