mod order;

pub use order::{
    CreateOrderRequest, Order, OrderFilter, OrderItem, OrderStatus, OrderTotals,
    UpdateOrderRequest, DEFAULT_PAYMENT_STATUS,
};
