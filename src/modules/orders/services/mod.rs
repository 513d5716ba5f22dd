pub mod order_number_allocator;
pub mod order_service;

pub use order_number_allocator::{OrderNumberAllocator, MAX_ALLOCATION_ATTEMPTS};
pub use order_service::OrderService;
