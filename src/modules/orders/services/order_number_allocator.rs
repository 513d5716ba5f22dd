//! Day-scoped order number allocation.
//!
//! Order numbers look like `{n}-{YYYYMMDD}`: `n` restarts at 1 for every
//! calendar day of the restaurant's reference timezone. There is no counter
//! document and no lock. The allocator reads today's numbers, proposes
//! `max + 1`, and checks storage until it finds a free candidate. The unique
//! index on `orders.order_number` stays the final arbiter; the order service
//! handles a lost insert race by allocating once more.
//!
//! Numbers are unique but not gap-free, and under contention not strictly
//! in request order.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::core::timezone::compact_date;
use crate::core::{AppError, BusinessClock, Result};
use crate::modules::orders::repositories::OrderRepository;

/// Upper bound on existence checks for a single allocation
pub const MAX_ALLOCATION_ATTEMPTS: u32 = 50;

pub struct OrderNumberAllocator {
    order_repo: Arc<dyn OrderRepository>,
    clock: BusinessClock,
    max_attempts: u32,
}

impl OrderNumberAllocator {
    pub fn new(order_repo: Arc<dyn OrderRepository>, clock: BusinessClock) -> Self {
        Self {
            order_repo,
            clock,
            max_attempts: MAX_ALLOCATION_ATTEMPTS,
        }
    }

    /// Override the attempt ceiling
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn clock(&self) -> BusinessClock {
        self.clock
    }

    /// Allocate a candidate order number for the calendar day of `now`.
    ///
    /// # Errors
    /// `AllocationExhausted` when every checked candidate is already taken.
    pub async fn allocate(&self, now: DateTime<Utc>) -> Result<String> {
        let date_str = compact_date(self.clock.today(now));

        let existing = self.order_repo.order_numbers_for_date(&date_str).await?;
        let mut next = next_sequence(&existing, &date_str);

        for attempt in 1..=self.max_attempts {
            let candidate = format_order_number(next, &date_str);

            if !self.order_repo.order_number_exists(&candidate).await? {
                debug!(order_number = %candidate, attempt, "Allocated order number");
                return Ok(candidate);
            }

            warn!(
                order_number = %candidate,
                attempt,
                "Order number taken by a concurrent order, trying next"
            );
            next += 1;
        }

        Err(AppError::AllocationExhausted(format!(
            "no free order number for {} after {} attempts",
            date_str, self.max_attempts
        )))
    }
}

/// `{sequence}-{YYYYMMDD}`
pub fn format_order_number(sequence: u64, date_str: &str) -> String {
    format!("{}-{}", sequence, date_str)
}

/// Leading sequence of an order number matching `^\d+-{date_str}$`
pub fn parse_sequence(order_number: &str, date_str: &str) -> Option<u64> {
    let digits = order_number
        .strip_suffix(date_str)?
        .strip_suffix('-')?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    digits.parse().ok()
}

/// Max existing sequence + 1, or 1 when the day has no orders yet
pub fn next_sequence(existing: &[String], date_str: &str) -> u64 {
    existing
        .iter()
        .filter_map(|number| parse_sequence(number, date_str))
        .max()
        .map_or(1, |max| max + 1)
}
