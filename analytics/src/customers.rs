//! Per-customer order history and repeat-purchase attribution.
//!
//! A customer's first purchase is their earliest order by timestamp. Orders
//! sharing that instant keep whichever was seen first, so a feed that is
//! already sorted chronologically attributes exactly as a plain scan would.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::bucket::BucketMap;
use crate::granularity::{Granularity, parse_timestamp};
use crate::records::{Order, Timestamped};

/// Earliest purchase seen so far for one customer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FirstPurchase {
    at: DateTime<FixedOffset>,
    bucket: String,
}

impl FirstPurchase {
    pub(crate) fn new(at: DateTime<FixedOffset>, granularity: Granularity) -> Self {
        Self {
            bucket: granularity.bucket_key(&at),
            at,
        }
    }

    /// Replaces the recorded purchase if `at` is strictly earlier.
    pub(crate) fn observe(&mut self, at: DateTime<FixedOffset>, granularity: Granularity) {
        if at < self.at {
            *self = Self::new(at, granularity);
        }
    }

    pub(crate) fn into_bucket(self) -> String {
        self.bucket
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerHistory {
    pub order_count: u64,
    pub first_bucket: String,
}

impl CustomerHistory {
    pub fn is_repeat(&self) -> bool {
        self.order_count > 1
    }
}

/// Counts each customer's orders and finds the bucket of their first one.
///
/// Orders without a customer id or a usable timestamp are left out.
pub fn classify(orders: &[Order], granularity: Granularity) -> HashMap<u64, CustomerHistory> {
    let mut seen: HashMap<u64, (u64, FirstPurchase)> = HashMap::new();
    let mut skipped = 0usize;

    for order in orders {
        let (Some(customer_id), Some(at)) = (
            order.customer_id(),
            order.created_at().and_then(parse_timestamp),
        ) else {
            skipped += 1;
            continue;
        };

        seen.entry(customer_id)
            .and_modify(|(count, first)| {
                *count += 1;
                first.observe(at, granularity);
            })
            .or_insert_with(|| (1, FirstPurchase::new(at, granularity)));
    }

    if skipped > 0 {
        debug!(skipped, "orders left out of customer classification");
    }

    seen.into_iter()
        .map(|(id, (order_count, first))| {
            (
                id,
                CustomerHistory {
                    order_count,
                    first_bucket: first.into_bucket(),
                },
            )
        })
        .collect()
}

/// Number of repeat customers, attributed to the bucket of their first order.
pub fn repeat_customers(orders: &[Order], granularity: Granularity) -> BucketMap<u64> {
    let mut repeats = BucketMap::new();
    for history in classify(orders, granularity).into_values() {
        if history.is_repeat() {
            *repeats.entry(history.first_bucket).or_insert(0) += 1;
        }
    }
    repeats
}
