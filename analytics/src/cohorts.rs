use std::collections::HashMap;

use tracing::debug;

use crate::bucket::BucketMap;
use crate::customers::FirstPurchase;
use crate::error::{AnalyticsError, Result};
use crate::granularity::{Granularity, parse_timestamp};
use crate::records::{Order, Timestamped};

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerValue {
    pub first_bucket: String,
    pub total_spent: f64,
}

/// Lifetime spend per customer together with their first-purchase bucket.
///
/// Every order must carry a well-formed amount and a customer id, otherwise
/// the whole computation fails. Every amount counts towards the customer's
/// spend; only dated orders can set the first purchase. Customers with no
/// dated order at all belong to no cohort and are left out.
pub fn lifetime_values(
    orders: &[Order],
    granularity: Granularity,
) -> Result<HashMap<u64, CustomerValue>> {
    let mut spend: HashMap<u64, (f64, Option<FirstPurchase>)> = HashMap::new();

    for order in orders {
        let amount = order.amount()?;
        let customer_id = order
            .customer_id()
            .ok_or(AnalyticsError::MissingCustomer(order.id))?;
        let at = order.created_at().and_then(parse_timestamp);

        let (total, first) = spend.entry(customer_id).or_insert((0.0, None));
        *total += amount;
        if let Some(at) = at {
            first
                .get_or_insert_with(|| FirstPurchase::new(at, granularity))
                .observe(at, granularity);
        }
    }

    let mut undated = 0usize;
    let values = spend
        .into_iter()
        .filter_map(|(id, (total_spent, first))| {
            let Some(first) = first else {
                undated += 1;
                return None;
            };
            Some((
                id,
                CustomerValue {
                    first_bucket: first.into_bucket(),
                    total_spent,
                },
            ))
        })
        .collect();

    if undated > 0 {
        debug!(undated, "customers without a dated order left out of lifetime value");
    }
    Ok(values)
}

/// Summed lifetime spend of the customers in each first-purchase cohort.
pub fn cohorts(orders: &[Order], granularity: Granularity) -> Result<BucketMap<f64>> {
    let mut totals = BucketMap::new();
    for value in lifetime_values(orders, granularity)?.into_values() {
        *totals.entry(value.first_bucket).or_insert(0.0) += value.total_spent;
    }
    Ok(totals)
}
