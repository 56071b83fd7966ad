use std::collections::BTreeMap;
use std::ops::AddAssign;

use tracing::debug;

use crate::error::Result;
use crate::granularity::{Granularity, normalize};
use crate::records::{Order, Timestamped};

/// Bucket key to aggregate, iterated in ascending key order.
pub type BucketMap<T> = BTreeMap<String, T>;

/// Folds `records` into per-bucket totals.
///
/// `extract` is only called for records whose timestamp normalises; the rest
/// are skipped. An error from `extract` aborts the fold.
pub fn accumulate<'a, R, T, I, F>(
    records: I,
    granularity: Granularity,
    mut extract: F,
) -> Result<BucketMap<T>>
where
    R: Timestamped + 'a,
    I: IntoIterator<Item = &'a R>,
    T: AddAssign + Default,
    F: FnMut(&R) -> Result<T>,
{
    let mut buckets = BucketMap::new();
    let mut skipped = 0usize;

    for record in records {
        let Some(key) = record
            .created_at()
            .and_then(|raw| normalize(raw, granularity))
        else {
            skipped += 1;
            continue;
        };
        let value = extract(record)?;
        *buckets.entry(key).or_insert_with(T::default) += value;
    }

    if skipped > 0 {
        debug!(skipped, granularity = granularity.as_str(), "skipped records without a usable timestamp");
    }
    Ok(buckets)
}

/// Total order amount per bucket.
pub fn sum_amounts(orders: &[Order], granularity: Granularity) -> Result<BucketMap<f64>> {
    accumulate(orders, granularity, Order::amount)
}

/// Number of records created in each bucket.
pub fn count_records<R: Timestamped>(records: &[R], granularity: Granularity) -> Result<BucketMap<u64>> {
    accumulate(records, granularity, |_| Ok(1))
}
