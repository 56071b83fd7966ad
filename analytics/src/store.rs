//! Read-only access to the order and customer collections.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::bucket::{BucketMap, sum_amounts};
use crate::error::Result;
use crate::granularity::Granularity;
use crate::records::{Customer, Order};
use crate::storage;

pub const ORDERS_FILE: &str = "orders.jsonl";
pub const CUSTOMERS_FILE: &str = "customers.jsonl";

/// Source of full record snapshots. Each call returns the complete current
/// collection; callers never write back.
pub trait RecordStore: Send + Sync {
    fn orders(&self) -> Result<Vec<Order>>;

    fn customers(&self) -> Result<Vec<Customer>>;

    /// Total sales per bucket. Stores able to aggregate natively may override
    /// this, but must produce the same buckets as the in-memory fold.
    fn sales_by_bucket(&self, granularity: Granularity) -> Result<BucketMap<f64>> {
        sum_amounts(&self.orders()?, granularity)
    }
}

/// Store backed by `orders.jsonl` and `customers.jsonl` in a data directory.
/// Files are re-read on every call.
pub struct JsonlStore {
    data_dir: PathBuf,
}

impl JsonlStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl RecordStore for JsonlStore {
    fn orders(&self) -> Result<Vec<Order>> {
        let orders: Vec<Order> = storage::load_lines(&self.data_dir.join(ORDERS_FILE))?;
        debug!(count = orders.len(), "loaded orders");
        Ok(orders)
    }

    fn customers(&self) -> Result<Vec<Customer>> {
        let customers: Vec<Customer> = storage::load_lines(&self.data_dir.join(CUSTOMERS_FILE))?;
        debug!(count = customers.len(), "loaded customers");
        Ok(customers)
    }
}

/// Store over records already held in memory.
#[derive(Default, Clone)]
pub struct MemoryStore {
    pub orders: Vec<Order>,
    pub customers: Vec<Customer>,
}

impl MemoryStore {
    pub fn new(orders: Vec<Order>, customers: Vec<Customer>) -> Self {
        Self { orders, customers }
    }
}

impl RecordStore for MemoryStore {
    fn orders(&self) -> Result<Vec<Order>> {
        Ok(self.orders.clone())
    }

    fn customers(&self) -> Result<Vec<Customer>> {
        Ok(self.customers.clone())
    }
}
