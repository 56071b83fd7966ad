use std::io;

use thiserror::Error;

/// Failures that abort a whole metric computation.
///
/// Records that merely lack a usable timestamp or city never surface here;
/// they are skipped by the folds instead.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("order {order_id} has a malformed amount: {raw:?}")]
    MalformedAmount { order_id: u64, raw: String },
    #[error("order {0} has no customer id")]
    MissingCustomer(u64),
    #[error("record store failure: {0}")]
    Store(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
