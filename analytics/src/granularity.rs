//! Maps raw creation timestamps onto calendar bucket keys.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime};

/// Format every record timestamp is expected to follow, e.g.
/// `2023-01-05T10:15:00-05:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Bucket resolution selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Granularity {
    #[default]
    Daily,
    Monthly,
    Quarterly,
    Yearly,
}

impl Granularity {
    /// Unrecognised selectors fall back to [`Granularity::Daily`].
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "daily" => Granularity::Daily,
            "monthly" => Granularity::Monthly,
            "quarterly" => Granularity::Quarterly,
            "yearly" => Granularity::Yearly,
            _ => Granularity::Daily,
        }
    }

    /// Resolves an optional `?interval=` value, using `default` only when the
    /// selector is absent.
    pub fn resolve(selector: Option<&str>, default: Granularity) -> Self {
        selector.map_or(default, Granularity::from_selector)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Monthly => "monthly",
            Granularity::Quarterly => "quarterly",
            Granularity::Yearly => "yearly",
        }
    }

    /// Bucket key for a parsed timestamp. Calendar fields are read in the
    /// timestamp's own offset.
    ///
    /// Every key is year-major so that string order is chronological; quarters
    /// render as `2023-Q1`.
    pub fn bucket_key(&self, timestamp: &DateTime<FixedOffset>) -> String {
        match self {
            Granularity::Daily => timestamp.format("%Y-%m-%d").to_string(),
            Granularity::Monthly => timestamp.format("%Y-%m").to_string(),
            Granularity::Quarterly => {
                format!("{:04}-Q{}", timestamp.year(), quarter(timestamp.month()))
            }
            Granularity::Yearly => timestamp.format("%Y").to_string(),
        }
    }
}

fn quarter(month: u32) -> u32 {
    (month - 1) / 3 + 1
}

/// Parses a record timestamp. Returns `None` for anything not in
/// [`TIMESTAMP_FORMAT`]; a trailing `Z` is read as `+00:00`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(timestamp) = DateTime::parse_from_str(raw, TIMESTAMP_FORMAT) {
        return Some(timestamp);
    }
    let naive = raw.strip_suffix('Z')?;
    NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc().fixed_offset())
}

/// Bucket key for a raw timestamp, or `None` when it does not parse.
pub fn normalize(raw: &str, granularity: Granularity) -> Option<String> {
    parse_timestamp(raw).map(|ts| granularity.bucket_key(&ts))
}
