use crate::bucket::BucketMap;

/// Period-over-period percentage change.
///
/// The earliest bucket has nothing to compare against and is left out. A
/// previous value of zero (or less) yields a rate of zero.
pub fn growth_rate(buckets: &BucketMap<f64>) -> BucketMap<f64> {
    buckets
        .iter()
        .zip(buckets.iter().skip(1))
        .map(|((_, &previous), (period, &current))| {
            let rate = if previous > 0.0 {
                (current - previous) / previous * 100.0
            } else {
                0.0
            };
            (period.clone(), rate)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buckets(entries: &[(&str, f64)]) -> BucketMap<f64> {
        entries.iter().map(|&(k, v)| (k.to_owned(), v)).collect()
    }

    #[test]
    fn first_period_has_no_rate() {
        let rates = growth_rate(&buckets(&[("2023-01", 15.0), ("2023-02", 20.0)]));
        assert_eq!(rates.len(), 1);
        assert!(!rates.contains_key("2023-01"));
        assert!((rates["2023-02"] - 33.333_333).abs() < 1e-4);
    }

    #[test]
    fn increasing_series_is_all_positive() {
        let rates = growth_rate(&buckets(&[
            ("2021", 1.0),
            ("2022", 2.0),
            ("2023", 2.5),
            ("2024", 100.0),
        ]));
        assert_eq!(rates.len(), 3);
        assert!(rates.values().all(|&r| r > 0.0));
        assert_eq!(rates["2022"], 100.0);
    }

    #[test]
    fn constant_series_is_all_zero() {
        let rates = growth_rate(&buckets(&[("a", 7.0), ("b", 7.0), ("c", 7.0)]));
        assert!(rates.values().all(|&r| r == 0.0));
    }

    #[test]
    fn zero_previous_yields_zero() {
        let rates = growth_rate(&buckets(&[("2023-01", 0.0), ("2023-02", 50.0), ("2023-03", 25.0)]));
        assert_eq!(rates["2023-02"], 0.0);
        assert_eq!(rates["2023-03"], -50.0);
    }

    #[test]
    fn empty_and_single_inputs() {
        assert!(growth_rate(&BucketMap::new()).is_empty());
        assert!(growth_rate(&buckets(&[("2023", 10.0)])).is_empty());
    }
}
