use std::collections::HashMap;

use crate::records::Customer;

pub const UNKNOWN_CITY: &str = "Unknown";

/// Frequency of each label across `records`; records without one are
/// counted under `default_label`.
pub fn distribution<R, F>(records: &[R], label: F, default_label: &str) -> HashMap<String, u64>
where
    F: Fn(&R) -> Option<&str>,
{
    let mut counts = HashMap::new();
    for record in records {
        let key = label(record).unwrap_or(default_label);
        *counts.entry(key.to_owned()).or_insert(0) += 1;
    }
    counts
}

pub fn city_distribution(customers: &[Customer]) -> HashMap<String, u64> {
    distribution(customers, Customer::city, UNKNOWN_CITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::fixtures::customer;

    #[test]
    fn counts_cities_with_unknown_fallback() {
        let mut homeless = customer(5, "2023-01-01T00:00:00+00:00", None);
        homeless.default_address = None;
        let customers = vec![
            customer(1, "2023-01-01T00:00:00+00:00", Some("Ottawa")),
            customer(2, "2023-01-01T00:00:00+00:00", Some("Toronto")),
            customer(3, "bad timestamp", Some("Ottawa")),
            customer(4, "2023-01-01T00:00:00+00:00", None),
            homeless,
        ];
        let counts = city_distribution(&customers);

        assert_eq!(counts["Ottawa"], 2);
        assert_eq!(counts["Toronto"], 1);
        assert_eq!(counts[UNKNOWN_CITY], 2);
        assert_eq!(counts.values().sum::<u64>(), customers.len() as u64);
    }

    #[test]
    fn empty_input_has_no_labels() {
        assert!(city_distribution(&[]).is_empty());
    }
}
