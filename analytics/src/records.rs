//! Order and customer documents as exported by the shop.
//!
//! Only the fields the metrics read are modelled; everything else in the
//! source documents is ignored during deserialisation.

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};

/// A record carrying a raw creation timestamp.
pub trait Timestamped {
    fn created_at(&self) -> Option<&str>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub customer: Option<CustomerRef>,
    #[serde(default)]
    pub total_price_set: Option<PriceSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRef {
    #[serde(default)]
    pub id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSet {
    pub shop_money: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Money {
    pub amount: String,
    #[serde(default)]
    pub currency_code: Option<String>,
}

impl Order {
    pub fn customer_id(&self) -> Option<u64> {
        self.customer.as_ref().and_then(|c| c.id)
    }

    /// Parses the shop-currency total. Anything that is not a finite,
    /// non-negative decimal is rejected.
    pub fn amount(&self) -> Result<f64> {
        let raw = self
            .total_price_set
            .as_ref()
            .map(|set| set.shop_money.amount.as_str())
            .unwrap_or_default();

        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
            _ => Err(AnalyticsError::MalformedAmount {
                order_id: self.id,
                raw: raw.to_owned(),
            }),
        }
    }
}

impl Timestamped for Order {
    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub default_address: Option<Address>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub city: Option<String>,
}

impl Customer {
    /// City of the default address. Blank strings count as no city.
    pub fn city(&self) -> Option<&str> {
        self.default_address
            .as_ref()
            .and_then(|a| a.city.as_deref())
            .filter(|city| !city.trim().is_empty())
    }
}

impl Timestamped for Customer {
    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn order(id: u64, customer: u64, created_at: &str, amount: &str) -> Order {
        Order {
            id,
            created_at: Some(created_at.to_owned()),
            customer: Some(CustomerRef { id: Some(customer) }),
            total_price_set: Some(PriceSet {
                shop_money: Money {
                    amount: amount.to_owned(),
                    currency_code: Some("USD".to_owned()),
                },
            }),
        }
    }

    pub fn customer(id: u64, created_at: &str, city: Option<&str>) -> Customer {
        Customer {
            id,
            created_at: Some(created_at.to_owned()),
            default_address: Some(Address {
                city: city.map(str::to_owned),
            }),
        }
    }
}
