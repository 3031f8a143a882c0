use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub enum Order {
    /// Opens an account: client name and initial balance.
    Open(String, Decimal),
    /// Client name, product name and price.
    Purchase(String, String, Decimal),
}

#[derive(Debug, PartialEq, Error)]
pub enum OrderError {
    #[error("Unknown order kind: {0}")]
    UnknownKind(String),
}

impl Order {
    pub fn new(
        kind: &str,
        client: String,
        product: String,
        amount: Decimal,
    ) -> Result<Self, OrderError> {
        match kind {
            "open" => Ok(Order::Open(client, amount)),
            "purchase" => Ok(Order::Purchase(client, product, amount)),
            _ => Err(OrderError::UnknownKind(kind.to_string())),
        }
    }

    pub fn client(&self) -> &str {
        match self {
            Order::Open(client, _) | Order::Purchase(client, _, _) => client,
        }
    }
}

impl<'de> Deserialize<'de> for Order {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct OrderRecord {
            kind: String,
            client: String,
            product: Option<String>,
            // Parsed from text so the written scale survives, e.g. `12.50`.
            amount: Option<String>,
        }
        let record = OrderRecord::deserialize(deserializer)?;
        let amount = match record.amount.as_deref().map(str::trim) {
            None | Some("") => Decimal::ZERO,
            Some(text) => Decimal::from_str(text).map_err(serde::de::Error::custom)?,
        };
        // Blank or missing values are left for Client to reject.
        Order::new(
            &record.kind,
            record.client,
            record.product.unwrap_or_default(),
            amount,
        )
        .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_order_creation() {
        let order = Order::new("open", "Ivan".into(), String::new(), Decimal::from(100));
        assert_eq!(order.unwrap(), Order::Open("Ivan".into(), Decimal::from(100)));
    }

    #[test]
    fn test_purchase_order_creation() {
        let order = Order::new("purchase", "Ivan".into(), "Book".into(), Decimal::from(30)).unwrap();
        assert_eq!(order.client(), "Ivan");
        match order {
            Order::Purchase(client, product, price) => {
                assert_eq!(client, "Ivan");
                assert_eq!(product, "Book");
                assert_eq!(price, Decimal::from(30));
            }
            _ => panic!("Expected Purchase order"),
        }
    }

    #[test]
    fn test_unknown_order_kind() {
        let result = Order::new("refund", "Ivan".into(), String::new(), Decimal::ONE);
        let err = result.unwrap_err();
        assert_eq!(err, OrderError::UnknownKind("refund".into()));
        assert_eq!(err.to_string(), "Unknown order kind: refund");
        let source: &dyn std::error::Error = &err;
        assert!(source.source().is_none());
    }

    #[test]
    fn test_order_deserialization() {
        let csv_data = "kind,client,product,amount
open,Ivan,,100
purchase,Ivan,Book,30
purchase,Ivan,Pen,12.50
purchase,Ivan,,
open,Anna,,";

        let mut reader = csv::Reader::from_reader(csv_data.as_bytes());

        let orders = reader
            .records()
            .map(|rec| {
                let record = rec.unwrap();
                record.deserialize(None).unwrap()
            })
            .collect::<Vec<Order>>();
        assert_eq!(orders.len(), 5);
        assert_eq!(orders[0], Order::Open("Ivan".into(), Decimal::from(100)));
        assert_eq!(orders[1], Order::Purchase("Ivan".into(), "Book".into(), Decimal::from(30)));
        assert_eq!(orders[2], Order::Purchase("Ivan".into(), "Pen".into(), Decimal::new(1250, 2)));
        match &orders[2] {
            Order::Purchase(_, _, price) => assert_eq!(price.to_string(), "12.50"),
            _ => panic!("Expected Purchase order"),
        }
        assert_eq!(orders[3], Order::Purchase("Ivan".into(), String::new(), Decimal::ZERO));
        assert_eq!(orders[4], Order::Open("Anna".into(), Decimal::ZERO));
    }

    #[test]
    fn test_order_deserialization_rejects_bad_amount() {
        let csv_data = "kind,client,product,amount
purchase,Ivan,Book,thirty";
        let mut reader = csv::Reader::from_reader(csv_data.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert!(record.deserialize::<Order>(None).is_err());
    }

    #[test]
    fn test_order_deserialization_rejects_unknown_kind() {
        let csv_data = "kind,client,product,amount
deposit,Ivan,,100";
        let mut reader = csv::Reader::from_reader(csv_data.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert!(record.deserialize::<Order>(None).is_err());
    }
}
