use std::fmt::{self, Display};

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::clock::{Clock, SystemClock, format_timestamp};

/// Reasons a client cannot be constructed or a purchase cannot go through.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{argument} is empty or whitespace")]
    NullOrEmptyName { argument: &'static str },
    #[error("{argument} must be {requirement}, got {value}")]
    NegativeAmount {
        argument: &'static str,
        requirement: &'static str,
        value: Decimal,
    },
    #[error("price {price} exceeds the balance {balance} of client {client}")]
    InsufficientFunds {
        client: String,
        price: Decimal,
        balance: Decimal,
    },
}

/// A retail client. The name is never blank and the balance never negative;
/// both hold from construction onwards since the fields are only reachable
/// through validated operations.
#[derive(Clone, Debug, PartialEq)]
pub struct Client {
    name: String,
    balance: Decimal,
}

impl Client {
    pub fn new(name: impl Into<String>, balance: Decimal) -> Result<Self, ClientError> {
        let name = name.into();
        require_name("name", &name)?;
        if balance < Decimal::ZERO {
            return Err(ClientError::NegativeAmount {
                argument: "balance",
                requirement: ">= 0",
                value: balance,
            });
        }
        debug!(client = %name, %balance, "client created");
        Ok(Client { name, balance })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Buys `product` for `price`, stamping the receipt with the current
    /// local time.
    pub fn buy(&mut self, product: &str, price: Decimal) -> Result<String, ClientError> {
        self.purchase(product, price, &SystemClock)
    }

    /// Buys `product` for `price` and returns the confirmation message.
    ///
    /// Checks run in order: product name, positive price, price within the
    /// balance. The balance is only touched once all of them pass, so a
    /// failed call leaves the client as it was.
    pub fn purchase(
        &mut self,
        product: &str,
        price: Decimal,
        clock: &dyn Clock,
    ) -> Result<String, ClientError> {
        require_name("product name", product)?;
        if price <= Decimal::ZERO {
            return Err(ClientError::NegativeAmount {
                argument: "price",
                requirement: "> 0",
                value: price,
            });
        }
        if price > self.balance {
            return Err(ClientError::InsufficientFunds {
                client: self.name.clone(),
                price,
                balance: self.balance,
            });
        }

        self.balance -= price;
        debug_assert!(self.balance >= Decimal::ZERO);

        let message = format!(
            "Client {} bought {} at a price {}$ {}",
            self.name,
            product,
            price,
            format_timestamp(clock.now())
        );
        debug_assert!(!message.is_empty());
        debug!(client = %self.name, product, %price, balance = %self.balance, "purchase accepted");
        Ok(message)
    }
}

impl Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn require_name(argument: &'static str, value: &str) -> Result<(), ClientError> {
    if value.trim().is_empty() {
        return Err(ClientError::NullOrEmptyName { argument });
    }
    Ok(())
}
