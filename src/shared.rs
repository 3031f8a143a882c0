//! A client handle that can be shared across threads.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;

use crate::{
    client::{Client, ClientError},
    clock::Clock,
};

/// Cloneable handle to one [`Client`]. Every purchase runs its checks and the
/// decrement under a single lock, so concurrent buyers cannot overspend.
#[derive(Clone, Debug)]
pub struct SharedClient {
    inner: Arc<Mutex<Client>>,
}

impl SharedClient {
    pub fn new(client: Client) -> Self {
        SharedClient {
            inner: Arc::new(Mutex::new(client)),
        }
    }

    pub fn purchase(
        &self,
        product: &str,
        price: Decimal,
        clock: &dyn Clock,
    ) -> Result<String, ClientError> {
        self.lock().purchase(product, price, clock)
    }

    pub fn name(&self) -> String {
        self.lock().name().to_string()
    }

    pub fn balance(&self) -> Decimal {
        self.lock().balance()
    }

    /// Returns the client once this is the last handle, or gives the handle
    /// back otherwise.
    pub fn into_inner(self) -> Result<Client, SharedClient> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => Ok(mutex.into_inner().unwrap_or_else(PoisonError::into_inner)),
            Err(inner) => Err(SharedClient { inner }),
        }
    }

    // Client only mutates after all checks pass, so a poisoned lock still
    // guards a valid client.
    fn lock(&self) -> MutexGuard<'_, Client> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
