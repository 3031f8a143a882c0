use std::{collections::BTreeMap, io};

use csv::{ReaderBuilder, Trim, Writer};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::{
    client::{Client, ClientError},
    clock::Clock,
    order::Order,
};

/// Clients keyed by name, fed by [`Order`]s.
pub struct Store {
    clients: BTreeMap<String, Client>,
    clock: Box<dyn Clock>,
}

#[derive(Debug, PartialEq, Error)]
pub enum StoreError {
    #[error("client {0} already exists")]
    DuplicateClient(String),
    #[error("client {0} not found")]
    UnknownClient(String),
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Counts from one [`Store::process`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub executed: u64,
    pub rejected: u64,
}

impl Store {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Store {
            clients: BTreeMap::new(),
            clock,
        }
    }

    /// Applies one order. Purchases yield their confirmation message.
    pub fn execute(&mut self, order: Order) -> Result<Option<String>, StoreError> {
        match order {
            Order::Open(name, balance) => {
                if self.clients.contains_key(&name) {
                    return Err(StoreError::DuplicateClient(name));
                }
                let client = Client::new(name.clone(), balance)?;
                self.clients.insert(name, client);
                Ok(None)
            }
            Order::Purchase(name, product, price) => {
                let client = self
                    .clients
                    .get_mut(&name)
                    .ok_or_else(|| StoreError::UnknownClient(name.clone()))?;
                let message = client.purchase(&product, price, self.clock.as_ref())?;
                Ok(Some(message))
            }
        }
    }

    /// Reads `kind,client,product,amount` orders from `input` and writes each
    /// receipt as a line to `out`.
    ///
    /// A row that cannot be read, parsed or executed is logged and skipped.
    /// Only I/O failures end the run.
    pub fn process<R: io::Read, W: io::Write>(
        &mut self,
        input: R,
        mut out: W,
    ) -> csv::Result<Summary> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);
        let mut summary = Summary::default();
        for rec in reader.records() {
            let record = match rec {
                Ok(record) => record,
                Err(err) if err.is_io_error() => return Err(err),
                Err(err) => {
                    error!("Failed to read order: {}", err);
                    summary.rejected += 1;
                    continue;
                }
            };
            let order: Order = match record.deserialize(None) {
                Ok(order) => order,
                Err(err) => {
                    error!("Failed to deserialize order: {}", err);
                    summary.rejected += 1;
                    continue;
                }
            };
            match self.execute(order) {
                Ok(Some(message)) => writeln!(out, "{message}")?,
                Ok(None) => {}
                Err(err) => {
                    warn!(line = record.position().map(|p| p.line()), error = %err, "order rejected");
                    summary.rejected += 1;
                    continue;
                }
            }
            summary.executed += 1;
        }
        out.flush()?;
        Ok(summary)
    }

    pub fn client(&self, name: &str) -> Option<&Client> {
        self.clients.get(name)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Writes a `client,balance` CSV, one row per client in name order.
    pub fn write_report<W: io::Write>(&self, out: W) -> csv::Result<()> {
        let mut writer = Writer::from_writer(out);

        writer.write_record(["client", "balance"])?;
        for client in self.clients.values() {
            writer.write_record([client.name(), client.balance().to_string().as_str()])?;
        }

        writer.flush()?;
        debug!(clients = self.clients.len(), "report written");
        Ok(())
    }
}
