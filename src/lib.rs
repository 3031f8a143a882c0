//! A retail client holding a name and a money balance, plus the order
//! processing around it.

pub mod client;
pub mod clock;
pub mod order;
pub mod shared;
pub mod store;

pub use client::{Client, ClientError};
pub use clock::{Clock, FixedClock, SystemClock};
