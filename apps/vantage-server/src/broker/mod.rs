//! Alpaca trading API client.
//!
//! A thin reqwest wrapper over the three REST resources the dashboard
//! consumes: open positions, portfolio equity history, and recent orders.
//! The client carries the credential headers and a 30-second timeout; a
//! stalled or failed call is reported as a failure for that call only, with
//! no retry loop.

mod api_types;
mod client;
mod error;

pub use api_types::{AlpacaOrder, AlpacaPosition, PortfolioHistory};
pub use client::AlpacaClient;
pub use error::AlpacaError;
