// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::items_after_statements
    )
)]

//! Vantage - Portfolio Dashboard Server
//!
//! A self-hosted dashboard server for Alpaca brokerage accounts. The server
//! proxies a handful of brokerage REST resources, computes portfolio
//! performance statistics, and emits one aggregated JSON document for a
//! browser rendering layer.
//!
//! # Modules
//!
//! - [`analytics`]: the numeric core: time-series normalization, return
//!   metrics (total return, CAGR, Sharpe), rebasing, and trade aggregation.
//!   Pure functions over their inputs; everything degrades to zero/empty
//!   instead of erroring so the dashboard always renders.
//! - [`broker`]: reqwest client for the Alpaca trading API.
//! - [`data`]: flat-file data sources (benchmark series, curated trade log).
//! - [`dashboard`]: assembles the upstream data into the response object.
//! - [`server`]: axum router and static asset serving.
//! - [`config`]: environment-variable configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analytics;
pub mod broker;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod models;
pub mod server;
