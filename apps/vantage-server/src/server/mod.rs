//! HTTP surface of the dashboard.

mod http;

pub use http::{AppState, create_router};
