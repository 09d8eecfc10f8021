pub mod analytics;
pub mod config;
pub mod consumer;
pub mod proto;
pub mod router;
pub mod search;
pub mod services;

pub use portal_query as query;
