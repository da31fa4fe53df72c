//! Data processing service library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod processing;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use processing::{process, ProcessError};
