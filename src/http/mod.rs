//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, tracing span)
//!     → handlers.rs (decode ProcessRequest, length check, transform)
//!     → response.rs (envelope + status mapping)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;
pub mod types;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use response::Envelope;
pub use server::{AppState, HttpServer};
pub use types::{ProcessRequest, ProcessResponse};
