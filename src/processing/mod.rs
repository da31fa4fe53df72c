//! Data processing subsystem.
//!
//! # Data Flow
//! ```text
//! raw input (Option<&str>)
//!     → transform.rs (blank check, trim, uppercase, truncate)
//!     → processed String | ProcessError
//! ```
//!
//! # Design Decisions
//! - The transform is the single place where blank/empty input is rejected
//! - Pure and deterministic; no I/O, no shared state
//! - Exposed behind the `Transform` trait so the HTTP layer can be exercised
//!   against other implementations

pub mod transform;

pub use transform::{
    process, ProcessError, Transform, UppercaseTransform, DEFAULT_MAX_OUTPUT_CHARS,
    TRUNCATION_MARKER,
};
