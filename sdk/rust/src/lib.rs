//! Client SDK for the data processing service.

pub mod client;

pub use client::{ClientError, ProcessResponse, ProcessorClient};
