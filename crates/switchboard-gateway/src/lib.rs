#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the integration tests in tests/
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tower as _;

pub mod models;
pub mod relay;
pub mod server;
pub mod upstream;

pub use server::{GatewayState, serve};
