#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod chat;
pub mod config;
pub mod error;
pub mod registry;

// Re-export primary types for convenient access
pub use chat::{ChatMessage, ChatReply, ChatRequest, StreamEvent};
pub use config::{BackendConfig, ConfigError, GatewayConfig, ListenConfig};
pub use error::BackendError;
pub use registry::{BackendDescriptor, BackendEntry, BackendRegistry, Resolution};
