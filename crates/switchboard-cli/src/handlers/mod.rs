//! Command handlers.
//!
//! Each handler loads the configuration, builds the registry, and runs its
//! command against it. Handlers format terminal output; everything HTTP
//! lives in the gateway crate.

pub mod models;
pub mod serve;
