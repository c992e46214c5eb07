//! Identity-provider boundary.
//!
//! SYSTEM CONTEXT
//! ==============
//! `types` defines the identity records the provider hands back, and
//! `provider` is the async seam the BaaS auth client is plugged in through.

pub mod provider;
pub mod types;
