//! OVH email-domain redirections as the alias forwarding provider.
//!
//! [`OvhClient`] talks to the OVH REST API with signed requests. When the
//! credentials are not configured the server wires in
//! [`UnconfiguredProvider`] instead, which fails every call.

pub mod client;
pub mod config;
pub mod unconfigured;

pub use client::{OvhClient, OvhError};
pub use config::OvhConfig;
pub use unconfigured::UnconfiguredProvider;
