//! Domain model and collaborator contracts for the aliasly service.
//!
//! This crate has no internal dependencies. Storage, alias hosting and mail
//! delivery are described here as traits; the `db`, `ovh` and `mail` crates
//! provide the implementations and `aliasly-service` drives them.

pub mod address;
pub mod error;
pub mod ids;
pub mod mail;
pub mod models;
pub mod provider;
pub mod store;
pub mod types;
