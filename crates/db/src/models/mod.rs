//! Row types for the `users`, `emails` and `aliases` tables.
//!
//! Each row converts losslessly into its `aliasly_core::models` entity.

pub mod alias;
pub mod email;
pub mod user;
