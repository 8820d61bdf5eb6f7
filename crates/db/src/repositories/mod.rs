//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Reads exclude soft-deleted
//! rows unless the method name says otherwise.

pub mod alias_repo;
pub mod email_repo;
pub mod user_repo;

pub use alias_repo::AliasRepo;
pub use email_repo::EmailRepo;
pub use user_repo::UserRepo;
