pub mod aliases;
pub mod emails;
pub mod users;
