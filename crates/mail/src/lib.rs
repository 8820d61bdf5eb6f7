//! Verification mail delivery.
//!
//! [`SmtpMailer`] sends through an SMTP relay configured from the
//! environment. When `SMTP_HOST` is not set, [`SmtpConfig::from_env`]
//! returns `None` and the server falls back to [`LogMailer`], which only
//! records that a message would have been sent.

pub mod log;
pub mod smtp;

pub use log::LogMailer;
pub use smtp::{SmtpConfig, SmtpError, SmtpMailer};
