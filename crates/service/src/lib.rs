//! Alias lifecycle and email-verification workflows.
//!
//! - [`UserService`] -- user CRUD, password hashing, lookup by email.
//! - [`EmailService`] -- email registration and verification
//!   ([`verification`]) plus alias provisioning against the external
//!   forwarding provider ([`alias`]).
//!
//! Services are stateless apart from immutable configuration and shared
//! collaborator handles, so one instance serves every request concurrently.
//! All operations report failures as [`aliasly_core::error::CoreError`].

pub mod alias;
pub mod config;
pub mod messages;
pub mod password;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod user;
pub mod verification;

use std::sync::Arc;

use aliasly_core::error::CoreError;
use aliasly_core::mail::MailSender;
use aliasly_core::provider::ForwardingProvider;
use aliasly_core::store::Store;
use validator::Validate;

pub use config::ServiceConfig;
pub use user::UserService;

/// Email registration, verification and alias provisioning.
///
/// The operations live in [`verification`] and [`alias`].
#[derive(Clone)]
pub struct EmailService {
    store: Arc<dyn Store>,
    provider: Arc<dyn ForwardingProvider>,
    mailer: Arc<dyn MailSender>,
    config: ServiceConfig,
}

impl EmailService {
    pub fn new(
        store: Arc<dyn Store>,
        provider: Arc<dyn ForwardingProvider>,
        mailer: Arc<dyn MailSender>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            store,
            provider,
            mailer,
            config,
        }
    }
}

/// Run `validator` rules on a request message, mapping failures to
/// [`CoreError::Validation`].
pub(crate) fn validate_request<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))
}
