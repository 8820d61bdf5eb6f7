use std::sync::Arc;

use aliasly_core::store::Store;
use aliasly_service::{EmailService, UserService};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is an `Arc` or a service holding `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Storage handle, used directly only by the health check.
    pub store: Arc<dyn Store>,
    pub users: UserService,
    pub emails: EmailService,
}
