use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use aliasly_core::mail::MailSender;
use aliasly_core::provider::ForwardingProvider;
use aliasly_core::store::Store;
use aliasly_db::PgStore;
use aliasly_mail::{LogMailer, SmtpConfig, SmtpMailer};
use aliasly_ovh::{OvhClient, OvhConfig, UnconfiguredProvider};
use aliasly_service::{EmailService, ServiceConfig, UserService};
use tokio::sync::Notify;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aliasly_api::config::ServerConfig;
use aliasly_api::router::build_app_router;
use aliasly_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "aliasly_api=debug,aliasly_service=debug,tower_http=debug".into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    let service_config = ServiceConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        alias_domain = %service_config.alias_domain,
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = aliasly_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    aliasly_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    aliasly_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let store: Arc<dyn Store> = Arc::new(PgStore::new(pool.clone()));

    // --- Collaborators ---
    let mailer: Arc<dyn MailSender> = match SmtpConfig::from_env() {
        Some(smtp) => Arc::new(SmtpMailer::new(&smtp).expect("Invalid SMTP configuration")),
        None => {
            tracing::warn!("SMTP_HOST not set; verification mails will only be logged");
            Arc::new(LogMailer)
        }
    };

    let provider: Arc<dyn ForwardingProvider> = match OvhConfig::from_env() {
        Some(ovh) => {
            let client = OvhClient::new(&ovh).expect("Invalid OVH configuration");
            tracing::info!(api_url = %client.api_url(), "OVH provider configured");
            Arc::new(client)
        }
        None => {
            tracing::warn!("OVH credentials not set; alias creation will fail");
            Arc::new(UnconfiguredProvider)
        }
    };

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        store: Arc::clone(&store),
        users: UserService::new(Arc::clone(&store)),
        emails: EmailService::new(store, provider, mailer, service_config),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    let shutdown_started = Arc::new(Notify::new());
    let signal_seen = Arc::clone(&shutdown_started);
    let server = async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                signal_seen.notify_one();
            })
            .await
    };
    let drain_deadline = async {
        shutdown_started.notified().await;
        tokio::time::sleep(Duration::from_secs(config.shutdown_timeout_secs)).await;
    };

    tokio::select! {
        result = server => result.expect("Server error"),
        () = drain_deadline => {
            tracing::warn!(
                timeout_secs = config.shutdown_timeout_secs,
                "Shutdown timeout elapsed; dropping open connections"
            );
        }
    }

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
