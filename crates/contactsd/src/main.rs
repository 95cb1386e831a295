// # contactsd - Contact Book Daemon
//
// A THIN integration layer: all contact logic lives in contacts-core and
// contacts-api. The daemon is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Opening the contact store
// 4. Serving the REST API until SIGINT/SIGTERM
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// ### Server
// - `CONTACTS_HOST`: Address to bind (default: 0.0.0.0)
// - `CONTACTS_PORT`: Port to listen on (default: 4000)
//
// ### Store
// - `CONTACTS_STORE_TYPE`: Type of store (sqlite, memory; default: sqlite)
// - `CONTACTS_STORE_PATH`: Path to the SQLite file (default: ./contacts.db)
//
// ### Logging
// - `CONTACTS_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
//
// ## Example
//
// ```bash
// export CONTACTS_PORT=4000
// export CONTACTS_STORE_PATH=/var/lib/contacts/contacts.db
//
// contactsd
// ```

use anyhow::Result;
use contacts_core::config::{ContactsConfig, ServerConfig, StoreConfig};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum DaemonExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<DaemonExitCode> for ExitCode {
    fn from(code: DaemonExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Daemon configuration as read from the environment
#[derive(Debug, Clone)]
struct Config {
    host: String,
    port: String,
    store_type: String,
    store_path: String,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("CONTACTS_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("CONTACTS_PORT").unwrap_or_else(|| "4000".to_string()),
            store_type: lookup("CONTACTS_STORE_TYPE").unwrap_or_else(|| "sqlite".to_string()),
            store_path: lookup("CONTACTS_STORE_PATH")
                .unwrap_or_else(|| "./contacts.db".to_string()),
            log_level: lookup("CONTACTS_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        }
    }

    /// Validate the raw values and build the typed configuration
    fn into_contacts_config(self) -> Result<ContactsConfig> {
        let port: u16 = self.port.parse().map_err(|_| {
            anyhow::anyhow!(
                "CONTACTS_PORT must be a number between 1 and 65535. Got: {}",
                self.port
            )
        })?;

        let store = match self.store_type.as_str() {
            "sqlite" => {
                if self.store_path.is_empty() {
                    anyhow::bail!(
                        "CONTACTS_STORE_PATH cannot be empty when CONTACTS_STORE_TYPE=sqlite"
                    );
                }
                StoreConfig::Sqlite {
                    path: self.store_path,
                }
            }
            "memory" => StoreConfig::Memory,
            other => anyhow::bail!(
                "CONTACTS_STORE_TYPE '{}' is not supported. \
                Supported types: sqlite, memory",
                other
            ),
        };

        let config = ContactsConfig {
            server: ServerConfig {
                host: self.host,
                port,
                ..ServerConfig::default()
            },
            store,
            ..ContactsConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse the log level
    fn log_level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "CONTACTS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }
}

fn main() -> ExitCode {
    let raw = Config::from_env();

    let log_level = match raw.log_level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration validation error: {}", e);
            return DaemonExitCode::ConfigError.into();
        }
    };

    let config = match raw.into_contacts_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration validation error: {}", e);
            return DaemonExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DaemonExitCode::ConfigError.into();
    }

    info!("Starting contactsd");
    info!(
        "Store: {}, listening on {}",
        config.store.type_name(),
        config.server.bind_address()
    );

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DaemonExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run_daemon(config).await {
            error!("Daemon error: {}", e);
            DaemonExitCode::RuntimeError
        } else {
            DaemonExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Run the daemon until a shutdown signal arrives
async fn run_daemon(config: ContactsConfig) -> Result<()> {
    let store = contacts_core::open_store(&config.store).await?;
    info!(
        "Contact store ready ({}, {} contact(s))",
        store.backend_name(),
        store.count().await?
    );

    let app = contacts_api::router(store, &config.server);

    let listener = tokio::net::TcpListener::bind(config.server.bind_address())
        .await
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to bind {}: {}",
                config.server.bind_address(),
                e
            )
        })?;

    contacts_api::serve(listener, app, async {
        match wait_for_shutdown().await {
            Ok(signal) => info!("Received shutdown signal: {}", signal),
            Err(e) => error!("Shutdown signal handler failed: {}", e),
        }
    })
    .await?;

    info!("Shutting down daemon");
    Ok(())
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
///
/// # Returns
///
/// Returns the name of the signal received.
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    let name = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };
    Ok(name)
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to wait for CTRL-C: {}", e))?;
    Ok("SIGINT")
}
