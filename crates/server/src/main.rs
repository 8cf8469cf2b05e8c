mod dashboard;
mod script;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use feedme_core::{
    create_audit_system, load_config, validate_config, AuditEvent, AuditFilter, AuditStore,
    Config, ConfigError, LoggingConfig, MemoryAuditStore, QueueRunner,
};

use script::run_script;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file used when FEEDME_CONFIG is not set
const DEFAULT_CONFIG_PATH: &str = "feedme.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // Logging may not be initialized yet
        eprintln!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Determine config path
    let config_path = std::env::var("FEEDME_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    // Load configuration, falling back to defaults when there is no file
    let (config, from_file) = match load_config(&config_path) {
        Ok(config) => (config, true),
        Err(ConfigError::FileNotFound(_)) => (Config::default(), false),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to load config from {:?}", config_path))
        }
    };

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    init_logging(&config.logging);

    if from_file {
        info!("Configuration loaded from {:?}", config_path);
    } else {
        info!("No config at {:?}, using defaults", config_path);
    }
    info!(
        "Initial bots: {}, script steps: {}",
        config.kitchen.initial_bots,
        config.demo.script.len()
    );

    // Compute config hash for audit
    let config_json = serde_json::to_string(&config).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    let config_hash_short = &config_hash[..16];

    // Create audit system
    let audit_store = Arc::new(MemoryAuditStore::new());
    let (audit_handle, writer_handle) = if config.audit.enabled {
        let (handle, writer) = create_audit_system(
            Arc::clone(&audit_store) as Arc<dyn AuditStore>,
            config.audit.buffer_size,
        );
        (Some(handle), Some(tokio::spawn(writer.run())))
    } else {
        info!("Audit trail disabled in config");
        (None, None)
    };

    // Emit ServiceStarted event
    if let Some(ref audit) = audit_handle {
        audit
            .emit(AuditEvent::ServiceStarted {
                version: VERSION.to_string(),
                config_hash: config_hash_short.to_string(),
            })
            .await;
        info!("Emitted ServiceStarted audit event");
    }

    // Start the kitchen
    let runner = QueueRunner::new(config.kitchen.clone(), audit_handle.clone());
    let mut snapshots = runner.subscribe();
    runner.start().await;

    let exit_when_idle = config.demo.exit_when_idle;
    let reason = {
        let script = run_script(&runner, &config.demo.script);
        tokio::pin!(script);
        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);
        let mut script_done = false;

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown signal received");
                    break "graceful_shutdown";
                }
                _ = &mut script, if !script_done => {
                    script_done = true;
                    if exit_when_idle && runner.snapshot().await.is_drained() {
                        break "idle";
                    }
                }
                received = snapshots.recv() => {
                    match received {
                        Ok(snapshot) => {
                            print!("{}", dashboard::render(&snapshot));
                            if script_done && exit_when_idle && snapshot.is_drained() {
                                break "idle";
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("Dashboard lagged, skipped {} snapshots", skipped);
                        }
                        Err(RecvError::Closed) => break "runner_closed",
                    }
                }
            }
        }
    };

    runner.stop().await;
    let final_snapshot = runner.snapshot().await;
    print!("{}", dashboard::render(&final_snapshot));
    println!(
        "Served {} orders, {} still pending, {} cooking",
        final_snapshot.complete.len(),
        final_snapshot.pending.len(),
        final_snapshot.processing.len()
    );

    // Emit ServiceStopped event
    info!("Shutting down ({})", reason);
    if let Some(ref audit) = audit_handle {
        audit
            .emit(AuditEvent::ServiceStopped {
                reason: reason.to_string(),
            })
            .await;
    }

    // Drop all holders of AuditHandle so the writer's channel closes.
    // The runner holds a clone too.
    drop(runner);
    drop(audit_handle);

    // Wait for writer to finish processing remaining events
    if let Some(writer_handle) = writer_handle {
        let _ = writer_handle.await;
        info!("Audit writer stopped");

        let total = audit_store
            .count(&AuditFilter::new())
            .context("Failed to read audit trail")?;
        let completed = audit_store
            .count(&AuditFilter::new().with_event_type("order_completed"))
            .context("Failed to read audit trail")?;
        info!(
            "Audit trail: {} events, {} order completions",
            total, completed
        );
    }

    Ok(())
}

/// Install the tracing subscriber. RUST_LOG overrides the configured filter.
/// Logs go to stderr so the dashboard owns stdout.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
