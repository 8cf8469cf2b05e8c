//! Async driver for the order queue.
//!
//! Wraps an [`OrderQueueManager`] in a lock, wakes a background task whenever
//! a countdown is due, and publishes a [`QueueSnapshot`] after every change.
//!
//! Audit events recorded by the manager are sent only after the lock has been
//! released, so a slow audit writer never stalls the queue nor loses events.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex, Notify, RwLock, RwLockWriteGuard};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::audit::AuditHandle;
use crate::order::{Bot, MenuItem, Order, OrderType};

use super::config::QueueConfig;
use super::manager::OrderQueueManager;
use super::types::{QueueSnapshot, QueueStatus};

/// The queue runner - owns the manager and its countdown loop.
pub struct QueueRunner {
    config: QueueConfig,
    manager: Arc<RwLock<OrderQueueManager>>,
    audit: Option<AuditHandle>,
    /// Held from taking events out of the manager until they are sent, so
    /// concurrent operations reach the audit channel in manager order.
    audit_order: Arc<Mutex<()>>,

    // Runtime state
    running: Arc<AtomicBool>,
    wake: Arc<Notify>,
    shutdown_tx: broadcast::Sender<()>,
    snapshot_tx: broadcast::Sender<QueueSnapshot>,
}

impl QueueRunner {
    /// Create a new runner around an empty manager.
    pub fn new(config: QueueConfig, audit: Option<AuditHandle>) -> Self {
        let mut manager = OrderQueueManager::new();
        if audit.is_some() {
            manager = manager.with_event_log();
        }

        let (shutdown_tx, _) = broadcast::channel(1);
        let (snapshot_tx, _) = broadcast::channel(config.snapshot_capacity.max(1));

        Self {
            config,
            manager: Arc::new(RwLock::new(manager)),
            audit,
            audit_order: Arc::new(Mutex::new(())),
            running: Arc::new(AtomicBool::new(false)),
            wake: Arc::new(Notify::new()),
            shutdown_tx,
            snapshot_tx,
        }
    }

    /// Start the runner (adds the configured bots and spawns the countdown
    /// loop). Orders left cooking by an earlier `stop` resume from now.
    pub async fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Queue runner already running");
            return;
        }

        info!("Starting queue runner");

        let mut manager = self.manager.write().await;
        manager.restart_clocks(Instant::now());
        if self.config.initial_bots > 0 {
            for _ in 0..self.config.initial_bots {
                manager.add_bot();
            }
            let _ = self.snapshot_tx.send(manager.snapshot());
            info!("Added {} initial bots", self.config.initial_bots);
        }
        self.release(manager).await;

        self.spawn_tick_loop();

        info!("Queue runner started");
    }

    /// Stop the countdown loop. Orders in flight keep their remaining time.
    pub async fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            warn!("Queue runner not running");
            return;
        }

        info!("Stopping queue runner");
        let _ = self.shutdown_tx.send(());
        info!("Queue runner stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Receive a snapshot after every state change.
    pub fn subscribe(&self) -> broadcast::Receiver<QueueSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Submit an order. See [`OrderQueueManager::add_order`].
    pub async fn add_order(
        &self,
        order_type: OrderType,
        customer_name: impl Into<String>,
        items: Vec<MenuItem>,
    ) -> Order {
        let mut manager = self.manager.write().await;
        let order = manager.add_order(order_type, customer_name, items);
        let _ = self.snapshot_tx.send(manager.snapshot());
        self.release(manager).await;
        self.wake.notify_one();
        order
    }

    /// Add a bot. See [`OrderQueueManager::add_bot`].
    pub async fn add_bot(&self) -> Bot {
        let mut manager = self.manager.write().await;
        let bot = manager.add_bot();
        let _ = self.snapshot_tx.send(manager.snapshot());
        self.release(manager).await;
        self.wake.notify_one();
        bot
    }

    /// Remove the newest bot. See [`OrderQueueManager::remove_bot`].
    pub async fn remove_bot(&self) -> Option<Bot> {
        let mut manager = self.manager.write().await;
        let removed = manager.remove_bot();
        if removed.is_some() {
            let _ = self.snapshot_tx.send(manager.snapshot());
        }
        self.release(manager).await;
        removed
    }

    pub async fn snapshot(&self) -> QueueSnapshot {
        self.manager.read().await.snapshot()
    }

    pub async fn status(&self) -> QueueStatus {
        let mut status = self.manager.read().await.status();
        status.running = self.is_running();
        status
    }

    async fn release(&self, guard: RwLockWriteGuard<'_, OrderQueueManager>) {
        release_and_emit(guard, self.audit.as_ref(), &self.audit_order).await;
    }

    /// Spawn the countdown loop task.
    ///
    /// The loop sleeps until the earliest countdown deadline and advances
    /// whatever is due. Operations that may start a countdown wake it so it
    /// picks up the new deadline.
    fn spawn_tick_loop(&self) {
        let running = Arc::clone(&self.running);
        let manager = Arc::clone(&self.manager);
        let wake = Arc::clone(&self.wake);
        let audit = self.audit.clone();
        let audit_order = Arc::clone(&self.audit_order);
        let snapshot_tx = self.snapshot_tx.clone();
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            info!("Tick loop started");
            loop {
                let deadline = manager.read().await.next_deadline();
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Tick loop received shutdown signal");
                        break;
                    }
                    _ = wake.notified() => {}
                    _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                        if !running.load(Ordering::Relaxed) {
                            break;
                        }

                        let mut guard = manager.write().await;
                        let summary = guard.advance_until(Instant::now());
                        if !summary.is_idle() {
                            if !summary.completed.is_empty() {
                                debug!("Tick completed orders {:?}", summary.completed);
                            }
                            let _ = snapshot_tx.send(guard.snapshot());
                        }
                        release_and_emit(guard, audit.as_ref(), &audit_order).await;
                    }
                }
            }
            info!("Tick loop stopped");
        });
    }
}

/// Release the manager lock, then send the events it recorded while held.
async fn release_and_emit(
    mut guard: RwLockWriteGuard<'_, OrderQueueManager>,
    audit: Option<&AuditHandle>,
    audit_order: &Mutex<()>,
) {
    let Some(audit) = audit else {
        return;
    };

    let events = guard.take_events();
    if events.is_empty() {
        return;
    }
    let _order = audit_order.lock().await;
    drop(guard);

    for event in events {
        audit.emit(event).await;
    }
}
