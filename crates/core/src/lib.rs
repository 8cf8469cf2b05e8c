pub mod audit;
pub mod config;
pub mod order;
pub mod queue;
pub mod testing;

pub use audit::{
    create_audit_system, AuditError, AuditEvent, AuditFilter, AuditHandle, AuditRecord,
    AuditStore, AuditWriter, MemoryAuditStore,
};
pub use config::{
    load_config, load_config_from_str, validate_config, AuditConfig, Config, ConfigError,
    DemoConfig, LoggingConfig, ScriptAction, ScriptStep,
};
pub use order::{Bot, BotId, BotStatus, MenuItem, Order, OrderId, OrderStatus, OrderType};
pub use queue::{
    OrderQueueManager, PendingQueue, QueueConfig, QueueRunner, QueueSnapshot, QueueStatus,
    TickSummary, PROCESSING_SECONDS, TICK_INTERVAL,
};
