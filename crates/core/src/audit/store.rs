use thiserror::Error;

use super::AuditRecord;
use crate::order::{BotId, OrderId};

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Filter for querying audit events
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub event_type: Option<String>,
    pub order_id: Option<OrderId>,
    pub bot_id: Option<BotId>,
    pub limit: usize,
    pub offset: usize,
}

impl AuditFilter {
    pub fn new() -> Self {
        Self {
            limit: 100,
            offset: 0,
            ..Default::default()
        }
    }

    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn with_order_id(mut self, order_id: OrderId) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn with_bot_id(mut self, bot_id: BotId) -> Self {
        self.bot_id = Some(bot_id);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Whether a record passes the filter (ignores limit/offset).
    pub fn matches(&self, record: &AuditRecord) -> bool {
        if let Some(ref event_type) = self.event_type {
            if &record.event_type != event_type {
                return false;
            }
        }
        if self.order_id.is_some() && record.order_id != self.order_id {
            return false;
        }
        if self.bot_id.is_some() && record.bot_id != self.bot_id {
            return false;
        }
        true
    }
}

/// Trait for audit event storage
pub trait AuditStore: Send + Sync {
    /// Insert an audit record, returns the assigned ID
    fn insert(&self, record: &AuditRecord) -> Result<i64, AuditError>;

    /// Query audit records in insertion order
    fn query(&self, filter: &AuditFilter) -> Result<Vec<AuditRecord>, AuditError>;

    /// Count matching audit records
    fn count(&self, filter: &AuditFilter) -> Result<usize, AuditError>;
}
