use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::order::{BotId, MenuItem, OrderId, OrderType};

/// Audit event types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditEvent {
    // System events
    ServiceStarted {
        version: String,
        config_hash: String,
    },
    ServiceStopped {
        reason: String,
    },

    // Order lifecycle
    OrderCreated {
        order_id: OrderId,
        order_type: OrderType,
        customer_name: String,
        items: Vec<MenuItem>,
    },
    OrderAssigned {
        order_id: OrderId,
        bot_id: BotId,
    },
    OrderCompleted {
        order_id: OrderId,
        bot_id: BotId,
    },
    /// Order went back to pending because its bot was removed.
    OrderReturned {
        order_id: OrderId,
        bot_id: BotId,
        order_type: OrderType,
    },

    // Bot lifecycle
    BotAdded {
        bot_id: BotId,
    },
    BotRemoved {
        bot_id: BotId,
        /// Order the bot was cooking when removed, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        interrupted_order_id: Option<OrderId>,
    },
    /// A countdown found its bot gone or reassigned and stopped.
    CountdownAbandoned {
        order_id: OrderId,
        bot_id: BotId,
    },
}

impl AuditEvent {
    /// Returns the event type as a string for storage
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ServiceStarted { .. } => "service_started",
            Self::ServiceStopped { .. } => "service_stopped",
            Self::OrderCreated { .. } => "order_created",
            Self::OrderAssigned { .. } => "order_assigned",
            Self::OrderCompleted { .. } => "order_completed",
            Self::OrderReturned { .. } => "order_returned",
            Self::BotAdded { .. } => "bot_added",
            Self::BotRemoved { .. } => "bot_removed",
            Self::CountdownAbandoned { .. } => "countdown_abandoned",
        }
    }

    /// Extract order_id if this event is order-related
    pub fn order_id(&self) -> Option<OrderId> {
        match self {
            Self::OrderCreated { order_id, .. }
            | Self::OrderAssigned { order_id, .. }
            | Self::OrderCompleted { order_id, .. }
            | Self::OrderReturned { order_id, .. }
            | Self::CountdownAbandoned { order_id, .. } => Some(*order_id),
            Self::BotRemoved {
                interrupted_order_id,
                ..
            } => *interrupted_order_id,
            Self::ServiceStarted { .. } | Self::ServiceStopped { .. } | Self::BotAdded { .. } => {
                None
            }
        }
    }

    /// Extract bot_id if this event involves a bot
    pub fn bot_id(&self) -> Option<BotId> {
        match self {
            Self::OrderAssigned { bot_id, .. }
            | Self::OrderCompleted { bot_id, .. }
            | Self::OrderReturned { bot_id, .. }
            | Self::BotAdded { bot_id }
            | Self::BotRemoved { bot_id, .. }
            | Self::CountdownAbandoned { bot_id, .. } => Some(*bot_id),
            Self::ServiceStarted { .. }
            | Self::ServiceStopped { .. }
            | Self::OrderCreated { .. } => None,
        }
    }
}

/// Stored audit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub order_id: Option<OrderId>,
    pub bot_id: Option<BotId>,
    pub data: AuditEvent,
}
