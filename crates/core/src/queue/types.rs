//! Read-only views over the order queue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::order::{Bot, Order, OrderId};

/// Owned copy of every collection, in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueSnapshot {
    /// Pending orders, front of the queue first.
    pub pending: Vec<Order>,
    pub processing: Vec<Order>,
    pub complete: Vec<Order>,
    pub bots: Vec<Bot>,
    pub taken_at: DateTime<Utc>,
}

impl QueueSnapshot {
    pub fn pending_ids(&self) -> Vec<OrderId> {
        self.pending.iter().map(|o| o.id).collect()
    }

    pub fn processing_ids(&self) -> Vec<OrderId> {
        self.processing.iter().map(|o| o.id).collect()
    }

    pub fn complete_ids(&self) -> Vec<OrderId> {
        self.complete.iter().map(|o| o.id).collect()
    }

    /// True when no order is waiting or cooking.
    pub fn is_drained(&self) -> bool {
        self.pending.is_empty() && self.processing.is_empty()
    }
}

/// Collection sizes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStatus {
    /// Whether the tick loop is running. Always false for a bare manager.
    pub running: bool,
    pub pending_count: usize,
    /// Pending orders in the VIP segment.
    pub pending_vip_count: usize,
    pub processing_count: usize,
    pub complete_count: usize,
    pub bot_count: usize,
    pub idle_bots: usize,
    pub busy_bots: usize,
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Countdowns that were decremented.
    pub advanced: usize,
    /// Countdowns dropped because their bot was gone or reassigned.
    pub abandoned: usize,
    /// Orders that finished this tick, in completion order.
    pub completed: Vec<OrderId>,
}

impl TickSummary {
    /// True when the tick changed no state.
    pub fn is_idle(&self) -> bool {
        self.advanced == 0 && self.abandoned == 0
    }
}
