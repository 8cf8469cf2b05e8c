//! Core order and bot data types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order identifier. Allocated from 1 upwards and never reused.
pub type OrderId = u64;

/// Bot identifier. Allocated from 1 upwards and never reused.
pub type BotId = u64;

// ============================================================================
// Order
// ============================================================================

/// Priority class of an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Normal,
    Vip,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Normal => "normal",
            OrderType::Vip => "vip",
        }
    }

    pub fn is_vip(&self) -> bool {
        matches!(self, OrderType::Vip)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an order currently is in its lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Complete,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Complete => "complete",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Items on the menu.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MenuItem {
    Fries,
    Burger,
    #[serde(rename = "Fried Chicken")]
    FriedChicken,
}

impl MenuItem {
    /// All menu items in display order.
    pub const ALL: [MenuItem; 3] = [MenuItem::Fries, MenuItem::Burger, MenuItem::FriedChicken];

    /// Returns the item as shown on the menu.
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Fries => "Fries",
            MenuItem::Burger => "Burger",
            MenuItem::FriedChicken => "Fried Chicken",
        }
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A customer order.
///
/// `order_type`, `customer_name`, `items` and `created_at` are fixed at
/// creation. The optional fields track the order's trip through the kitchen:
/// `processed_by` and `prepared_at` are set when a bot picks the order up and
/// cleared again if that bot is removed before finishing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub customer_name: String,
    /// Items in the order they were entered.
    pub items: Vec<MenuItem>,
    pub created_at: DateTime<Utc>,
    /// Bot currently cooking this order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_by: Option<BotId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepared_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Create a new pending order.
    pub fn new(
        id: OrderId,
        order_type: OrderType,
        customer_name: impl Into<String>,
        items: Vec<MenuItem>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            order_type,
            status: OrderStatus::Pending,
            customer_name: customer_name.into(),
            items,
            created_at,
            processed_by: None,
            prepared_at: None,
            completed_at: None,
        }
    }

    pub fn is_vip(&self) -> bool {
        self.order_type.is_vip()
    }

    /// Comma separated item labels, e.g. `"Burger, Fries"`.
    pub fn items_label(&self) -> String {
        self.items
            .iter()
            .map(MenuItem::label)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub(crate) fn start_processing(&mut self, bot_id: BotId, now: DateTime<Utc>) {
        self.status = OrderStatus::Processing;
        self.processed_by = Some(bot_id);
        self.prepared_at = Some(now);
    }

    pub(crate) fn return_to_pending(&mut self) {
        self.status = OrderStatus::Pending;
        self.processed_by = None;
        self.prepared_at = None;
    }

    pub(crate) fn complete(&mut self, now: DateTime<Utc>) {
        self.status = OrderStatus::Complete;
        self.completed_at = Some(now);
    }
}

// ============================================================================
// Bot
// ============================================================================

/// Whether a bot is free to take work.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BotStatus {
    Idle,
    Processing,
}

impl BotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BotStatus::Idle => "idle",
            BotStatus::Processing => "processing",
        }
    }
}

impl fmt::Display for BotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cooking bot.
///
/// `current_order_id` and `remaining_time` are present exactly when the bot
/// is processing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bot {
    pub id: BotId,
    pub status: BotStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_order_id: Option<OrderId>,
    /// Seconds left on the current order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_time: Option<u32>,
}

impl Bot {
    /// Create a new idle bot.
    pub fn new(id: BotId) -> Self {
        Self {
            id,
            status: BotStatus::Idle,
            current_order_id: None,
            remaining_time: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.status == BotStatus::Idle
    }

    pub(crate) fn assign(&mut self, order_id: OrderId, seconds: u32) {
        self.status = BotStatus::Processing;
        self.current_order_id = Some(order_id);
        self.remaining_time = Some(seconds);
    }

    pub(crate) fn release(&mut self) {
        self.status = BotStatus::Idle;
        self.current_order_id = None;
        self.remaining_time = None;
    }
}
