//! Orders and the bots that cook them.

mod types;

pub use types::{Bot, BotId, BotStatus, MenuItem, Order, OrderId, OrderStatus, OrderType};
