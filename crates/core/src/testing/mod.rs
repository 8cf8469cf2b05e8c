//! Testing utilities shared by unit and integration tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use feedme_core::testing::fixtures;
//!
//! let order = fixtures::vip_order(1);
//! assert!(order.is_vip());
//! ```

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::Utc;

    use crate::order::{MenuItem, Order, OrderId, OrderType};

    /// Create a pending order with reasonable defaults.
    pub fn order(id: OrderId, order_type: OrderType) -> Order {
        let customer_name = match order_type {
            OrderType::Vip => "VIP Customer",
            OrderType::Normal => "Customer",
        };
        Order::new(
            id,
            order_type,
            customer_name,
            vec![MenuItem::Burger, MenuItem::Fries],
            Utc::now(),
        )
    }

    /// Create a pending normal order.
    pub fn normal_order(id: OrderId) -> Order {
        order(id, OrderType::Normal)
    }

    /// Create a pending VIP order.
    pub fn vip_order(id: OrderId) -> Order {
        order(id, OrderType::Vip)
    }

    /// One of each menu item.
    pub fn full_menu() -> Vec<MenuItem> {
        MenuItem::ALL.to_vec()
    }
}
