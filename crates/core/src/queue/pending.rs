//! Priority-ordered list of orders waiting for a bot.

use std::collections::VecDeque;

use crate::order::{Order, OrderId, OrderType};

/// Pending orders, VIP segment first.
///
/// The two segments are stored separately so VIP orders always come out
/// ahead of normal orders no matter how they were inserted.
#[derive(Debug, Clone, Default)]
pub struct PendingQueue {
    vip: VecDeque<Order>,
    normal: VecDeque<Order>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly created order.
    ///
    /// VIP orders go right after the last pending VIP (or to the very front
    /// when there is none); normal orders go to the back.
    pub fn push_new(&mut self, order: Order) {
        match order.order_type {
            OrderType::Vip => self.vip.push_back(order),
            OrderType::Normal => self.normal.push_back(order),
        }
    }

    /// Re-insert an order that was taken away from a removed bot.
    ///
    /// VIP orders follow the same rule as [`push_new`](Self::push_new).
    /// Normal orders go in front of the first pending normal order.
    pub fn push_returned(&mut self, order: Order) {
        match order.order_type {
            OrderType::Vip => self.vip.push_back(order),
            OrderType::Normal => self.normal.push_front(order),
        }
    }

    /// Take the order at the front of the list.
    pub fn pop_front(&mut self) -> Option<Order> {
        self.vip.pop_front().or_else(|| self.normal.pop_front())
    }

    /// Iterate front to back.
    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.vip.iter().chain(self.normal.iter())
    }

    pub fn ids(&self) -> Vec<OrderId> {
        self.iter().map(|o| o.id).collect()
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.iter().find(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.vip.len() + self.normal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vip.is_empty() && self.normal.is_empty()
    }

    pub fn vip_len(&self) -> usize {
        self.vip.len()
    }

    pub fn to_vec(&self) -> Vec<Order> {
        self.iter().cloned().collect()
    }
}
