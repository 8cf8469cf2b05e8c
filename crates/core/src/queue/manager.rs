//! Order queue state machine.
//!
//! Owns the four collections and moves orders between them:
//! - **pending**: priority-ordered, VIP segment first
//! - **processing**: one order per busy bot, in assignment order
//! - **complete**: history, in completion order
//!
//! Time advances either one simulated second per [`OrderQueueManager::tick`]
//! call, or against a clock through [`OrderQueueManager::advance_until`],
//! where every countdown keeps its own one-second phase.

use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::audit::AuditEvent;
use crate::order::{Bot, BotId, BotStatus, MenuItem, Order, OrderId, OrderType};

use super::pending::PendingQueue;
use super::types::{QueueSnapshot, QueueStatus, TickSummary};

/// Seconds a bot spends on one order.
pub const PROCESSING_SECONDS: u32 = 10;

/// Length of one countdown step.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// A running timer for one (bot, order) pairing.
///
/// Countdowns hold ids only. On every tick the bot is looked up again, so a
/// countdown whose bot was removed notices on its next tick and stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Countdown {
    /// Creation order; breaks ties between countdowns due at the same instant.
    seq: u64,
    bot_id: BotId,
    order_id: OrderId,
    next_due: Instant,
}

/// The order queue manager.
#[derive(Debug)]
pub struct OrderQueueManager {
    pending: PendingQueue,
    processing: Vec<Order>,
    complete: Vec<Order>,
    bots: Vec<Bot>,
    countdowns: Vec<Countdown>,
    next_order_id: OrderId,
    next_bot_id: BotId,
    next_countdown_seq: u64,
    record_events: bool,
    events: Vec<AuditEvent>,
}

impl Default for OrderQueueManager {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderQueueManager {
    /// Create an empty manager with no bots.
    pub fn new() -> Self {
        Self {
            pending: PendingQueue::new(),
            processing: Vec::new(),
            complete: Vec::new(),
            bots: Vec::new(),
            countdowns: Vec::new(),
            next_order_id: 1,
            next_bot_id: 1,
            next_countdown_seq: 0,
            record_events: false,
            events: Vec::new(),
        }
    }

    /// Record lifecycle events so the owner can collect them with
    /// [`take_events`](Self::take_events).
    pub fn with_event_log(mut self) -> Self {
        self.record_events = true;
        self
    }

    /// Take the events recorded since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<AuditEvent> {
        std::mem::take(&mut self.events)
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    /// Submit a new order.
    ///
    /// Returns the order as created. It may already have been handed to an
    /// idle bot by the time this returns; use [`order`](Self::order) for the
    /// current state.
    pub fn add_order(
        &mut self,
        order_type: OrderType,
        customer_name: impl Into<String>,
        items: Vec<MenuItem>,
    ) -> Order {
        let id = self.next_order_id;
        self.next_order_id += 1;

        let order = Order::new(id, order_type, customer_name, items, Utc::now());
        info!(
            "Order #{} created ({}, {})",
            order.id, order.order_type, order.customer_name
        );
        self.emit(AuditEvent::OrderCreated {
            order_id: order.id,
            order_type: order.order_type,
            customer_name: order.customer_name.clone(),
            items: order.items.clone(),
        });

        self.pending.push_new(order.clone());
        self.try_assign_orders(Instant::now());
        order
    }

    /// Add an idle bot. It picks up the front pending order right away if
    /// there is one.
    pub fn add_bot(&mut self) -> Bot {
        let id = self.next_bot_id;
        self.next_bot_id += 1;

        let bot = Bot::new(id);
        info!("Bot {} added", id);
        self.emit(AuditEvent::BotAdded { bot_id: id });

        self.bots.push(bot.clone());
        self.try_assign_orders(Instant::now());
        bot
    }

    /// Remove the most recently added bot.
    ///
    /// An order the bot was cooking goes back to pending. VIP orders return
    /// behind the VIPs already waiting; normal orders return in front of every
    /// waiting normal order. No other bot is given work as a result.
    ///
    /// Returns `None` and leaves everything untouched when there are no bots.
    pub fn remove_bot(&mut self) -> Option<Bot> {
        let bot = self.bots.pop()?;

        let mut interrupted = None;
        if bot.status == BotStatus::Processing {
            if let Some(order_id) = bot.current_order_id {
                if let Some(idx) = self.processing.iter().position(|o| o.id == order_id) {
                    let mut order = self.processing.remove(idx);
                    order.return_to_pending();
                    info!("Order #{} returned to pending from bot {}", order_id, bot.id);
                    self.emit(AuditEvent::OrderReturned {
                        order_id,
                        bot_id: bot.id,
                        order_type: order.order_type,
                    });
                    self.pending.push_returned(order);
                    interrupted = Some(order_id);
                }
            }
        }

        info!("Bot {} removed", bot.id);
        self.emit(AuditEvent::BotRemoved {
            bot_id: bot.id,
            interrupted_order_id: interrupted,
        });
        Some(bot)
    }

    /// Advance every running countdown by one second.
    ///
    /// Only countdowns that existed when the tick began are advanced. Orders
    /// handed out during the tick start counting on the next one.
    pub fn tick(&mut self) -> TickSummary {
        let mut summary = TickSummary::default();
        let mut due = std::mem::take(&mut self.countdowns);
        due.sort_by_key(|c| c.seq);

        for countdown in due {
            self.advance_countdown(countdown, &mut summary);
        }
        summary
    }

    /// Advance every countdown whose next second has passed by `now`.
    ///
    /// Each countdown runs on its own clock, starting when its order was
    /// picked up. Steps are taken in deadline order, older countdowns first
    /// on a tie. An order handed out by a completion starts its clock at that
    /// completion's deadline.
    pub fn advance_until(&mut self, now: Instant) -> TickSummary {
        let mut summary = TickSummary::default();
        while let Some(idx) = self.next_due_index(now) {
            let countdown = self.countdowns.swap_remove(idx);
            self.advance_countdown(countdown, &mut summary);
        }
        summary
    }

    /// When the earliest countdown takes its next step.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.countdowns.iter().map(|c| c.next_due).min()
    }

    /// Restart every countdown's clock at `now`, keeping remaining time.
    ///
    /// Used when time was not being tracked, so stale deadlines do not all
    /// fall due at once.
    pub fn restart_clocks(&mut self, now: Instant) {
        for countdown in &mut self.countdowns {
            countdown.next_due = now + TICK_INTERVAL;
        }
    }

    // ------------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------------

    /// Pending orders, front of the queue first.
    pub fn pending_orders(&self) -> impl Iterator<Item = &Order> + '_ {
        self.pending.iter()
    }

    /// Ids of the pending orders, front of the queue first.
    pub fn pending_ids(&self) -> Vec<OrderId> {
        self.pending.ids()
    }

    /// Orders being cooked, in the order they were picked up.
    pub fn processing_orders(&self) -> &[Order] {
        &self.processing
    }

    /// Finished orders, oldest first.
    pub fn complete_orders(&self) -> &[Order] {
        &self.complete
    }

    /// Bots, oldest first.
    pub fn bots(&self) -> &[Bot] {
        &self.bots
    }

    /// Look up an order in any collection.
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.pending
            .get(id)
            .or_else(|| self.processing.iter().find(|o| o.id == id))
            .or_else(|| self.complete.iter().find(|o| o.id == id))
    }

    /// Look up a bot by id.
    pub fn bot(&self, id: BotId) -> Option<&Bot> {
        self.bots.iter().find(|b| b.id == id)
    }

    /// Number of countdowns still scheduled, including ones whose bot has
    /// been removed but that have not ticked since.
    pub fn active_countdowns(&self) -> usize {
        self.countdowns.len()
    }

    /// Owned copy of all four collections.
    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            pending: self.pending.to_vec(),
            processing: self.processing.clone(),
            complete: self.complete.clone(),
            bots: self.bots.clone(),
            taken_at: Utc::now(),
        }
    }

    /// Collection sizes and bot counts. `running` is left to the runner.
    pub fn status(&self) -> QueueStatus {
        let idle_bots = self.bots.iter().filter(|b| b.is_idle()).count();
        QueueStatus {
            running: false,
            pending_count: self.pending.len(),
            pending_vip_count: self.pending.vip_len(),
            processing_count: self.processing.len(),
            complete_count: self.complete.len(),
            bot_count: self.bots.len(),
            idle_bots,
            busy_bots: self.bots.len() - idle_bots,
        }
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    /// Hand the front pending orders to idle bots, oldest bot first.
    fn try_assign_orders(&mut self, started: Instant) {
        // Bots are not added or removed during a pass, so indices stay valid.
        let idle: Vec<usize> = self
            .bots
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_idle())
            .map(|(idx, _)| idx)
            .collect();

        for idx in idle {
            let Some(order) = self.pending.pop_front() else {
                break;
            };
            self.process_order(idx, order, started);
        }
    }

    fn process_order(&mut self, bot_idx: usize, mut order: Order, started: Instant) {
        let bot = &mut self.bots[bot_idx];
        bot.assign(order.id, PROCESSING_SECONDS);
        let bot_id = bot.id;

        order.start_processing(bot_id, Utc::now());
        debug!("Bot {} picked up order #{}", bot_id, order.id);
        self.emit(AuditEvent::OrderAssigned {
            order_id: order.id,
            bot_id,
        });

        let seq = self.next_countdown_seq;
        self.next_countdown_seq += 1;
        self.countdowns.push(Countdown {
            seq,
            bot_id,
            order_id: order.id,
            next_due: started + TICK_INTERVAL,
        });
        self.processing.push(order);
    }

    fn next_due_index(&self, now: Instant) -> Option<usize> {
        self.countdowns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.next_due <= now)
            .min_by_key(|(_, c)| (c.next_due, c.seq))
            .map(|(idx, _)| idx)
    }

    /// One step of one countdown: re-check its bot, take a second off, and
    /// complete the order at zero.
    fn advance_countdown(&mut self, mut countdown: Countdown, summary: &mut TickSummary) {
        let Some(idx) = self.bots.iter().position(|b| {
            b.id == countdown.bot_id && b.current_order_id == Some(countdown.order_id)
        }) else {
            debug!(
                "Countdown for order #{} on bot {} abandoned",
                countdown.order_id, countdown.bot_id
            );
            summary.abandoned += 1;
            self.emit(AuditEvent::CountdownAbandoned {
                order_id: countdown.order_id,
                bot_id: countdown.bot_id,
            });
            return;
        };

        let bot = &mut self.bots[idx];
        if let Some(remaining) = bot.remaining_time.as_mut() {
            if *remaining > 0 {
                *remaining -= 1;
            }
        }
        summary.advanced += 1;

        if bot.remaining_time == Some(0) {
            self.complete_order(countdown);
            summary.completed.push(countdown.order_id);
        } else {
            countdown.next_due += TICK_INTERVAL;
            self.countdowns.push(countdown);
        }
    }

    fn complete_order(&mut self, countdown: Countdown) {
        let now = Utc::now();
        if let Some(idx) = self
            .processing
            .iter()
            .position(|o| o.id == countdown.order_id)
        {
            let mut order = self.processing.remove(idx);
            order.complete(now);
            self.complete.push(order);
        }

        if let Some(bot) = self.bots.iter_mut().find(|b| b.id == countdown.bot_id) {
            bot.release();
        }

        info!(
            "Order #{} completed by bot {}",
            countdown.order_id, countdown.bot_id
        );
        self.emit(AuditEvent::OrderCompleted {
            order_id: countdown.order_id,
            bot_id: countdown.bot_id,
        });

        self.try_assign_orders(countdown.next_due);
    }

    fn emit(&mut self, event: AuditEvent) {
        if self.record_events {
            self.events.push(event);
        }
    }
}
