//! Plain-text rendering of queue snapshots.

use std::fmt::Write;

use feedme_core::{Bot, BotStatus, Order, QueueSnapshot};

/// One line per order: `#2 VIP Customer [VIP] - Burger, Fries`
pub fn order_line(order: &Order) -> String {
    let mut line = format!("#{} {}", order.id, order.customer_name);
    if order.is_vip() {
        line.push_str(" [VIP]");
    }
    if !order.items.is_empty() {
        line.push_str(" - ");
        line.push_str(&order.items_label());
    }
    line
}

/// One line per bot: `Bot 1 IDLE` or `Bot 1 Cooking #3 (7s)`
pub fn bot_line(bot: &Bot) -> String {
    match (bot.status, bot.current_order_id) {
        (BotStatus::Processing, Some(order_id)) => format!(
            "Bot {} Cooking #{} ({}s)",
            bot.id,
            order_id,
            bot.remaining_time.unwrap_or(0)
        ),
        _ => format!("Bot {} IDLE", bot.id),
    }
}

fn section(out: &mut String, title: &str, lines: impl ExactSizeIterator<Item = String>) {
    let _ = writeln!(out, "{} ({})", title, lines.len());
    for line in lines {
        let _ = writeln!(out, "  {}", line);
    }
}

/// Render the full dashboard for one snapshot.
pub fn render(snapshot: &QueueSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", snapshot.taken_at.format("%H:%M:%S"));
    section(&mut out, "PENDING", snapshot.pending.iter().map(order_line));
    section(&mut out, "PROCESSING", snapshot.processing.iter().map(order_line));
    section(&mut out, "COMPLETE", snapshot.complete.iter().map(order_line));
    section(&mut out, "BOTS", snapshot.bots.iter().map(bot_line));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedme_core::{testing::fixtures, MenuItem, OrderQueueManager, OrderType};

    #[test]
    fn test_order_line() {
        assert_eq!(
            order_line(&fixtures::vip_order(2)),
            "#2 VIP Customer [VIP] - Burger, Fries"
        );
        assert_eq!(
            order_line(&fixtures::normal_order(1)),
            "#1 Customer - Burger, Fries"
        );
    }

    #[test]
    fn test_bot_line() {
        let mut manager = OrderQueueManager::new();
        manager.add_bot();
        assert_eq!(bot_line(&manager.bots()[0]), "Bot 1 IDLE");

        manager.add_order(OrderType::Normal, "John", vec![MenuItem::Burger]);
        assert_eq!(bot_line(&manager.bots()[0]), "Bot 1 Cooking #1 (10s)");

        manager.tick();
        manager.tick();
        assert_eq!(bot_line(&manager.bots()[0]), "Bot 1 Cooking #1 (8s)");
    }

    #[test]
    fn test_render_sections() {
        let mut manager = OrderQueueManager::new();
        manager.add_order(OrderType::Normal, "John", vec![MenuItem::Burger]);
        manager.add_order(OrderType::Vip, "Jane", vec![MenuItem::FriedChicken]);
        manager.add_bot();

        let text = render(&manager.snapshot());
        let lines: Vec<&str> = text.lines().skip(1).collect();
        assert_eq!(
            lines,
            vec![
                "PENDING (1)",
                "  #1 John - Burger",
                "PROCESSING (1)",
                "  #2 Jane [VIP] - Fried Chicken",
                "COMPLETE (0)",
                "BOTS (1)",
                "  Bot 1 Cooking #2 (10s)",
            ]
        );
    }
}
