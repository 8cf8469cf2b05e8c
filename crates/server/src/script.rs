//! Timed demo script.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};
use tracing::{info, warn};

use feedme_core::{QueueRunner, ScriptAction, ScriptStep};

/// Run every step at its offset from the moment this is called.
///
/// Steps fire in `at_secs` order; steps sharing an offset keep their listed
/// order. Returns the number of steps run.
pub async fn run_script(runner: &QueueRunner, steps: &[ScriptStep]) -> usize {
    let started = Instant::now();
    let mut ordered: Vec<&ScriptStep> = steps.iter().collect();
    ordered.sort_by_key(|step| step.at_secs);

    for step in &ordered {
        sleep_until(started + Duration::from_secs(step.at_secs)).await;
        apply(runner, &step.action).await;
    }

    info!("Demo script finished ({} steps)", ordered.len());
    ordered.len()
}

async fn apply(runner: &QueueRunner, action: &ScriptAction) {
    match action {
        ScriptAction::AddOrder {
            order_type,
            customer_name,
            items,
        } => {
            let order = runner
                .add_order(*order_type, customer_name.clone(), items.clone())
                .await;
            info!(
                "Script: {} order #{} for {}",
                order.order_type, order.id, order.customer_name
            );
        }
        ScriptAction::AddBot => {
            let bot = runner.add_bot().await;
            info!("Script: bot {} added", bot.id);
        }
        ScriptAction::RemoveBot => match runner.remove_bot().await {
            Some(bot) => info!("Script: bot {} removed", bot.id),
            None => warn!("Script: no bot to remove"),
        },
    }
}
