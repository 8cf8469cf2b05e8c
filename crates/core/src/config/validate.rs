use super::{types::Config, ConfigError, ScriptAction};

/// Validate configuration
/// Currently validates:
/// - Audit buffer and snapshot channel sizes are not 0
/// - Scripted orders have a customer name and at least one item
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.audit.buffer_size == 0 {
        return Err(ConfigError::ValidationError(
            "audit.buffer_size cannot be 0".to_string(),
        ));
    }

    if config.kitchen.snapshot_capacity == 0 {
        return Err(ConfigError::ValidationError(
            "kitchen.snapshot_capacity cannot be 0".to_string(),
        ));
    }

    for (idx, step) in config.demo.script.iter().enumerate() {
        if let ScriptAction::AddOrder {
            customer_name,
            items,
            ..
        } = &step.action
        {
            if customer_name.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "demo.script[{}]: customer_name cannot be empty",
                    idx
                )));
            }
            if items.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "demo.script[{}]: order needs at least one item",
                    idx
                )));
            }
        }
    }

    Ok(())
}
