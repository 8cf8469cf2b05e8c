use serde::{Deserialize, Serialize};

use crate::order::{MenuItem, OrderType};
use crate::queue::QueueConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub kitchen: QueueConfig,
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Audit trail configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuditConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Size of the audit event channel
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            buffer_size: default_buffer_size(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_buffer_size() -> usize {
    1000
}

/// Logging configuration (RUST_LOG takes precedence over `filter`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

/// Scripted demo run by the dashboard binary
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DemoConfig {
    /// Exit once the script has run and no order is pending or cooking
    #[serde(default = "default_true")]
    pub exit_when_idle: bool,
    #[serde(default)]
    pub script: Vec<ScriptStep>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            exit_when_idle: true,
            script: Vec::new(),
        }
    }
}

/// One scripted action, fired `at_secs` seconds after start
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ScriptStep {
    #[serde(default)]
    pub at_secs: u64,
    pub action: ScriptAction,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptAction {
    AddOrder {
        order_type: OrderType,
        customer_name: String,
        #[serde(default)]
        items: Vec<MenuItem>,
    },
    AddBot,
    RemoveBot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.kitchen.initial_bots, 0);
        assert!(config.audit.enabled);
        assert_eq!(config.audit.buffer_size, 1000);
        assert_eq!(config.logging.filter, "info");
        assert!(!config.logging.json);
        assert!(config.demo.exit_when_idle);
        assert!(config.demo.script.is_empty());
    }

    #[test]
    fn test_deserialize_sections() {
        let toml = r#"
[kitchen]
initial_bots = 2

[audit]
enabled = false

[logging]
filter = "debug"
json = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.kitchen.initial_bots, 2);
        assert_eq!(config.kitchen.snapshot_capacity, 64);
        assert!(!config.audit.enabled);
        assert_eq!(config.audit.buffer_size, 1000);
        assert_eq!(config.logging.filter, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_deserialize_script() {
        let toml = r#"
[demo]
exit_when_idle = false

[[demo.script]]
action = { type = "add_order", order_type = "vip", customer_name = "VIP Customer", items = ["Fried Chicken", "Fries"] }

[[demo.script]]
at_secs = 2
action = { type = "add_bot" }

[[demo.script]]
at_secs = 5
action = { type = "remove_bot" }
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.demo.exit_when_idle);
        assert_eq!(config.demo.script.len(), 3);
        assert_eq!(config.demo.script[0].at_secs, 0);
        assert_eq!(
            config.demo.script[0].action,
            ScriptAction::AddOrder {
                order_type: OrderType::Vip,
                customer_name: "VIP Customer".to_string(),
                items: vec![MenuItem::FriedChicken, MenuItem::Fries],
            }
        );
        assert_eq!(config.demo.script[1].action, ScriptAction::AddBot);
        assert_eq!(config.demo.script[2].at_secs, 5);
        assert_eq!(config.demo.script[2].action, ScriptAction::RemoveBot);
    }

    #[test]
    fn test_deserialize_unknown_menu_item_fails() {
        let toml = r#"
[[demo.script]]
action = { type = "add_order", order_type = "normal", customer_name = "John", items = ["Pizza"] }
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }
}
