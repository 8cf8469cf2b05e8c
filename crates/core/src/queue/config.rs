//! Queue runner configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the queue runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Bots added when the runner starts.
    #[serde(default)]
    pub initial_bots: usize,

    /// Capacity of the snapshot broadcast channel.
    /// Slow subscribers skip snapshots once this many are queued.
    #[serde(default = "default_snapshot_capacity")]
    pub snapshot_capacity: usize,
}

fn default_snapshot_capacity() -> usize {
    64
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            initial_bots: 0,
            snapshot_capacity: default_snapshot_capacity(),
        }
    }
}
