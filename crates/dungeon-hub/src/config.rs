//! Hub configuration.

use std::time::Duration;

use dungeon_layout::LayoutConfig;
use serde::{Deserialize, Serialize};

/// Configuration for a hub instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// How every match is generated.
    pub layout: LayoutConfig,

    /// Length of a round. A new match replaces the old one when it ends.
    pub match_duration: Duration,

    /// Fixed RNG seed. `None` seeds from the thread RNG.
    pub seed: Option<u64>,

    /// Capacity of each command queue.
    pub channel_size: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            match_duration: Duration::from_secs(5),
            seed: None,
            channel_size: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hub_config_default() {
        let config = HubConfig::default();
        assert_eq!(config.match_duration, Duration::from_secs(5));
        assert_eq!(config.channel_size, 64);
        assert!(config.seed.is_none());
        assert_eq!(config.layout, LayoutConfig::default());
    }
}
