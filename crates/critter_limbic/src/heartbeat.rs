//! Heartbeat configuration for the brain
//!
//! The heartbeat decays emotions and, after a stress-scaled delay, runs an
//! idle action, even when nobody is playing with the toy.

use critter_core::BrainConfig;
use std::time::Duration;

/// Configuration for the brain heartbeat
#[derive(Debug, Clone)]
pub struct HeartbeatConfig {
    /// Emotion points lost at the start of every tick (default: 1)
    pub decay_rate: u8,
    /// Wall time of one delay unit (default: 1s)
    pub tick_unit: Duration,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            decay_rate: 1,
            tick_unit: Duration::from_secs(1),
        }
    }
}

impl HeartbeatConfig {
    /// Quick heartbeat for demos: a full-stress wait is under two seconds
    pub fn fast() -> Self {
        Self {
            tick_unit: Duration::from_millis(10),
            ..Self::default()
        }
    }

    /// Very slow heartbeat for testing, so idle actions stay out of the way
    pub fn testing() -> Self {
        Self {
            tick_unit: Duration::from_secs(3600),
            ..Self::default()
        }
    }
}

impl From<&BrainConfig> for HeartbeatConfig {
    fn from(config: &BrainConfig) -> Self {
        Self {
            decay_rate: config.decay_rate,
            tick_unit: config.tick_unit(),
        }
    }
}
