//! # Critter Limbic
//!
//! Drives a toy's emotions over time. A [`Brain`] owns the emotion state and
//! a background heartbeat task that, over and over:
//! 1. decays every emotion by the configured rate
//! 2. estimates stress from the decayed state
//! 3. waits `(stress + jitter) / 2` delay units
//! 4. runs an idle action picked from the rule table
//!
//! Sensor events bypass all of that through [`Brain::interact`].

mod brain;
mod executor;
mod heartbeat;

pub use brain::Brain;
pub use executor::{ActionExecutor, ChannelExecutor, LogExecutor};
pub use heartbeat::HeartbeatConfig;
