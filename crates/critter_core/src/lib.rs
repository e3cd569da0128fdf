//! # Critter Core
//!
//! The personality of an animatronic toy, reduced to its arithmetic:
//!
//! - five emotion counters in `0..=100` that decay over time
//! - a rule table mapping emotion ranges (and optionally an interaction) to actions
//! - a stress estimate that scales how long the toy waits before idling again
//! - uniform random selection among the rules that currently match
//!
//! Nothing here sleeps or spawns; the heartbeat lives in `critter_limbic`.

pub mod config;
pub mod emotion;
pub mod error;
pub mod interaction;
pub mod random;
pub mod rules;
pub mod select;
pub mod stress;

pub use config::{BrainConfig, CritterConfig};
pub use emotion::{Emotion, EmotionState, EmotionValues, EMOTION_COUNT, EMOTION_MAX};
pub use error::{EmotionError, InteractionError, RuleError};
pub use interaction::Interaction;
pub use random::{RandomSource, SystemRandom};
pub use rules::{ActionRule, RuleTable, IDLE_ACTION};
pub use select::select;
pub use stress::{random_delay, reaction_delay, stress, MAX_DELAY};
