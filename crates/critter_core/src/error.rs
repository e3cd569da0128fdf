//! Error types for the personality core.
//!
//! Only configuration and input validation can fail. Finding no runnable
//! action is a normal outcome and is reported as `None`, never as an error.

use crate::emotion::Emotion;
use thiserror::Error;

/// A rule table entry that can never be satisfied, or that refers to values
/// outside the emotion range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("rule {rule}: {emotion} bounds are inverted (min {min} > max {max})")]
    InvertedBounds {
        rule: usize,
        emotion: Emotion,
        min: u8,
        max: u8,
    },

    #[error("rule {rule}: {emotion} bound {value} is above {}", crate::emotion::EMOTION_MAX)]
    BoundOutOfRange {
        rule: usize,
        emotion: Emotion,
        value: u8,
    },
}

/// Invalid emotion values handed to the state from outside.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmotionError {
    #[error("{emotion} value {value} is outside 0..={}", crate::emotion::EMOTION_MAX)]
    OutOfRange { emotion: Emotion, value: u8 },

    #[error("expected {expected} emotion bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Unknown interaction codes or names coming from a sensor source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractionError {
    #[error("unknown interaction code {0}")]
    UnknownCode(u8),

    #[error("unknown interaction '{0}'")]
    UnknownName(String),
}
