//! The five emotion counters that make up the toy's affect.
//!
//! Each emotion is one unsigned byte holding 0-100: five `u8` fields in a
//! fixed order, with a five-byte snapshot encoding.

use crate::error::EmotionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of every emotion counter.
pub const EMOTION_MAX: u8 = 100;

/// Number of emotion dimensions.
pub const EMOTION_COUNT: usize = 5;

/// Emotion values in the fixed order
/// (wellness, fullness, displeasedness, tiredness, excitedness).
pub type EmotionValues = [u8; EMOTION_COUNT];

/// Names one emotion dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Wellness,
    Fullness,
    Displeasedness,
    Tiredness,
    Excitedness,
}

impl Emotion {
    pub const ALL: [Emotion; EMOTION_COUNT] = [
        Self::Wellness,
        Self::Fullness,
        Self::Displeasedness,
        Self::Tiredness,
        Self::Excitedness,
    ];

    /// Position of this dimension in [`EmotionValues`].
    pub fn index(self) -> usize {
        match self {
            Self::Wellness => 0,
            Self::Fullness => 1,
            Self::Displeasedness => 2,
            Self::Tiredness => 3,
            Self::Excitedness => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Wellness => "wellness",
            Self::Fullness => "fullness",
            Self::Displeasedness => "displeasedness",
            Self::Tiredness => "tiredness",
            Self::Excitedness => "excitedness",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current emotion counters of one toy.
///
/// Every field stays within `0..=EMOTION_MAX`: `set` and `from_bytes` reject
/// anything larger, and `decay` only ever lowers values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEmotionState")]
pub struct EmotionState {
    wellness: u8,
    fullness: u8,
    displeasedness: u8,
    tiredness: u8,
    excitedness: u8,
}

impl EmotionState {
    /// All counters at zero, the state a freshly built brain starts in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from values in the fixed order, rejecting out-of-range input.
    pub fn from_values(values: EmotionValues) -> Result<Self, EmotionError> {
        let mut state = Self::default();
        state.set(values)?;
        Ok(state)
    }

    /// Snapshot of all five values in the fixed order.
    pub fn get(&self) -> EmotionValues {
        [
            self.wellness,
            self.fullness,
            self.displeasedness,
            self.tiredness,
            self.excitedness,
        ]
    }

    /// Replace all five values at once.
    ///
    /// Values above [`EMOTION_MAX`] are rejected and the state is left as it
    /// was; nothing is clamped silently.
    pub fn set(&mut self, values: EmotionValues) -> Result<(), EmotionError> {
        if let Some(emotion) = Emotion::ALL
            .into_iter()
            .find(|e| values[e.index()] > EMOTION_MAX)
        {
            return Err(EmotionError::OutOfRange {
                emotion,
                value: values[emotion.index()],
            });
        }

        let [wellness, fullness, displeasedness, tiredness, excitedness] = values;
        self.wellness = wellness;
        self.fullness = fullness;
        self.displeasedness = displeasedness;
        self.tiredness = tiredness;
        self.excitedness = excitedness;
        Ok(())
    }

    /// Lower every counter by `rate`, bottoming out at zero.
    pub fn decay(&mut self, rate: u8) {
        for field in [
            &mut self.wellness,
            &mut self.fullness,
            &mut self.displeasedness,
            &mut self.tiredness,
            &mut self.excitedness,
        ] {
            *field = field.saturating_sub(rate).min(EMOTION_MAX);
        }
    }

    pub fn value(&self, emotion: Emotion) -> u8 {
        self.get()[emotion.index()]
    }

    pub fn wellness(&self) -> u8 {
        self.wellness
    }

    pub fn fullness(&self) -> u8 {
        self.fullness
    }

    pub fn displeasedness(&self) -> u8 {
        self.displeasedness
    }

    pub fn tiredness(&self) -> u8 {
        self.tiredness
    }

    pub fn excitedness(&self) -> u8 {
        self.excitedness
    }

    /// One byte per emotion, in the fixed order.
    pub fn to_bytes(&self) -> [u8; EMOTION_COUNT] {
        self.get()
    }

    /// Decode the five-byte snapshot produced by [`EmotionState::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EmotionError> {
        let values: EmotionValues =
            bytes
                .try_into()
                .map_err(|_| EmotionError::InvalidLength {
                    expected: EMOTION_COUNT,
                    actual: bytes.len(),
                })?;
        Self::from_values(values)
    }
}

impl TryFrom<EmotionValues> for EmotionState {
    type Error = EmotionError;

    fn try_from(values: EmotionValues) -> Result<Self, Self::Error> {
        Self::from_values(values)
    }
}

impl fmt::Display for EmotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "wellness={} fullness={} displeasedness={} tiredness={} excitedness={}",
            self.wellness, self.fullness, self.displeasedness, self.tiredness, self.excitedness
        )
    }
}

/// Unchecked wire shape; range-checked on the way into [`EmotionState`].
#[derive(Deserialize)]
struct RawEmotionState {
    #[serde(default)]
    wellness: u8,
    #[serde(default)]
    fullness: u8,
    #[serde(default)]
    displeasedness: u8,
    #[serde(default)]
    tiredness: u8,
    #[serde(default)]
    excitedness: u8,
}

impl TryFrom<RawEmotionState> for EmotionState {
    type Error = EmotionError;

    fn try_from(raw: RawEmotionState) -> Result<Self, Self::Error> {
        Self::from_values([
            raw.wellness,
            raw.fullness,
            raw.displeasedness,
            raw.tiredness,
            raw.excitedness,
        ])
    }
}
