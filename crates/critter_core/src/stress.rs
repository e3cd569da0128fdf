//! Stress: how urgently the toy wants to act.
//!
//! Feeling unwell or hungry, displeased or excited all push stress up;
//! tiredness pulls it down. Stress never decides *what* runs, it only
//! shortens or stretches the wait before the next idle action.

use crate::emotion::{EmotionState, EMOTION_MAX};
use crate::random::RandomSource;

/// Lowest jitter draw added to stress when computing a delay.
pub const JITTER_MIN: u32 = 1;
/// Highest jitter draw added to stress when computing a delay.
pub const JITTER_MAX: u32 = 100;
/// Longest delay [`reaction_delay`] can produce: `(255 + 100) >> 1`.
pub const MAX_DELAY: u32 = (u8::MAX as u32 + JITTER_MAX) >> 1;

/// Byte-scaled stress in `0..=255`.
pub fn stress(emotions: &EmotionState) -> u8 {
    let unwell = i32::from(EMOTION_MAX - emotions.wellness());
    let hungry = i32::from(EMOTION_MAX - emotions.fullness());
    let raw = (unwell << 1) + (hungry << 1) + i32::from(emotions.displeasedness())
        + i32::from(emotions.excitedness())
        - (i32::from(emotions.tiredness()) << 1);

    // `>>` on i32 floors, so negative raw values land below zero before the clamp.
    (raw >> 2).clamp(0, i32::from(u8::MAX)) as u8
}

/// Delay, in ticks, for a given stress and jitter draw.
pub fn reaction_delay(stress: u8, jitter: u32) -> u32 {
    (u32::from(stress) + jitter) >> 1
}

/// Draw the jitter from `rng` and compute the delay before the next idle action.
pub fn random_delay<R: RandomSource + ?Sized>(stress: u8, rng: &mut R) -> u32 {
    reaction_delay(stress, rng.range_inclusive(JITTER_MIN, JITTER_MAX))
}
