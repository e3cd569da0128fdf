//! Stimuli that can trigger action selection outside the idle cycle.

use crate::error::InteractionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A discrete sensor event. `None` is the idle/periodic path, and on a rule
/// it means "no interaction required".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Interaction {
    #[default]
    None = 0,
    Sound = 1,
    BackSensor = 2,
    TailPull = 3,
    UpsideDown = 4,
    Shake = 5,
}

impl Interaction {
    pub const ALL: [Interaction; 6] = [
        Self::None,
        Self::Sound,
        Self::BackSensor,
        Self::TailPull,
        Self::UpsideDown,
        Self::Shake,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sound => "sound",
            Self::BackSensor => "back_sensor",
            Self::TailPull => "tail_pull",
            Self::UpsideDown => "upside_down",
            Self::Shake => "shake",
        }
    }

    /// Whether a rule requiring `self` admits a request carrying `actual`.
    pub fn admits(self, actual: Interaction) -> bool {
        self == Self::None || self == actual
    }
}

impl TryFrom<u8> for Interaction {
    type Error = InteractionError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|i| i.code() == code)
            .ok_or(InteractionError::UnknownCode(code))
    }
}

impl FromStr for Interaction {
    type Err = InteractionError;

    /// Accepts the snake_case name (case-insensitive, `-` allowed for `_`)
    /// or the numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return Self::try_from(code);
        }
        let normalized = s.to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|i| i.name() == normalized)
            .ok_or_else(|| InteractionError::UnknownName(s.to_string()))
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_sensor_numbering() {
        assert_eq!(Interaction::None.code(), 0);
        assert_eq!(Interaction::Sound.code(), 1);
        assert_eq!(Interaction::BackSensor.code(), 2);
        assert_eq!(Interaction::TailPull.code(), 3);
        assert_eq!(Interaction::UpsideDown.code(), 4);
        assert_eq!(Interaction::Shake.code(), 5);
    }

    #[test]
    fn test_try_from_code() {
        assert_eq!(Interaction::try_from(3).unwrap(), Interaction::TailPull);
        assert_eq!(
            Interaction::try_from(6).unwrap_err(),
            InteractionError::UnknownCode(6)
        );
    }

    #[test]
    fn test_parse_names_and_codes() {
        assert_eq!("shake".parse::<Interaction>().unwrap(), Interaction::Shake);
        assert_eq!(
            "Back-Sensor".parse::<Interaction>().unwrap(),
            Interaction::BackSensor
        );
        assert_eq!("4".parse::<Interaction>().unwrap(), Interaction::UpsideDown);
        assert!(matches!(
            "tickle".parse::<Interaction>(),
            Err(InteractionError::UnknownName(_))
        ));
    }

    #[test]
    fn test_none_requirement_admits_everything() {
        for actual in Interaction::ALL {
            assert!(Interaction::None.admits(actual));
        }
        assert!(Interaction::Shake.admits(Interaction::Shake));
        assert!(!Interaction::Shake.admits(Interaction::None));
        assert!(!Interaction::Shake.admits(Interaction::Sound));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for i in Interaction::ALL {
            assert_eq!(i.to_string().parse::<Interaction>().unwrap(), i);
        }
    }
}
