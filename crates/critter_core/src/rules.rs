//! Rule table: which actions are runnable for a given emotional state.
//!
//! Each rule guards a payload with an admissible range per emotion and an
//! optional required interaction. The table is validated once when it is
//! built and is read-only afterwards; brains share it behind an `Arc`.

use crate::emotion::{Emotion, EmotionState, EmotionValues, EMOTION_MAX};
use crate::error::RuleError;
use crate::interaction::Interaction;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Payload of the rule every toy ships with.
pub const IDLE_ACTION: &str = "idle action";

/// One row of the rule table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRule<P = String> {
    /// Lower bounds, in (wellness, fullness, displeasedness, tiredness, excitedness) order.
    pub min: EmotionValues,
    /// Upper bounds, same order, inclusive.
    pub max: EmotionValues,
    /// `None` means the rule runs for any interaction, including idle ticks.
    #[serde(default)]
    pub interaction: Interaction,
    pub payload: P,
}

impl<P> ActionRule<P> {
    pub fn new(min: EmotionValues, max: EmotionValues, interaction: Interaction, payload: P) -> Self {
        Self {
            min,
            max,
            interaction,
            payload,
        }
    }

    /// A rule admitting every emotional state and every interaction.
    pub fn unconditional(payload: P) -> Self {
        Self::new([0; 5], [EMOTION_MAX; 5], Interaction::None, payload)
    }

    /// A rule admitting every emotional state, but only for `interaction`.
    pub fn on(interaction: Interaction, payload: P) -> Self {
        Self::new([0; 5], [EMOTION_MAX; 5], interaction, payload)
    }

    /// True if every emotion lies inside its bounds and the interaction requirement is met.
    pub fn matches(&self, emotions: &EmotionState, interaction: Interaction) -> bool {
        let values = emotions.get();
        let in_bounds = Emotion::ALL.into_iter().all(|e| {
            let i = e.index();
            self.min[i] <= values[i] && values[i] <= self.max[i]
        });
        in_bounds && self.interaction.admits(interaction)
    }

    fn validate(&self, rule: usize) -> Result<(), RuleError> {
        for emotion in Emotion::ALL {
            let (min, max) = (self.min[emotion.index()], self.max[emotion.index()]);
            if let Some(value) = [min, max].into_iter().find(|v| *v > EMOTION_MAX) {
                return Err(RuleError::BoundOutOfRange {
                    rule,
                    emotion,
                    value,
                });
            }
            if min > max {
                return Err(RuleError::InvertedBounds {
                    rule,
                    emotion,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

/// Validated, ordered, immutable list of [`ActionRule`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable<P = String> {
    rules: Vec<ActionRule<P>>,
}

/// File shape of a standalone rule table: a list of `[[rules]]` entries.
#[derive(Deserialize)]
struct RuleFile<P> {
    #[serde(default = "Vec::new")]
    rules: Vec<ActionRule<P>>,
}

impl<P> RuleTable<P> {
    /// Validate and freeze a list of rules. The first bad rule aborts construction.
    pub fn new(rules: Vec<ActionRule<P>>) -> Result<Self, RuleError> {
        for (i, rule) in rules.iter().enumerate() {
            rule.validate(i)?;
        }
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[ActionRule<P>] {
        &self.rules
    }

    /// Payloads of every rule that matches, in table order.
    pub fn candidates(&self, emotions: &EmotionState, interaction: Interaction) -> Vec<&P> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(emotions, interaction))
            .map(|rule| &rule.payload)
            .collect()
    }
}

impl<P: DeserializeOwned> RuleTable<P> {
    /// Parse a TOML document made of `[[rules]]` entries.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: RuleFile<P> =
            toml::from_str(content).with_context(|| "Failed to parse rule table TOML")?;
        let table = Self::new(file.rules)?;
        tracing::debug!("Loaded {} action rules", table.len());
        Ok(table)
    }

    /// Load a rule table from a TOML file.
    pub fn load<Q: AsRef<Path>>(path: Q) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read rule table: {}", path.as_ref().display())
        })?;
        Self::from_toml_str(&content)
    }
}

impl Default for RuleTable<String> {
    /// The single unconditional idle rule.
    fn default() -> Self {
        Self {
            rules: vec![ActionRule::unconditional(IDLE_ACTION.to_string())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(values: EmotionValues) -> EmotionState {
        EmotionState::from_values(values).unwrap()
    }

    #[test]
    fn test_default_table_is_single_idle_rule() {
        let table = RuleTable::<String>::default();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rules()[0].payload, IDLE_ACTION);
        assert_eq!(table.rules()[0].interaction, Interaction::None);
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let rule = ActionRule::new([0, 0, 60, 0, 0], [100, 100, 50, 100, 100], Interaction::None, "x");
        let err = RuleTable::new(vec![ActionRule::unconditional("ok"), rule]).unwrap_err();
        assert_eq!(
            err,
            RuleError::InvertedBounds {
                rule: 1,
                emotion: Emotion::Displeasedness,
                min: 60,
                max: 50
            }
        );
    }

    #[test]
    fn test_rejects_bound_above_max() {
        let rule = ActionRule::new([0; 5], [100, 100, 100, 100, 120], Interaction::None, "x");
        let err = RuleTable::new(vec![rule]).unwrap_err();
        assert_eq!(
            err,
            RuleError::BoundOutOfRange {
                rule: 0,
                emotion: Emotion::Excitedness,
                value: 120
            }
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let rule = ActionRule::new([10, 10, 10, 10, 10], [20, 20, 20, 20, 20], Interaction::None, "x");
        assert!(rule.matches(&state([10, 20, 15, 10, 20]), Interaction::None));
        assert!(!rule.matches(&state([9, 20, 15, 10, 20]), Interaction::None));
        assert!(!rule.matches(&state([10, 20, 15, 10, 21]), Interaction::None));
    }

    #[test]
    fn test_interaction_requirement() {
        let rule = ActionRule::on(Interaction::TailPull, "squeal");
        let s = state([50; 5]);
        assert!(rule.matches(&s, Interaction::TailPull));
        assert!(!rule.matches(&s, Interaction::None));
        assert!(!rule.matches(&s, Interaction::Shake));
    }

    #[test]
    fn test_candidates_keep_table_order() {
        let table = RuleTable::new(vec![
            ActionRule::unconditional("a"),
            ActionRule::on(Interaction::Sound, "b"),
            ActionRule::new([0; 5], [50; 5], Interaction::None, "c"),
            ActionRule::unconditional("d"),
        ])
        .unwrap();

        let s = state([40; 5]);
        assert_eq!(table.candidates(&s, Interaction::Sound), vec![&"a", &"b", &"c", &"d"]);
        assert_eq!(table.candidates(&s, Interaction::None), vec![&"a", &"c", &"d"]);
        assert_eq!(table.candidates(&state([60; 5]), Interaction::None), vec![&"a", &"d"]);
    }

    #[test]
    fn test_from_toml_str() {
        let toml_str = r#"
[[rules]]
min = [0, 0, 0, 0, 0]
max = [100, 100, 100, 100, 100]
payload = "idle action"

[[rules]]
min = [0, 0, 0, 0, 50]
max = [100, 100, 100, 100, 100]
interaction = "shake"
payload = "giggle"
"#;
        let table: RuleTable = RuleTable::from_toml_str(toml_str).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rules()[0].interaction, Interaction::None);
        assert_eq!(table.rules()[1].interaction, Interaction::Shake);
        assert_eq!(table.rules()[1].payload, "giggle");
    }

    #[test]
    fn test_from_toml_str_fails_fast_on_bad_rule() {
        let toml_str = r#"
[[rules]]
min = [90, 0, 0, 0, 0]
max = [10, 100, 100, 100, 100]
payload = "never"
"#;
        let err = RuleTable::<String>::from_toml_str(toml_str).unwrap_err();
        assert!(err.to_string().contains("inverted"));
    }
}
