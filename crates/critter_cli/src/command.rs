//! Terminal commands. Stdin stands in for the toy's sensors.

use anyhow::{bail, Context, Result};
use critter_core::{EmotionValues, Interaction, EMOTION_COUNT};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A sensor event, by name (`shake`, `tail_pull`, ...) or code (`0`-`5`)
    Interact(Interaction),
    /// Print the current emotions and stress
    State,
    /// Replace all five emotions
    Set(EmotionValues),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            bail!("empty command");
        };

        match head.to_ascii_lowercase().as_str() {
            "quit" | "exit" => Ok(Command::Quit),
            "help" | "?" => Ok(Command::Help),
            "state" => Ok(Command::State),
            "set" => {
                let values: Vec<u8> = words
                    .map(|w| {
                        w.parse::<u8>()
                            .with_context(|| format!("'{}' is not a value in 0..=100", w))
                    })
                    .collect::<Result<_>>()?;
                let values: EmotionValues = values.as_slice().try_into().map_err(|_| {
                    anyhow::anyhow!(
                        "set takes {} values: wellness fullness displeasedness tiredness excitedness",
                        EMOTION_COUNT
                    )
                })?;
                Ok(Command::Set(values))
            }
            _ => Ok(Command::Interact(head.parse()?)),
        }
    }
}

pub const HELP: &str = "\
commands:
  sound | back_sensor | tail_pull | upside_down | shake | none | 0-5
                      poke the toy
  state               show emotions and stress
  set W F D T E       replace the five emotions (each 0-100)
  help                this text
  quit                stop the brain and exit";
