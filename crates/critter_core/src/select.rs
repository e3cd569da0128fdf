//! Action selection against the rule table.

use crate::emotion::EmotionState;
use crate::interaction::Interaction;
use crate::random::RandomSource;
use crate::rules::RuleTable;

/// Pick one runnable payload, uniformly at random among all matching rules.
///
/// Returns `None` when no rule matches; that is the ordinary "nothing to do"
/// outcome, not a failure. There is no priority between matches: a rule's
/// position in the table only fixes the order of the candidate list.
pub fn select<'t, P, R>(
    table: &'t RuleTable<P>,
    emotions: &EmotionState,
    interaction: Interaction,
    rng: &mut R,
) -> Option<&'t P>
where
    R: RandomSource + ?Sized,
{
    let candidates = table.candidates(emotions, interaction);
    let last = candidates.len().checked_sub(1)?;
    let pick = rng.range_inclusive(0, last as u32) as usize;
    candidates.get(pick).copied()
}
