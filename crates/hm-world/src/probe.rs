//! Bridges the world to content eligibility checks.

use hm_content::LevelProbe;
use hm_core::{ConditionId, EntityId, NeedId};

use crate::WorldContext;

/// [`LevelProbe`] for one character, answering from any [`WorldContext`].
pub struct CharacterProbe<'a> {
    world:     &'a dyn WorldContext,
    character: &'a EntityId,
}

impl<'a> CharacterProbe<'a> {
    #[inline]
    pub fn new(world: &'a dyn WorldContext, character: &'a EntityId) -> Self {
        Self { world, character }
    }
}

impl LevelProbe for CharacterProbe<'_> {
    fn need(&self, need: &NeedId) -> Option<f64> {
        self.world.need(self.character, need).map(|l| l.value)
    }

    fn lowest_condition(&self, condition: &ConditionId) -> Option<f64> {
        self.world.lowest_condition(condition)
    }
}
