//! Clamped numeric levels: character needs and building conditions.
//!
//! Every write goes through [`Levels::increase`] or [`Levels::set`], both of
//! which clamp to `[0, max_value]`.  No caller can observe an out-of-range
//! value.

use std::collections::BTreeMap;

use crate::{ConditionId, NeedId};

/// One tracked value and its ceiling.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level {
    pub value: f64,
    pub max:   f64,
}

impl Level {
    /// `true` once the value has reached its ceiling.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.value >= self.max
    }
}

/// Ordered map of `K → Level`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Levels<K: Ord> {
    inner: BTreeMap<K, Level>,
}

impl<K: Ord> Default for Levels<K> {
    fn default() -> Self {
        Self { inner: BTreeMap::new() }
    }
}

/// Per-character need values.
pub type NeedLevels = Levels<NeedId>;

/// Per-building condition values.
pub type ConditionLevels = Levels<ConditionId>;

impl<K: Ord + Clone> Levels<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `key` at `value` (clamped) with ceiling `max`.
    ///
    /// A negative `max` is treated as 0.
    pub fn track(&mut self, key: K, value: f64, max: f64) {
        let max = max.max(0.0);
        self.inner.insert(key, Level { value: value.clamp(0.0, max), max });
    }

    pub fn get(&self, key: &K) -> Option<f64> {
        self.inner.get(key).map(|l| l.value)
    }

    pub fn level(&self, key: &K) -> Option<Level> {
        self.inner.get(key).copied()
    }

    /// Overwrite the value of a tracked key, clamped.  Returns `false` if the
    /// key is not tracked.
    pub fn set(&mut self, key: &K, value: f64) -> bool {
        match self.inner.get_mut(key) {
            Some(l) => {
                l.value = value.clamp(0.0, l.max);
                true
            }
            None => false,
        }
    }

    /// Add `amount` (may be negative) and clamp to `[0, max]`.
    ///
    /// Returns the delta actually applied, or `None` if `key` is untracked.
    pub fn increase(&mut self, key: &K, amount: f64) -> Option<f64> {
        let l = self.inner.get_mut(key)?;
        let before = l.value;
        l.value = (l.value + amount).clamp(0.0, l.max);
        Some(l.value - before)
    }

    /// `true` if `key` is tracked and at its ceiling.
    pub fn is_full(&self, key: &K) -> bool {
        self.inner.get(key).is_some_and(Level::is_full)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Level)> {
        self.inner.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.inner.keys()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
