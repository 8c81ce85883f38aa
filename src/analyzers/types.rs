//! Data types produced by aggregation and tiering.

use serde::Serialize;

/// One group of the ranking: a key and its summed measure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateEntry {
    pub key: String,
    pub total: f64,
}

impl AggregateEntry {
    pub fn new(key: impl Into<String>, total: f64) -> Self {
        Self {
            key: key.into(),
            total,
        }
    }
}

/// Position of a tier within the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tier {
    Top,
    Middle,
    Bottom,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Top, Tier::Middle, Tier::Bottom];
}

/// A ranking split into three contiguous partitions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tiers<T> {
    pub top: Vec<T>,
    pub middle: Vec<T>,
    pub bottom: Vec<T>,
}

impl<T> Tiers<T> {
    pub fn get(&self, tier: Tier) -> &[T] {
        match tier {
            Tier::Top => &self.top,
            Tier::Middle => &self.middle,
            Tier::Bottom => &self.bottom,
        }
    }

    pub fn len(&self) -> usize {
        self.top.len() + self.middle.len() + self.bottom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
