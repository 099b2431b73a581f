// Record filters applied to a candidate pool before ranking
use ahash::AHashSet;
use crate::LocationRecord;

pub trait Filter {
    fn matches(&self, record: &LocationRecord) -> bool;
}

/// Keeps records whose long state name is in the set.
/// An empty set keeps everything.
#[derive(Debug, Clone, Default)]
pub struct StateFilter {
    states: AHashSet<String>,
}

impl StateFilter {
    pub fn new<I, S>(states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            states: states.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl Filter for StateFilter {
    fn matches(&self, record: &LocationRecord) -> bool {
        self.states.is_empty() || self.states.contains(&record.state)
    }
}
