use crate::{Error, Filter, Granularity, LocationRecord, RecordId, Result};
use ahash::AHashMap;

/// An immutable collection of location records of one granularity
///
/// Records keep their load order, which is the tie-break order used
/// when ranking. The pool is never mutated after construction, so a
/// single instance can be shared by reference across threads.
#[derive(Debug, Clone)]
pub struct CandidatePool {
    granularity: Granularity,
    records: Vec<LocationRecord>,
    index: AHashMap<RecordId, usize>,
}

impl CandidatePool {
    pub fn new(granularity: Granularity, records: Vec<LocationRecord>) -> Result<Self> {
        let mut index = AHashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.id.clone(), position).is_some() {
                return Err(Error::DuplicateRecord(record.id.to_string()));
            }
        }

        Ok(Self {
            granularity,
            records,
            index,
        })
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocationRecord> {
        self.records.iter()
    }

    /// Look up a record by identifier
    pub fn get(&self, id: &RecordId) -> Result<&LocationRecord> {
        self.index
            .get(id)
            .map(|&position| &self.records[position])
            .ok_or_else(|| Error::RecordNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.index.contains_key(id)
    }

    /// Records matching the filter, in pool order
    pub fn filtered<'a, F: Filter + ?Sized>(&'a self, filter: &'a F) -> impl Iterator<Item = &'a LocationRecord> + 'a {
        self.records.iter().filter(move |record| filter.matches(record))
    }

    /// Sorted, de-duplicated long state names present in the pool
    pub fn states(&self) -> Vec<&str> {
        let mut states: Vec<&str> = self.records.iter().map(|r| r.state.as_str()).collect();
        states.sort_unstable();
        states.dedup();
        states
    }
}
