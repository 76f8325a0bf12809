pub use crate::config::*;
use crate::states::normalize_state;

use log::debug;
use std::collections::{HashMap, HashSet};

/// The number of dates kept for each county.
pub const TOP_DATES_PER_COUNTY: usize = 3;

#[derive(Eq, PartialEq, Debug, Clone, Hash)]
struct CountyKey {
    state: Option<String>,
    county: String,
}

// The species seen in one county on one date.
// A missing species value is a value of its own.
#[derive(Eq, PartialEq, Debug, Clone)]
struct DateBucket {
    date: String,
    species: HashSet<Option<String>>,
}

// Buckets are kept in order of first appearance so that ties in the ranking
// follow the input order.
#[derive(Eq, PartialEq, Debug, Clone)]
struct CountyGroup {
    key: CountyKey,
    buckets: Vec<DateBucket>,
    bucket_index: HashMap<String, usize>,
}

impl CountyGroup {
    fn new(key: CountyKey) -> CountyGroup {
        CountyGroup {
            key,
            buckets: Vec::new(),
            bucket_index: HashMap::new(),
        }
    }

    fn insert(&mut self, date: String, species: Option<String>) {
        let idx = match self.bucket_index.get(&date) {
            Some(idx) => *idx,
            None => {
                self.buckets.push(DateBucket {
                    date: date.clone(),
                    species: HashSet::new(),
                });
                self.bucket_index.insert(date, self.buckets.len() - 1);
                self.buckets.len() - 1
            }
        };
        self.buckets[idx].species.insert(species);
    }

    fn ranking(&self) -> CountyRanking {
        let mut dates: Vec<DateCount> = self
            .buckets
            .iter()
            .map(|b| DateCount {
                date: b.date.clone(),
                species_count: b.species.len(),
            })
            .collect();
        // Stable: equal counts stay in input order.
        dates.sort_by(|a, b| b.species_count.cmp(&a.species_count));
        dates.truncate(TOP_DATES_PER_COUNTY);
        CountyRanking {
            state: self.key.state.clone(),
            county: self.key.county.clone(),
            dates,
        }
    }
}

/// Accumulates sightings, one row at a time.
///
/// The builder is the incremental form of `tally_sightings`.
///
/// ```
/// use birding_analytics::builder::Builder;
///
/// let mut builder = Builder::new();
/// builder.add("US-TX", "Travis", "2024-01-01", "1");
/// builder.add("US-TX", "Travis", "2024-01-01", "2");
/// builder.add("US-TX", "Travis", "2024-01-01", "2");
///
/// let tally = builder.build();
/// assert_eq!(tally.rankings[0].state.as_deref(), Some("Texas"));
/// assert_eq!(tally.rankings[0].dates[0].species_count, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    groups: Vec<CountyGroup>,
    group_index: HashMap<CountyKey, usize>,
    rows_read: usize,
    rows_skipped: usize,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Adds a complete sighting.
    pub fn add(&mut self, state: &str, county: &str, date: &str, species: &str) -> bool {
        self.add_sighting(&Sighting::new(state, county, date, species))
    }

    /// Adds a sighting from an export.
    ///
    /// Returns false if the row was dropped because it has no county.
    pub fn add_sighting(&mut self, sighting: &Sighting) -> bool {
        self.rows_read += 1;
        let county = match sighting.county.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => {
                debug!("add_sighting: no county, skipping {:?}", sighting);
                self.rows_skipped += 1;
                return false;
            }
        };
        let key = CountyKey {
            state: normalize_state(sighting.state.as_deref()),
            county: county.to_string(),
        };
        let idx = match self.group_index.get(&key) {
            Some(idx) => *idx,
            None => {
                debug!("add_sighting: new county {:?}", key);
                self.groups.push(CountyGroup::new(key.clone()));
                self.group_index.insert(key, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        let date = sighting.date.clone().unwrap_or_default();
        self.groups[idx].insert(date, sighting.species.clone());
        true
    }

    /// The number of distinct counties seen so far.
    pub fn num_counties(&self) -> usize {
        self.groups.len()
    }

    /// Ranks the dates of every county.
    ///
    /// The rankings come in order of first appearance of each county.
    pub fn build(self) -> Tally {
        let rankings: Vec<CountyRanking> = self.groups.iter().map(|g| g.ranking()).collect();
        Tally {
            rankings,
            rows_read: self.rows_read,
            rows_skipped: self.rows_skipped,
        }
    }
}
