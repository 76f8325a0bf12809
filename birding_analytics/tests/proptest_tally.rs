use birding_analytics::*;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

// Small alphabets so that groups and duplicates actually happen.
fn arb_sighting() -> impl Strategy<Value = Sighting> {
    (
        prop::option::of(prop_oneof![
            Just("US-TX".to_string()),
            Just("US-OR".to_string()),
            Just("CA-ON".to_string()),
        ]),
        prop::option::of(prop_oneof![
            Just("".to_string()),
            Just("Travis".to_string()),
            Just("Lane".to_string()),
            Just("Kent".to_string()),
        ]),
        prop::option::of((1u32..6).prop_map(|d| format!("2024-01-0{}", d))),
        prop::option::of((0u32..8).prop_map(|s| s.to_string())),
    )
        .prop_map(|(state, county, date, species)| Sighting {
            state,
            county,
            date,
            species,
        })
}

proptest! {
    /// Property: every county keeps at most three dates, best first
    #[test]
    fn prop_top_three_sorted(rows in prop::collection::vec(arb_sighting(), 0..200)) {
        let tally = tally_sightings(&rows);
        for r in tally.rankings.iter() {
            prop_assert!(!r.dates.is_empty());
            prop_assert!(r.dates.len() <= TOP_DATES_PER_COUNTY);
            for w in r.dates.windows(2) {
                prop_assert!(w[0].species_count >= w[1].species_count);
            }
        }
    }

    /// Property: counts are the number of distinct species, never the number of rows
    #[test]
    fn prop_counts_are_distinct_species(rows in prop::collection::vec(arb_sighting(), 0..200)) {
        let mut expected: HashMap<(Option<String>, String, String), HashSet<Option<String>>> =
            HashMap::new();
        for row in rows.iter() {
            if let Some(county) = row.county.clone().filter(|c| !c.is_empty()) {
                let key = (
                    normalize_state(row.state.as_deref()),
                    county,
                    row.date.clone().unwrap_or_default(),
                );
                expected.entry(key).or_default().insert(row.species.clone());
            }
        }
        let tally = tally_sightings(&rows);
        for r in tally.rankings.iter() {
            for dc in r.dates.iter() {
                let key = (r.state.clone(), r.county.clone(), dc.date.clone());
                prop_assert_eq!(Some(dc.species_count), expected.get(&key).map(|s| s.len()));
            }
        }
    }

    /// Property: rows without a county never show up
    #[test]
    fn prop_rows_without_county_are_dropped(rows in prop::collection::vec(arb_sighting(), 0..100)) {
        let kept: Vec<Sighting> = rows
            .iter()
            .filter(|r| r.county.as_deref().map(|c| !c.is_empty()).unwrap_or(false))
            .cloned()
            .collect();
        let all = tally_sightings(&rows);
        let only_kept = tally_sightings(&kept);
        prop_assert_eq!(&all.rankings, &only_kept.rankings);
        prop_assert_eq!(all.rows_skipped, rows.len() - kept.len());
        prop_assert!(all.rankings.iter().all(|r| !r.county.is_empty()));
    }

    /// Property: the date sort orders counties by their best day
    #[test]
    fn prop_date_sort_is_descending(rows in prop::collection::vec(arb_sighting(), 0..200)) {
        let mut rankings = tally_sightings(&rows).rankings;
        sort_rankings(&mut rankings, SortMode::Date);
        for w in rankings.windows(2) {
            prop_assert!(w[0].top_species_count() >= w[1].top_species_count());
        }
    }

    /// Property: the county sort is ascending
    #[test]
    fn prop_county_sort_is_ascending(rows in prop::collection::vec(arb_sighting(), 0..200)) {
        let mut rankings = tally_sightings(&rows).rankings;
        sort_rankings(&mut rankings, SortMode::County);
        for w in rankings.windows(2) {
            prop_assert!(compare_counties(&w[0].county, &w[1].county) != std::cmp::Ordering::Greater);
        }
    }
}
