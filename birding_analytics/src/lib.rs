pub mod builder;
mod config;
pub mod manual;
pub mod session;
pub mod states;

use deunicode::deunicode;
use log::{debug, info};

use std::cmp::Ordering;
use std::collections::BTreeSet;

pub use crate::builder::TOP_DATES_PER_COUNTY;
pub use crate::config::*;
pub use crate::session::Session;
pub use crate::states::normalize_state;

/// Groups the sightings by state, county and date and ranks the best dates of
/// every county.
///
/// Arguments:
/// * `rows` the sightings, in the order of the export. Rows without a county
/// are dropped and counted in `Tally::rows_skipped`.
///
/// An empty input gives an empty tally.
pub fn tally_sightings(rows: &[Sighting]) -> Tally {
    info!("tally_sightings: processing {:?} rows", rows.len());
    let mut builder = builder::Builder::new();
    for row in rows.iter() {
        builder.add_sighting(row);
    }
    let tally = builder.build();
    info!(
        "tally_sightings: {:?} counties, {:?} rows skipped",
        tally.rankings.len(),
        tally.rows_skipped
    );
    tally
}

/// Compares county names the way a person would sort them. Names are first
/// compared without accents or letter case, then accented letters come after
/// plain ones, then lowercase comes before uppercase.
pub fn compare_counties(a: &str, b: &str) -> Ordering {
    let base = |s: &str| deunicode(s).to_lowercase();
    let case = |s: &str| s.chars().map(|c| c.is_uppercase()).collect::<Vec<bool>>();
    base(a)
        .cmp(&base(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| case(a).cmp(&case(b)))
        .then_with(|| a.cmp(b))
}

/// The display order of two rankings for a sort mode.
pub fn compare_rankings(a: &CountyRanking, b: &CountyRanking, mode: SortMode) -> Ordering {
    match mode {
        SortMode::County => compare_counties(&a.county, &b.county),
        SortMode::Date => b.top_species_count().cmp(&a.top_species_count()),
    }
}

/// Sorts the rankings in place. The sort is stable.
pub fn sort_rankings(rankings: &mut [CountyRanking], mode: SortMode) {
    debug!("sort_rankings: {:?} rankings by {:?}", rankings.len(), mode);
    rankings.sort_by(|a, b| compare_rankings(a, b, mode));
}

pub fn filter_rankings<'a>(
    rankings: &'a [CountyRanking],
    filter: &RankingFilter,
) -> Vec<&'a CountyRanking> {
    rankings.iter().filter(|r| filter.matches(r)).collect()
}

/// The rankings to display for a given view: filtered first, then sorted.
pub fn visible_rankings<'a>(
    rankings: &'a [CountyRanking],
    view: &ViewState,
) -> Vec<&'a CountyRanking> {
    let mut res = filter_rankings(rankings, &view.filter());
    res.sort_by(|a, b| compare_rankings(a, b, view.sort_by));
    debug!(
        "visible_rankings: {:?} of {:?} rankings visible",
        res.len(),
        rankings.len()
    );
    res
}

/// The choices of the state selector: `All` followed by every state present in
/// the rankings, in alphabetical order.
pub fn state_options(rankings: &[CountyRanking]) -> Vec<StateFilter> {
    let names: BTreeSet<&str> = rankings
        .iter()
        .filter_map(|r| r.state.as_deref())
        .filter(|s| !s.is_empty())
        .collect();
    let mut res = vec![StateFilter::All];
    res.extend(names.iter().map(|s| StateFilter::Named(s.to_string())));
    res
}
