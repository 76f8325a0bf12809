// ********* Input data structures ***********

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// One row of a sighting export, as handed over by the readers.
///
/// All the fields are optional: exports are frequently incomplete and the
/// aggregation decides what to do with the missing values.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sighting {
    /// The region code (`US-TX`) or the full name of the state.
    pub state: Option<String>,
    pub county: Option<String>,
    /// The observation date, usually `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Identifies one taxonomic unit. eBird exports use the taxonomic order.
    pub species: Option<String>,
}

impl Sighting {
    pub fn new(state: &str, county: &str, date: &str, species: &str) -> Sighting {
        Sighting {
            state: Some(state.to_string()),
            county: Some(county.to_string()),
            date: Some(date.to_string()),
            species: Some(species.to_string()),
        }
    }
}

// ******** Output data structures *********

/// Number of distinct species seen on one date.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DateCount {
    pub date: String,
    #[serde(rename = "speciesCount")]
    pub species_count: usize,
}

/// The best dates of one county.
///
/// Invariant: `dates` is never empty, holds at most `TOP_DATES_PER_COUNTY`
/// entries and is sorted by decreasing species count.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CountyRanking {
    pub state: Option<String>,
    pub county: String,
    pub dates: Vec<DateCount>,
}

impl CountyRanking {
    /// The species count of the best date of this county.
    pub fn top_species_count(&self) -> usize {
        self.dates.first().map(|dc| dc.species_count).unwrap_or(0)
    }

    pub fn top_date(&self) -> Option<&DateCount> {
        self.dates.first()
    }
}

/// The outcome of one aggregation pass.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tally {
    pub rankings: Vec<CountyRanking>,
    #[serde(rename = "rowsRead")]
    pub rows_read: usize,
    /// Rows that were dropped because they did not name a county.
    #[serde(rename = "rowsSkipped")]
    pub rows_skipped: usize,
}

/// Errors raised when interpreting user choices.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AnalyticsError {
    UnknownSortMode(String),
    UnknownView(String),
}

impl Error for AnalyticsError {}

impl Display for AnalyticsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyticsError::UnknownSortMode(s) => {
                write!(f, "unknown sort mode {:?} (expected 'county' or 'date')", s)
            }
            AnalyticsError::UnknownView(s) => {
                write!(
                    f,
                    "unknown view {:?} (expected 'upload', 'analytics' or 'about')",
                    s
                )
            }
        }
    }
}

// ********* View configuration **********

/// How the list of counties is ordered.
///
/// - County: alphabetical order of the county names.
/// - Date: counties with the best single day first. This ranks the counties by
/// their top date, it does not interleave the dates of different counties.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    County,
    Date,
}

impl Default for SortMode {
    fn default() -> Self {
        SortMode::County
    }
}

impl FromStr for SortMode {
    type Err = AnalyticsError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "county" => Ok(SortMode::County),
            "date" => Ok(SortMode::Date),
            x => Err(AnalyticsError::UnknownSortMode(x.to_string())),
        }
    }
}

/// The value of the state selector. `All` disables the state filter.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StateFilter {
    All,
    Named(String),
}

impl StateFilter {
    /// The text form of `All`. Reading a selector from text (config, command
    /// line, JSON) maps this label to `All`, so a state literally named "All"
    /// can only be selected with `StateFilter::Named`, as `state_options`
    /// returns it.
    pub const ALL_LABEL: &'static str = "All";

    pub fn accepts(&self, state: Option<&str>) -> bool {
        match self {
            StateFilter::All => true,
            StateFilter::Named(name) => state == Some(name.as_str()),
        }
    }
}

impl Default for StateFilter {
    fn default() -> Self {
        StateFilter::All
    }
}

impl From<String> for StateFilter {
    fn from(s: String) -> Self {
        if s.is_empty() || s == StateFilter::ALL_LABEL {
            StateFilter::All
        } else {
            StateFilter::Named(s)
        }
    }
}

impl From<StateFilter> for String {
    fn from(sf: StateFilter) -> Self {
        match sf {
            StateFilter::All => StateFilter::ALL_LABEL.to_string(),
            StateFilter::Named(s) => s,
        }
    }
}

impl Display for StateFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateFilter::All => write!(f, "All States"),
            StateFilter::Named(s) => write!(f, "{}", s),
        }
    }
}

/// The pages of the application.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Upload,
    Analytics,
    About,
}

impl Default for View {
    fn default() -> Self {
        View::Upload
    }
}

impl FromStr for View {
    type Err = AnalyticsError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upload" => Ok(View::Upload),
            "analytics" => Ok(View::Analytics),
            "about" => Ok(View::About),
            x => Err(AnalyticsError::UnknownView(x.to_string())),
        }
    }
}

/// Everything the user can change on screen.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewState {
    #[serde(rename = "currentView")]
    pub current_view: View,
    #[serde(rename = "sortBy")]
    pub sort_by: SortMode,
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    #[serde(rename = "selectedState")]
    pub selected_state: StateFilter,
}

impl ViewState {
    pub fn filter(&self) -> RankingFilter {
        RankingFilter {
            search_term: self.search_term.clone(),
            state: self.selected_state.clone(),
        }
    }
}

/// Selects the rankings shown to the user.
///
/// The search term is matched (case-insensitive substring) against the county
/// name only. The state filter, when not `All`, must match exactly.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RankingFilter {
    pub search_term: String,
    pub state: StateFilter,
}

impl RankingFilter {
    pub fn matches(&self, ranking: &CountyRanking) -> bool {
        let search_lower = self.search_term.to_lowercase();
        self.state.accepts(ranking.state.as_deref())
            && ranking.county.to_lowercase().contains(&search_lower)
    }
}
