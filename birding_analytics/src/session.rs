//! The state of one browsing session.
//!
//! A session holds at most one loaded export. Loading a new export replaces the
//! previous results entirely; nothing is carried over between uploads.

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::*;
use crate::{state_options, tally_sightings, visible_rankings};

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "fileName")]
    file_name: Option<String>,
    tally: Option<Tally>,
    pub view: ViewState,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    /// Replaces the current results with the tally of the given rows and
    /// switches to the analytics page.
    pub fn load(&mut self, file_name: &str, rows: &[Sighting]) -> &Tally {
        info!("Session: loading {:?} ({} rows)", file_name, rows.len());
        self.file_name = Some(file_name.to_string());
        self.view.current_view = View::Analytics;
        self.tally.insert(tally_sightings(rows))
    }

    /// Forgets the loaded file and everything derived from it.
    pub fn clear(&mut self) {
        info!("Session: removing {:?}", self.file_name);
        self.file_name = None;
        self.tally = None;
        self.view.current_view = View::Upload;
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn tally(&self) -> Option<&Tally> {
        self.tally.as_ref()
    }

    pub fn rankings(&self) -> &[CountyRanking] {
        self.tally
            .as_ref()
            .map(|t| t.rankings.as_slice())
            .unwrap_or(&[])
    }

    /// The rankings to display with the current sort and filters.
    pub fn visible(&self) -> Vec<&CountyRanking> {
        visible_rankings(self.rankings(), &self.view)
    }

    pub fn state_options(&self) -> Vec<StateFilter> {
        state_options(self.rankings())
    }

    pub fn show(&mut self, view: View) {
        self.view.current_view = view;
    }

    pub fn set_sort(&mut self, mode: SortMode) {
        self.view.sort_by = mode;
    }

    pub fn set_search(&mut self, term: &str) {
        self.view.search_term = term.to_string();
    }

    pub fn select_state(&mut self, state: StateFilter) {
        self.view.selected_state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Sighting> {
        vec![
            Sighting::new("US-TX", "Travis", "2024-01-01", "1"),
            Sighting::new("US-TX", "Travis", "2024-01-01", "2"),
            Sighting::new("US-OR", "Lane", "2024-02-01", "1"),
        ]
    }

    #[test]
    fn starts_on_upload_page() {
        let s = Session::new();
        assert_eq!(s.view.current_view, View::Upload);
        assert_eq!(s.view.sort_by, SortMode::County);
        assert_eq!(s.view.selected_state, StateFilter::All);
        assert!(s.rankings().is_empty());
        assert!(s.file_name().is_none());
    }

    #[test]
    fn load_switches_to_analytics() {
        let mut s = Session::new();
        let num_counties = s.load("MyEBirdData.csv", &rows()).rankings.len();
        assert_eq!(num_counties, 2);
        assert_eq!(s.view.current_view, View::Analytics);
        assert_eq!(s.file_name(), Some("MyEBirdData.csv"));
    }

    #[test]
    fn reload_replaces_results() {
        let mut s = Session::new();
        s.load("a.csv", &rows());
        s.load("b.csv", &[Sighting::new("US-ME", "York", "2024-06-01", "9")]);
        assert_eq!(s.rankings().len(), 1);
        assert_eq!(s.rankings()[0].county, "York");
        assert_eq!(s.file_name(), Some("b.csv"));
    }

    #[test]
    fn clear_removes_everything() {
        let mut s = Session::new();
        s.load("a.csv", &rows());
        s.clear();
        assert!(s.rankings().is_empty());
        assert!(s.tally().is_none());
        assert!(s.file_name().is_none());
        assert_eq!(s.view.current_view, View::Upload);
        assert_eq!(s.state_options(), vec![StateFilter::All]);
    }

    #[test]
    fn view_changes_apply_to_visible() {
        let mut s = Session::new();
        s.load("a.csv", &rows());
        s.set_sort(SortMode::Date);
        let names: Vec<&str> = s.visible().iter().map(|r| r.county.as_str()).collect();
        assert_eq!(names, vec!["Travis", "Lane"]);

        s.select_state(StateFilter::Named("Oregon".to_string()));
        assert_eq!(s.visible().len(), 1);

        s.select_state(StateFilter::All);
        s.set_search("xyz");
        assert!(s.visible().is_empty());
    }

    #[test]
    fn view_state_serializes() {
        let mut s = Session::new();
        s.set_sort(SortMode::Date);
        s.set_search("trav");
        let js = serde_json::to_value(&s.view).unwrap();
        assert_eq!(
            js,
            serde_json::json!({
                "currentView": "upload",
                "sortBy": "date",
                "searchTerm": "trav",
                "selectedState": "All"
            })
        );
        let back: ViewState = serde_json::from_value(js).unwrap();
        assert_eq!(back, s.view);
    }
}
