// Text and JSON renderings of a session.

use crate::tally::*;

pub const ABOUT_TEXT: &str = "About Birding Analytics

Birding Analytics helps birding enthusiasts and researchers analyze bird species
data across the states and counties of the United States.

Provide an eBird sighting export in CSV format and the program lists, for every
county, the dates with the most distinct species seen.

To get started, run birdtally with --input and the path to your CSV data file.
";

/// `<state> - <county>`, or the county alone when the state is unknown.
pub fn county_heading(r: &CountyRanking) -> String {
    match r.state.as_deref() {
        Some(s) if !s.is_empty() => format!("{} - {}", s, r.county),
        _ => r.county.clone(),
    }
}

pub fn render_text(session: &Session) -> String {
    match session.view.current_view {
        View::About => ABOUT_TEXT.to_string(),
        View::Upload => render_upload(session),
        View::Analytics => render_analytics(session),
    }
}

fn render_upload(session: &Session) -> String {
    let mut out = String::from("Upload CSV File\n\n");
    match session.file_name() {
        Some(f) => out.push_str(&format!("Loaded: {}\n", f)),
        None => out.push_str("Select a CSV file with --input to see the analytics.\n"),
    }
    out
}

fn render_analytics(session: &Session) -> String {
    let visible = session.visible();
    let mut out = String::new();
    out.push_str(&format!(
        "Birding Analytics: {} ({} of {} counties)\n",
        session.file_name().unwrap_or("no file"),
        visible.len(),
        session.rankings().len()
    ));
    if session.view.sort_by == SortMode::County {
        out.push_str(&format!("State: {}\n", session.view.selected_state));
    }
    if !session.view.search_term.is_empty() {
        out.push_str(&format!("Search: {}\n", session.view.search_term));
    }
    out.push('\n');

    if visible.is_empty() {
        out.push_str("No county matches the current filters.\n");
        return out;
    }

    for r in visible.iter() {
        match session.view.sort_by {
            SortMode::County => {
                out.push_str(&format!("{}\n", county_heading(r)));
                for dc in r.dates.iter() {
                    out.push_str(&format!("  {}: {} species\n", dc.date, dc.species_count));
                }
            }
            SortMode::Date => {
                if let Some(dc) = r.top_date() {
                    out.push_str(&format!("{}\n", dc.date));
                    out.push_str(&format!(
                        "  {}: {} species\n",
                        county_heading(r),
                        dc.species_count
                    ));
                }
            }
        }
    }
    out
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    pub report: Option<String>,
    pub file: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: SortMode,
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    #[serde(rename = "selectedState")]
    pub selected_state: StateFilter,
}

/// The JSON summary of the visible rankings, in display order.
pub fn build_summary_js(output: &OutputSettings, session: &Session, malformed: usize) -> JSValue {
    let c = SummaryConfig {
        report: output.report_name.clone(),
        file: session.file_name().map(|s| s.to_string()),
        sort_by: session.view.sort_by,
        search_term: session.view.search_term.clone(),
        selected_state: session.view.selected_state.clone(),
    };
    let (rows_read, rows_skipped) = session
        .tally()
        .map(|t| (t.rows_read, t.rows_skipped))
        .unwrap_or((0, 0));
    json!({
        "config": c,
        "rowsRead": rows_read,
        "rowsSkipped": rows_skipped,
        "rowsMalformed": malformed,
        "states": session.state_options(),
        "results": session.visible(),
    })
}
