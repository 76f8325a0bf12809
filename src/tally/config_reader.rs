use crate::tally::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

// Header names of the eBird "Download My Data" export.
pub const COUNTY_HEADER: &str = "County";
pub const DATE_HEADER: &str = "Date";
pub const SPECIES_HEADER: &str = "Taxonomic Order";
pub const STATE_HEADER: &str = "State/Province";

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "reportName")]
    pub report_name: Option<String>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "inputType")]
    pub input_type: Option<String>,
    #[serde(rename = "countyColumn")]
    pub county_column: Option<String>,
    #[serde(rename = "dateColumn")]
    pub date_column: Option<String>,
    #[serde(rename = "speciesColumn")]
    pub species_column: Option<String>,
    #[serde(rename = "stateColumn")]
    pub state_column: Option<String>,
}

impl FileSource {
    pub fn county_column(&self) -> &str {
        self.county_column.as_deref().unwrap_or(COUNTY_HEADER)
    }

    pub fn date_column(&self) -> &str {
        self.date_column.as_deref().unwrap_or(DATE_HEADER)
    }

    pub fn species_column(&self) -> &str {
        self.species_column.as_deref().unwrap_or(SPECIES_HEADER)
    }

    pub fn state_column(&self) -> &str {
        self.state_column.as_deref().unwrap_or(STATE_HEADER)
    }

    pub fn check_provider(&self) -> TallyResult<()> {
        match self.provider.as_deref() {
            None | Some("ebird") => Ok(()),
            Some(x) => whatever!("Provider not implemented: {:?}", x),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewSettings {
    #[serde(rename = "currentView")]
    pub current_view: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
    #[serde(rename = "selectedState")]
    pub selected_state: Option<String>,
}

impl ViewSettings {
    /// The page requested by the user, if any.
    pub fn view(&self) -> TallyResult<Option<View>> {
        match self.current_view.as_deref() {
            Some(v) => Ok(Some(v.parse::<View>().context(InvalidViewSnafu {})?)),
            None => Ok(None),
        }
    }

    /// Applies these settings on top of a view state.
    pub fn apply(&self, view: &mut ViewState) -> TallyResult<()> {
        if let Some(v) = self.view()? {
            view.current_view = v;
        }
        if let Some(s) = self.sort_by.as_deref() {
            view.sort_by = s.parse::<SortMode>().context(InvalidViewSnafu {})?;
        }
        if let Some(s) = self.search_term.clone() {
            view.search_term = s;
        }
        if let Some(s) = self.selected_state.clone() {
            view.selected_state = StateFilter::from(s);
        }
        Ok(())
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct TallyConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "fileSource", default)]
    pub file_source: FileSource,
    #[serde(default)]
    pub view: ViewSettings,
}

pub fn read_config(path: &str) -> BTallyResult<TallyConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let mut config: TallyConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);

    // The paths in the configuration are relative to the configuration file.
    let root_p = Path::new(path)
        .parent()
        .context(MissingParentDirSnafu { path })?;
    if let Some(fp) = config.file_source.file_path.clone() {
        let p: PathBuf = [root_p, Path::new(&fp)].iter().collect();
        config.file_source.file_path = Some(p.as_path().display().to_string());
    }
    Ok(config)
}

pub fn read_summary(path: &str) -> BTallyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_summary: {:?}", js["results"].as_array().map(|a| a.len()));
    Ok(js)
}
