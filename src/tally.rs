use log::{debug, info, warn};

use birding_analytics::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod report;

use crate::args::Args;
use crate::tally::config_reader::*;
use crate::tally::io_common::{is_declared_csv, simplify_file_name};
use crate::tally::io_csv::read_csv_sightings;
use crate::tally::report::{build_summary_js, render_text, ABOUT_TEXT};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TallyError {
    #[snafu(display(
        "{path} is not a CSV file. Please refresh and try again with an eBird CSV export."
    ))]
    NotCsv { path: String },
    #[snafu(display(
        "No results found in {path}. This file does not look like a valid eBird export."
    ))]
    NoResults { path: String },
    #[snafu(display("No input file: use --input or set filePath in the configuration"))]
    MissingInput {},
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading the header of {path}"))]
    CsvHeader { source: csv::Error, path: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("The configuration file {path} has no parent directory"))]
    MissingParentDir { path: String },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid view settings: {source}"))]
    InvalidView { source: AnalyticsError },
    #[snafu(display("Difference detected between calculated summary and reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TallyResult<T> = Result<T, TallyError>;
pub type BTallyResult<T> = Result<T, Box<TallyError>>;

/// Everything needed for one run, after merging the configuration file and the
/// command line.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct TallySettings {
    pub output: OutputSettings,
    pub source: FileSource,
    pub view: ViewSettings,
    pub out: Option<String>,
    pub reference: Option<String>,
}

pub fn resolve_settings(args: &Args) -> BTallyResult<TallySettings> {
    let config = match args.config.as_deref() {
        Some(config_path) => {
            info!("Reading configuration {:?}", config_path);
            read_config(config_path)?
        }
        None => TallyConfig::default(),
    };

    // The command line takes precedence over the configuration.
    let mut source = config.file_source;
    if args.input.is_some() {
        source.file_path = args.input.clone();
    }
    if args.input_type.is_some() {
        source.input_type = args.input_type.clone();
    }
    let mut view = config.view;
    if args.view.is_some() {
        view.current_view = args.view.clone();
    }
    if args.sort.is_some() {
        view.sort_by = args.sort.clone();
    }
    if args.search.is_some() {
        view.search_term = args.search.clone();
    }
    if args.state.is_some() {
        view.selected_state = args.state.clone();
    }

    let settings = TallySettings {
        output: config.output_settings,
        source,
        view,
        out: args.out.clone(),
        reference: args.reference.clone(),
    };
    debug!("resolve_settings: {:?}", settings);
    Ok(settings)
}

/// Reads one export into a fresh session. Returns the session and the number
/// of lines that could not be decoded.
pub fn load_session(source: &FileSource) -> BTallyResult<(Session, usize)> {
    source.check_provider()?;
    let path = source.file_path.clone().context(MissingInputSnafu {})?;
    if !is_declared_csv(&path, source.input_type.as_deref()) {
        return Err(Box::new(TallyError::NotCsv { path }));
    }

    info!("Attempting to read sighting file {:?}", path);
    let sightings = read_csv_sightings(&path, source)?;

    let mut session = Session::new();
    let num_counties = session
        .load(&simplify_file_name(&path), &sightings.rows)
        .rankings
        .len();
    if num_counties == 0 {
        return Err(Box::new(TallyError::NoResults { path }));
    }
    info!("Found {} counties in {:?}", num_counties, path);
    Ok((session, sightings.malformed))
}

fn write_summary(out: &str, output: &OutputSettings, contents: &str) -> BTallyResult<()> {
    if out == "stdout" {
        println!("{}", contents);
        return Ok(());
    }
    let p: PathBuf = match output.output_directory.as_deref() {
        Some(dir) if Path::new(out).is_relative() => [dir, out].iter().collect(),
        _ => PathBuf::from(out),
    };
    let p2 = p.as_path().display().to_string();
    info!("Writing summary to {:?}", p2);
    fs::write(&p, contents).context(WritingSummarySnafu { path: p2 })?;
    Ok(())
}

fn check_reference(reference_path: &str, summary: &JSValue) -> BTallyResult<()> {
    let summary_ref = read_summary(reference_path)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    let pretty_js_stats = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(
            pretty_js_summary_ref.as_str(),
            pretty_js_stats.as_ref(),
            "\n",
        );
        return Err(Box::new(TallyError::ReferenceMismatch {
            path: reference_path.to_string(),
        }));
    }
    info!("The summary matches the reference {:?}", reference_path);
    Ok(())
}

pub fn run(args: &Args) -> BTallyResult<()> {
    let settings = resolve_settings(args)?;

    // The about page does not need any data.
    if settings.view.view()? == Some(View::About) && settings.source.file_path.is_none() {
        print!("{}", ABOUT_TEXT);
        return Ok(());
    }

    let (mut session, malformed) = load_session(&settings.source)?;
    settings.view.apply(&mut session.view)?;
    debug!("run: view: {:?}", session.view);

    let summary = build_summary_js(&settings.output, &session, malformed);

    match settings.out.as_deref() {
        Some(out) => {
            let pretty_js_stats =
                serde_json::to_string_pretty(&summary).context(ParsingJsonSnafu {})?;
            write_summary(out, &settings.output, &pretty_js_stats)?;
        }
        None => print!("{}", render_text(&session)),
    }

    if let Some(reference_path) = settings.reference.as_deref() {
        check_reference(reference_path, &summary)?;
    }
    Ok(())
}
