use clap::Parser;

/// This program finds the best birding days of every county in an eBird export.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The eBird sighting export to analyze. Setting this option overrides the file
    /// that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default: the file extension) The declared type of the input. Only 'csv' is accepted.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (file path, optional) A JSON file with the input, output and view settings.
    /// For more information about the file format, read the manual of birding_analytics.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the analysis will be written in JSON
    /// format to the given location instead of the text report.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, birdtally will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// ('county' or 'date') How to order the counties.
    #[clap(long, value_parser)]
    pub sort: Option<String>,

    /// Only show the counties whose name contains this text (case-insensitive).
    #[clap(long, value_parser)]
    pub search: Option<String>,

    /// Only show the counties of this state (full name, for example 'Texas'). 'All' shows every state.
    #[clap(long, value_parser)]
    pub state: Option<String>,

    /// ('analytics', 'upload' or 'about') The page to display.
    #[clap(long, value_parser)]
    pub view: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
