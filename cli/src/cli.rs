use std::path::PathBuf;

/// LAU population interpolation CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "laupop", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Estimate LAU populations for a country and summarize them by degree of urbanisation
    Interpolate(InterpolateArgs),

    /// List supported country codes and their planar projections
    Projections,
}

#[derive(clap::Args, Debug)]
pub struct InterpolateArgs {
    /// Country code: GB, ES, IT, DE, FR, NL, or EU for all of them
    pub country: String,

    /// Input data directory, defaults to $DATA_PATH or "covid_emo_top_loc/"
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub data_path: Option<PathBuf>,

    /// Chart output directory, defaults to $GRAPH_PATH or "graphs/"
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub graph_path: Option<PathBuf>,

    /// Render the summary chart and write the SVG to stdout (the summary goes to stderr)
    #[arg(long)]
    pub plot: bool,

    /// Save the summary chart to the graph directory (implies --plot)
    #[arg(long)]
    pub save: bool,

    /// Write per-LAU population estimates to this CSV file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub units_csv: Option<PathBuf>,

    /// Write the summary table to this CSV file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub summary_csv: Option<PathBuf>,

    /// Print the summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// LAU id attribute
    #[arg(long, default_value = "OBJECTID")]
    pub admin_id_field: String,

    /// Grid cell id attribute
    #[arg(long, default_value = "OBJECTID")]
    pub grid_id_field: String,

    /// Grid population attribute
    #[arg(long, default_value = "TOT_P_2018")]
    pub population_field: String,
}
