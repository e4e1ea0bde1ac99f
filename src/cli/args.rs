use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "oncoview",
    version,
    about = "terminal client for a tumor-classification service",
    long_about = "Oncoview submits tumor-feature measurements to a prediction service, renders the classified result, and manages the stored submission records.\n\nExamples:\n  oncoview --list-records\n  oncoview --predict --username ada --mean-radius 17.99 --mean-perimeter 122.8 --mean-area 1001 --mean-concavity 0.3001 --mean-concave-points 0.1471 --worst-radius 25.38 --worst-perimeter 184.6 --worst-area 2019 --worst-concavity 0.7119 --worst-concave-points 0.2654\n  oncoview --list-records --output records.html\n  oncoview --clear-records --yes\n\nTip: Use ~/.oncoview/config.yml to persist the service URL and output settings."
)]
pub struct CliArgs {
    #[arg(
        short = 'P',
        long = "predict",
        help_heading = "Operations",
        help = "Submit the feature measurements and render the predicted class."
    )]
    pub predict: bool,

    #[arg(
        short = 'l',
        long = "list-records",
        visible_alias = "records",
        help_heading = "Operations",
        help = "Fetch the stored prediction records and render them as a table."
    )]
    pub list_records: bool,

    #[arg(
        short = 'x',
        long = "clear-records",
        help_heading = "Operations",
        help = "Delete every stored record (asks for confirmation first)."
    )]
    pub clear_records: bool,

    #[arg(
        short = 't',
        long = "toggle-theme",
        help_heading = "Operations",
        help = "Flip the persisted visual mode between light and dark."
    )]
    pub toggle_theme: bool,

    #[arg(
        long = "username",
        value_name = "NAME",
        help_heading = "Features",
        help = "Name stored alongside the submission."
    )]
    pub username: Option<String>,

    #[arg(
        long = "mean-radius",
        value_name = "VALUE",
        help_heading = "Features",
        help = "Mean radius measurement."
    )]
    pub mean_radius: Option<String>,

    #[arg(
        long = "mean-perimeter",
        value_name = "VALUE",
        help_heading = "Features",
        help = "Mean perimeter measurement."
    )]
    pub mean_perimeter: Option<String>,

    #[arg(
        long = "mean-area",
        value_name = "VALUE",
        help_heading = "Features",
        help = "Mean area measurement."
    )]
    pub mean_area: Option<String>,

    #[arg(
        long = "mean-concavity",
        value_name = "VALUE",
        help_heading = "Features",
        help = "Mean concavity measurement."
    )]
    pub mean_concavity: Option<String>,

    #[arg(
        long = "mean-concave-points",
        value_name = "VALUE",
        help_heading = "Features",
        help = "Mean concave points measurement."
    )]
    pub mean_concave_points: Option<String>,

    #[arg(
        long = "worst-radius",
        value_name = "VALUE",
        help_heading = "Features",
        help = "Worst radius measurement."
    )]
    pub worst_radius: Option<String>,

    #[arg(
        long = "worst-perimeter",
        value_name = "VALUE",
        help_heading = "Features",
        help = "Worst perimeter measurement."
    )]
    pub worst_perimeter: Option<String>,

    #[arg(
        long = "worst-area",
        value_name = "VALUE",
        help_heading = "Features",
        help = "Worst area measurement."
    )]
    pub worst_area: Option<String>,

    #[arg(
        long = "worst-concavity",
        value_name = "VALUE",
        help_heading = "Features",
        help = "Worst concavity measurement."
    )]
    pub worst_concavity: Option<String>,

    #[arg(
        long = "worst-concave-points",
        value_name = "VALUE",
        help_heading = "Features",
        help = "Worst concave points measurement."
    )]
    pub worst_concave_points: Option<String>,

    #[arg(
        short = 'u',
        long = "base-url",
        value_name = "URL",
        help_heading = "HTTP",
        help = "Base URL of the prediction service."
    )]
    pub base_url: Option<String>,

    #[arg(
        short = 'T',
        long = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Per-request timeout in seconds."
    )]
    pub timeout: Option<usize>,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the record table to a file instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Record table format (text, json or html)."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'n',
        long = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.oncoview/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'y',
        long = "yes",
        help_heading = "Input",
        help = "Skip the clear-records confirmation prompt."
    )]
    pub assume_yes: bool,
}
