use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "council", bin_name = "council", version)]
#[command(about = "Admin panel for the municipal council website", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Operator name (signs in to the admin panel)
    #[arg(long, global = true, help_heading = "Options")]
    pub operator: Option<String>,

    /// Directory holding council.json
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text, help_heading = "Options")]
    pub output: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the records of a collection
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Collection name (news, gallery, tenders, forms, pages, users, components)
        collection: String,

        /// Show only records whose filter field has this value ("all" shows everything)
        #[arg(short, long, default_value = "all")]
        filter: String,
    },

    /// Show one record and the actions available for it
    #[command(alias = "v", display_order = 2)]
    Show { collection: String, id: String },

    /// Add a record from field=value pairs
    #[command(alias = "n", display_order = 3)]
    Add {
        collection: String,

        /// Field values, e.g. title="Budget Meeting"
        #[arg(num_args = 0..)]
        fields: Vec<String>,
    },

    /// Edit a record with field=value pairs
    #[command(alias = "e", display_order = 4)]
    Edit {
        collection: String,
        id: String,

        /// Field values to change
        #[arg(required = true, num_args = 1..)]
        fields: Vec<String>,
    },

    /// Delete a record (asks for confirmation)
    #[command(alias = "rm", display_order = 5)]
    Delete {
        collection: String,
        id: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Change a record's status (toggles when no target is given)
    #[command(display_order = 6)]
    Status {
        collection: String,
        id: String,

        /// Target status, e.g. active or closed
        target: Option<String>,
    },

    /// Show or change site settings
    #[command(display_order = 7)]
    Settings {
        /// Settings tab (general, contact, social, notifications, appearance)
        section: Option<String>,

        /// Setting name within the tab
        field: Option<String>,

        /// New value (saves immediately)
        value: Option<String>,
    },

    /// Totals per collection and recent activity
    #[command(display_order = 8)]
    Dashboard {
        /// Number of activity entries to show
        #[arg(long, default_value_t = 5)]
        recent: usize,
    },

    /// Interactive admin session
    #[command(display_order = 9)]
    Shell,
}
