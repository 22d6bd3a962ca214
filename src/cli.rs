use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::types::{StoryState, StoryType};

#[derive(Parser)]
#[command(name = "tracker")]
#[command(about = "A CLI for the Tracker project-tracking API", version)]
#[command(after_help = "EXAMPLES:
    tracker projects                       List configured projects
    tracker project --project website      Show project details
    tracker story add -n \"Fix login\" --type bug --label urgent
    tracker story delete 1234567")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Print raw API responses and error chains
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List projects defined in the config file
    #[command(after_help = "EXAMPLES:
    tracker projects
    tracker projects --json")]
    Projects,
    /// Show project details
    #[command(after_help = "EXAMPLES:
    tracker project
    tracker project --project website
    tracker project --project-id 42")]
    Project(ProjectArgs),
    /// Manage stories
    #[command(after_help = "EXAMPLES:
    tracker story add -n \"Fix login\" --requested-by Alice
    tracker story delete 1234567 --project website")]
    Story {
        #[command(subcommand)]
        action: StoryCommands,
    },
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    tracker completions bash > ~/.bash_completion.d/tracker
    tracker completions zsh > ~/.zfunc/_tracker")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    tracker init")]
    Init,
}

#[derive(Subcommand)]
pub enum StoryCommands {
    /// Create a new story
    #[command(after_help = "EXAMPLES:
    tracker story add -n \"Fix login\" --type bug --state unstarted
    tracker story add -n \"Checkout flow\" --estimate 3 --label urgent --label ui
    tracker story add -n \"Spike\" --field note=\"see ticket 99\"")]
    Add(StoryAddArgs),
    /// Delete a story
    #[command(after_help = "EXAMPLES:
    tracker story delete 1234567
    tracker story delete 1234567 --project website")]
    Delete(StoryDeleteArgs),
}

#[derive(Args, Clone)]
pub struct ProjectArgs {
    /// Project name as configured in the Projects section
    #[arg(long)]
    pub project: Option<String>,

    /// Numeric project ID (takes precedence over --project)
    #[arg(long)]
    pub project_id: Option<String>,
}

#[derive(Args)]
pub struct StoryAddArgs {
    #[command(flatten)]
    pub target: ProjectArgs,

    /// Story name
    #[arg(long, short)]
    pub name: String,

    /// Requesting user (defaults to General.Me from config)
    #[arg(long)]
    pub requested_by: Option<String>,

    /// Story description
    #[arg(long, short)]
    pub description: Option<String>,

    /// Point estimate
    #[arg(long, short)]
    pub estimate: Option<i32>,

    /// Label to apply (repeatable)
    #[arg(long = "label")]
    pub labels: Vec<String>,

    /// Creation timestamp to record
    #[arg(long)]
    pub created_at: Option<String>,

    /// Story type
    #[arg(long = "type", value_enum)]
    pub story_type: Option<StoryType>,

    /// Initial workflow state
    #[arg(long = "state", value_enum)]
    pub current_state: Option<StoryState>,

    /// Note to attach
    #[arg(long)]
    pub note: Option<String>,

    /// Extra field as KEY=VALUE (repeatable); keys are checked against the
    /// service's field allow-list
    #[arg(long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,
}

#[derive(Args)]
pub struct StoryDeleteArgs {
    /// Numeric story ID
    pub story_id: String,

    #[command(flatten)]
    pub target: ProjectArgs,
}
