use clap::Subcommand;

/// Option commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OptionCommands {
    /// Add an option to a decision.
    Create {
        #[arg(long)]
        decision: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "pro")]
        pros: Vec<String>,
        #[arg(long = "con")]
        cons: Vec<String>,
        #[arg(long)]
        order: Option<i64>,
    },
    /// Get an option by ID.
    Get { id: String },
    /// List options, newest first, or those of `--decision` in order.
    List {
        #[arg(long)]
        decision: Option<String>,
        #[arg(long = "id")]
        ids: Vec<String>,
    },
    /// Update an option.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "pro")]
        pros: Vec<String>,
        #[arg(long = "con")]
        cons: Vec<String>,
        #[arg(long)]
        order: Option<i64>,
    },
    /// Delete an option.
    Delete { id: String },
}
