use clap::Subcommand;

/// Criteria commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CriteriaCommands {
    /// Add a criterion to a decision.
    Create {
        #[arg(long)]
        decision: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        order: Option<i64>,
    },
    /// Get a criterion by ID.
    Get { id: String },
    /// List criteria, newest first, or those of `--decision` in order.
    List {
        #[arg(long)]
        decision: Option<String>,
        #[arg(long = "id")]
        ids: Vec<String>,
    },
    /// Update a criterion.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        order: Option<i64>,
    },
    /// Delete a criterion.
    Delete { id: String },
}
