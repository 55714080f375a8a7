use clap::Subcommand;

/// Evaluation commands.
#[derive(Clone, Debug, Subcommand)]
pub enum EvaluationCommands {
    /// Score an option against a criterion.
    Create {
        #[arg(long)]
        decision: String,
        #[arg(long)]
        option: String,
        #[arg(long)]
        criteria: String,
        #[arg(long, allow_negative_numbers = true)]
        score: i64,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Get an evaluation by ID.
    Get { id: String },
    /// List evaluations, newest first, or those of `--decision`.
    List {
        #[arg(long)]
        decision: Option<String>,
        #[arg(long = "id")]
        ids: Vec<String>,
    },
    /// Update score or notes.
    Update {
        id: String,
        #[arg(long, allow_negative_numbers = true)]
        score: Option<i64>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete an evaluation.
    Delete { id: String },
}
