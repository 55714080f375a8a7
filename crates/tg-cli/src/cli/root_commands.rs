use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    CriteriaCommands, DecisionCommands, EvaluationCommands, NoteCommands, OptionCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Initialize thinkgraph for a project.
    Init(InitArgs),
    /// Decisions and their tree.
    Decision {
        #[command(subcommand)]
        action: DecisionCommands,
    },
    /// Options of a decision.
    Option {
        #[command(subcommand)]
        action: OptionCommands,
    },
    /// Criteria of a decision.
    Criteria {
        #[command(subcommand)]
        action: CriteriaCommands,
    },
    /// Scores of options against criteria.
    Evaluation {
        #[command(subcommand)]
        action: EvaluationCommands,
    },
    /// Notes on any record.
    Note {
        #[command(subcommand)]
        action: NoteCommands,
    },
    /// View audit trail.
    Audit(AuditArgs),
}

/// Arguments for `tg init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Team written to the project config as `general.default_team`.
    #[arg(long)]
    pub default_team: Option<String>,
    /// User written to the project config as `general.default_user`.
    #[arg(long)]
    pub default_user: Option<String>,
    /// Overwrite an existing project config.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `tg audit`.
#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    #[arg(long)]
    pub entity_type: Option<String>,
    #[arg(long)]
    pub entity_id: Option<String>,
    #[arg(long)]
    pub action: Option<String>,
}
