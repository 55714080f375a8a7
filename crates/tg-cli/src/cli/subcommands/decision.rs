use clap::{ArgGroup, Subcommand};
use tg_core::audit_detail::SiblingOrder;

use crate::commands::shared::parse::{finite_order, sibling_order};

/// Decision commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DecisionCommands {
    /// Create a decision, as a root or under `--parent`.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        parent: Option<String>,
        #[arg(long, allow_negative_numbers = true, value_parser = finite_order)]
        order: Option<f64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Vec<String>,
        #[arg(long)]
        priority: Vec<String>,
        /// RFC 3339 timestamp.
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        outcome: Option<String>,
        /// JSON object with free-form layout data.
        #[arg(long)]
        position: Option<String>,
    },
    /// Get a decision by ID.
    Get { id: String },
    /// List decisions, newest first.
    List {
        /// Only these IDs.
        #[arg(long = "id")]
        ids: Vec<String>,
    },
    /// Update decision fields. Use `move` to change its position.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Vec<String>,
        #[arg(long)]
        priority: Vec<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        outcome: Option<String>,
        #[arg(long)]
        position: Option<String>,
    },
    /// Delete a decision that has no children.
    Delete { id: String },
    /// Re-parent a decision together with its subtree.
    #[command(group(ArgGroup::new("destination").required(true).args(["parent", "root"])))]
    Move {
        id: String,
        #[arg(long)]
        parent: Option<String>,
        #[arg(long)]
        root: bool,
        #[arg(long, allow_negative_numbers = true, value_parser = finite_order)]
        order: f64,
    },
    /// Set sibling order: `<id>=<order>` pairs.
    Reorder {
        #[arg(required = true, value_name = "ID=ORDER", value_parser = sibling_order)]
        pairs: Vec<SiblingOrder>,
    },
    /// Every decision of the team, parents first.
    Tree,
    /// Direct children of `--parent`, or the roots.
    Children {
        #[arg(long)]
        parent: Option<String>,
    },
    /// A decision and everything beneath it.
    Subtree { id: String },
}
