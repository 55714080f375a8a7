use clap::Subcommand;

/// Note commands.
#[derive(Clone, Debug, Subcommand)]
pub enum NoteCommands {
    /// Attach a note to a record.
    Create {
        /// decision, option, criteria, evaluation or note.
        #[arg(long)]
        entity_type: String,
        #[arg(long)]
        entity_id: String,
        #[arg(long)]
        content: String,
        #[arg(long = "type")]
        note_type: Vec<String>,
    },
    /// Get a note by ID.
    Get { id: String },
    /// List notes, newest first, or those attached to one record.
    List {
        #[arg(long, requires = "entity_id")]
        entity_type: Option<String>,
        #[arg(long, requires = "entity_type")]
        entity_id: Option<String>,
        #[arg(long = "id")]
        ids: Vec<String>,
    },
    /// Update a note.
    Update {
        id: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long = "type")]
        note_type: Vec<String>,
    },
    /// Delete a note.
    Delete { id: String },
}
