mod criteria;
mod decision;
mod evaluation;
mod note;
mod option;

pub use criteria::CriteriaCommands;
pub use decision::DecisionCommands;
pub use evaluation::EvaluationCommands;
pub use note::NoteCommands;
pub use option::OptionCommands;
