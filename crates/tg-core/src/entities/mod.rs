//! Entity structs for the Thinkgraph collections.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and schema
//! validation. Every collection record carries the same tenancy and
//! bookkeeping columns: `team_id`, `owner`, `created_by`, `updated_by`,
//! `created_at`, `updated_at`.

mod audit;
mod criterion;
mod decision;
mod evaluation;
mod note;
mod option;

pub use audit::AuditEntry;
pub use criterion::Criterion;
pub use decision::Decision;
pub use evaluation::Evaluation;
pub use note::Note;
pub use option::DecisionOption;
