//! Input types for entity creation and partial update.
//!
//! `New*` structs carry the caller-supplied fields of a record; tenancy,
//! ownership, ids and timestamps are filled in by the service. Update
//! builders produce structs with `Option` fields: only `Some` fields generate
//! SET clauses in the dynamic UPDATE SQL, and `Option<Option<T>>` fields use
//! `Some(None)` to clear a nullable column. The update struct is serialized
//! as the audit detail and trail `data` payload (changed fields only).

pub mod criteria;
pub mod decision;
pub mod evaluation;
pub mod note;
pub mod option;
