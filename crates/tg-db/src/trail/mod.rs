//! JSONL trail of committed mutations.
//!
//! One file per team lives in the configured trail directory
//! (`.thinkgraph/trail/` by default).

pub mod writer;
