//! # tg-core
//!
//! Core types shared across all Thinkgraph crates:
//! - Entity structs for the five collections (decisions, options, criteria,
//!   evaluations, notes) plus audit entries
//! - Entity, audit action, and trail operation enums
//! - ID prefix constants
//! - Materialized-path math for the decision tree
//! - Cross-cutting error types
//! - Trail operation envelope for JSONL persistence

pub mod audit_detail;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod path;
pub mod trail;
