//! # qval-core
//!
//! Core types and error types for qval, the analytical-method validation tracker.
//!
//! This crate provides the foundational types shared across all qval crates:
//! - Status enums, including the single workflow order and its transitions
//! - Entity structs for projects, validation step records and audit entries
//! - Stage submission payloads and stored measurement sets
//! - Acceptance criteria with their ICH Q2 defaults
//! - Cross-cutting error types
//! - Audit detail sub-types and response shapes

pub mod audit_detail;
pub mod criteria;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
pub mod submissions;
