//! Core types and logic for the Campus records dashboard.
//!
//! This crate is deliberately free of HTTP and terminal dependencies. It
//! holds the record types exchanged with the upstream data service, the
//! in-memory [`RecordStore`](record::RecordStore) with its filtered view,
//! student form validation, and the statistics aggregator.

pub mod aggregate;
pub mod course;
pub mod error;
pub mod filter;
pub mod record;
pub mod service;
pub mod stats;
pub mod student;
pub mod validate;

pub use error::ValidationError;
