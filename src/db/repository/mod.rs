//! Repository layer — entity-scoped database operations.
//!
//! These functions realize the persistence interface the form surface and
//! report exporter depend on: load/save patient records and form payloads,
//! the medication catalog, and the current acting user.

pub mod catalog;
pub mod form_data;
pub mod patient;
pub mod user;
