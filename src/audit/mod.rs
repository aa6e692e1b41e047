//! Audit trail for casa-split
//!
//! Every create, update and delete done by the services is appended to
//! `audit.log` as one JSON line with before/after snapshots, so the household
//! can see who changed what and when.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
