//! # Plaza Store
//!
//! Local pending-action queues for the Plaza SDK.
//!
//! This crate provides:
//! - [`PendingQueue`] for actions awaiting server confirmation
//! - In-memory and file-backed (JSON lines) queue variants
//! - [`Record`]/[`RecordId`] bookkeeping types
//!
//! Queues are opaque to the rest of the SDK: higher layers enqueue typed
//! records, snapshot them for synchronization, and remove them once the
//! server confirmed the action.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod queue;

pub use error::{StoreError, StoreResult};
pub use queue::{PendingQueue, Record, RecordId};
