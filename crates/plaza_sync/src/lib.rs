//! # Plaza Sync
//!
//! Offline action synchronization for the Plaza SDK.
//!
//! This crate provides:
//! - The [`Synchronizer`] pass loop over registered [`SyncProducer`]s
//! - The [`SyncAction`] contract caches implement for their queued items
//! - [`SyncHandler`] for process-wide pass serialization
//! - [`SyncScheduler`] for channel-driven background triggering
//! - The rejected-vs-transient error taxonomy ([`SyncError`])
//!
//! ## Model
//!
//! User actions performed while offline are queued by their owning caches.
//! On every pass the synchronizer visits each registered producer in
//! registration order, offers every pending action to the network, and lets
//! the owning cache discard confirmed actions. Failures are logged and
//! swallowed per action; unconfirmed actions simply stay queued for the
//! next pass.
//!
//! ## Key invariants
//!
//! - Producers are visited in registration order
//! - One failing action never aborts the pass
//! - `on_success` runs exactly when `synchronize` succeeded
//! - At most one pass runs at a time (enforced by [`SyncHandler`])

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod action;
mod error;
mod handler;
mod scheduler;
mod state;
mod synchronizer;

pub use action::{SyncAction, SyncProducer};
pub use error::{SyncError, SyncResult};
pub use handler::SyncHandler;
pub use scheduler::SyncScheduler;
pub use state::{PassResult, SyncState, SyncStats};
pub use synchronizer::Synchronizer;
