//! # Plaza Protocol
//!
//! Wire-level request models for the Plaza social REST API.
//!
//! This crate provides:
//! - [`ActionRequest`] for every user operation the SDK can replay
//! - [`Endpoint`] mapping of each request to an HTTP method and path
//! - Shared vocabulary types ([`ContentType`], [`ReportReason`],
//!   [`RelationshipOperation`])
//!
//! This is a pure protocol crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod action;
mod content;
mod relationship;

pub use action::{ActionRequest, Endpoint, HttpMethod};
pub use content::{ContentType, ReportReason};
pub use relationship::RelationshipOperation;
