//! # Plaza Testkit
//!
//! Test fixtures and fakes for the Plaza SDK.
//!
//! This crate provides:
//! - [`FakeSocialServer`], an in-memory backend with failure injection
//! - [`SyncFixture`] wiring caches, server and handler together
//! - [`populate_caches`] for representative pending-action sets
//!
//! Everything here is test support; nothing is meant for production use.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod fake_server;
mod fixtures;

pub use fake_server::FakeSocialServer;
pub use fixtures::{populate_caches, SyncFixture};
