//! # Plaza Client
//!
//! Network transport for the Plaza social REST API.
//!
//! This crate provides:
//! - [`SocialTransport`], the seam the offline layers submit actions through
//! - [`RestTransport`] over a pluggable [`HttpClient`]
//! - [`ClientError`] with the rejected-vs-transient classification
//! - [`MockTransport`] for tests
//!
//! The generated REST stubs themselves live outside this repository; this
//! crate only shapes requests and classifies responses.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod http;
mod transport;

pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, HttpRequest, HttpResponse, RestTransport};
pub use transport::{MockTransport, SocialTransport};
