//! Issue HTTP requests with URL-encoded parameters.
//!
//! # Overview
//! Given a URL, a method and a parameter mapping, merges the URL's own query
//! string with the parameters (explicit parameters win), places the encoded
//! result in the URL for GET/HEAD or in a form body otherwise, and sends the
//! request through a `Transport`.
//!
//! # Design
//! - `codec` escapes per RFC 3986 (`/` escaped, `~` kept) and decodes query
//!   strings, accumulating repeated keys into lists.
//! - `client::compose` is pure and returns an `HttpRequest`; `Client` sends
//!   it. Tests swap in their own `Transport` instead of a network.
//! - Diagnostics go through `tracing` at debug level, so the sink is whatever
//!   subscriber the caller installs.

pub mod client;
pub mod codec;
pub mod error;
pub mod http;
pub mod params;
pub mod transport;

pub use client::{compose, make_request, Client};
pub use error::Error;
pub use http::{Content, Headers, HttpMethod, HttpRequest, HttpResponse, Scheme, Target};
pub use params::{ParamValue, Params};
pub use transport::{Transport, UreqTransport};
