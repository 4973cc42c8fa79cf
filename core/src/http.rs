//! HTTP request and response types.
//!
//! # Design
//! `HttpRequest` describes a composed request as plain data: `compose` builds
//! it without touching the network, and a `Transport` executes it. Headers
//! are an ordered list of owned pairs so caller order is preserved on the
//! wire.

use std::fmt;
use std::io::Read;

use crate::error::Error;
use crate::params::Params;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_LENGTH: &str = "Content-Length";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Header list as sent on the wire.
pub type Headers = Vec<(String, String)>;

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    /// Any other verb, kept exactly as given.
    Other(String),
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Other(verb) => verb.as_str(),
        }
    }

    /// GET and HEAD carry parameters in the URL instead of the body.
    pub fn params_in_url(&self) -> bool {
        matches!(self, HttpMethod::Get | HttpMethod::Head)
    }
}

impl From<&str> for HttpMethod {
    fn from(verb: &str) -> Self {
        match verb.to_ascii_uppercase().as_str() {
            "GET" => HttpMethod::Get,
            "HEAD" => HttpMethod::Head,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "PATCH" => HttpMethod::Patch,
            "DELETE" => HttpMethod::Delete,
            "OPTIONS" => HttpMethod::Options,
            _ => HttpMethod::Other(verb.to_string()),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which transport a request goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Plain TCP, used for every scheme other than `https`.
    Http,
    /// TLS.
    Https,
}

impl Scheme {
    pub fn from_url_scheme(scheme: &str) -> Self {
        if scheme.eq_ignore_ascii_case("https") {
            Scheme::Https
        } else {
            Scheme::Http
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

/// Where a request is sent: scheme, host and port taken from the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
}

impl Target {
    /// `scheme://host:port`, without a trailing slash.
    pub fn origin(&self) -> String {
        format!("{}://{}:{}", self.scheme.as_str(), self.host, self.port)
    }
}

/// What to send with a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Content {
    /// No body; the URL's query string is sent as is.
    #[default]
    None,
    /// Parameters merged with the URL's query string, then placed in the URL
    /// or the body depending on the method.
    Params(Params),
    /// A body sent verbatim; the URL's query string is sent as is.
    Raw(String),
}

impl From<Params> for Content {
    fn from(params: Params) -> Self {
        Content::Params(params)
    }
}

impl From<String> for Content {
    fn from(body: String) -> Self {
        Content::Raw(body)
    }
}

impl From<&str> for Content {
    fn from(body: &str) -> Self {
        Content::Raw(body.to_string())
    }
}

/// A composed request, ready for a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub target: Target,
    /// Path plus optional `?query`.
    pub path: String,
    pub headers: Headers,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Absolute URL of the request.
    pub fn url(&self) -> String {
        format!("{}{}", self.target.origin(), self.path)
    }
}

/// A response as returned by the transport.
///
/// The body is a stream owned by the caller; the connection behind it is
/// released once the stream is read to the end or dropped.
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: Box<dyn Read>,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Read the remaining body as UTF-8 text.
    pub fn into_string(mut self) -> Result<String, Error> {
        let mut text = String::new();
        self.body
            .read_to_string(&mut text)
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(text)
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Case-insensitive header lookup; the first match wins.
pub fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}
