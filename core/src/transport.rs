//! Executing composed requests.
//!
//! # Design
//! `Transport` is the seam between composition and I/O. `Client` only ever
//! talks to the trait, so tests substitute a recording transport and the
//! default `UreqTransport` stays a thin adapter over `ureq`.

use ureq::http::Request;
use ureq::Agent;

use crate::error::Error;
use crate::http::{HttpRequest, HttpResponse};

/// Sends one request and returns the response unmodified.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        (**self).send(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
///
/// `https` targets go over TLS, everything else over plain TCP. Any failure
/// to resolve, connect, send or receive becomes `Error::Transport`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    /// An agent that returns 4xx/5xx responses as data instead of `Err` and
    /// sends any verb it is given.
    fn default() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .allow_non_standard_methods(true)
            .build()
            .new_agent();
        Self::new(agent)
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        let mut builder = Request::builder()
            .method(request.method.as_str())
            .uri(request.url());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = match request.body {
            Some(body) => self.agent.run(builder.body(body).map_err(invalid_request)?),
            None => self.agent.run(builder.body(()).map_err(invalid_request)?),
        }
        .map_err(|e| Error::Transport(e.to_string()))?;

        let (parts, body) = response.into_parts();
        let headers = parts
            .headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        Ok(HttpResponse {
            status: parts.status.as_u16(),
            headers,
            body: Box::new(body.into_reader()),
        })
    }
}

fn invalid_request(err: ureq::http::Error) -> Error {
    Error::Transport(format!("cannot build request: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, Scheme, Target};

    fn closed_port() -> u16 {
        std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port()
    }

    #[test]
    fn refused_connection_is_a_transport_error() {
        let request = HttpRequest {
            method: HttpMethod::Get,
            target: Target {
                scheme: Scheme::Http,
                host: "127.0.0.1".to_string(),
                port: closed_port(),
            },
            path: "/".to_string(),
            headers: Vec::new(),
            body: None,
        };
        let err = UreqTransport::default().send(request).unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[test]
    fn invalid_header_name_is_reported_before_io() {
        let request = HttpRequest {
            method: HttpMethod::Get,
            target: Target {
                scheme: Scheme::Http,
                host: "127.0.0.1".to_string(),
                port: closed_port(),
            },
            path: "/".to_string(),
            headers: vec![("bad header".to_string(), "x".to_string())],
            body: None,
        };
        let err = UreqTransport::default().send(request).unwrap_err();
        assert!(matches!(err, Error::Transport(ref msg) if msg.starts_with("cannot build request")));
    }
}
