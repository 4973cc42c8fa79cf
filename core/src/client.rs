//! Request composition and dispatch.
//!
//! # Design
//! `compose` is pure: it turns a URL, method, content and headers into an
//! `HttpRequest` without touching the network. `Client` adds the I/O step by
//! handing the composed request to its `Transport` and returning the response
//! as is. Neither keeps state between calls.

use tracing::debug;
use url::Url;

use crate::codec;
use crate::error::Error;
use crate::http::{
    find_header, Content, HttpMethod, HttpRequest, HttpResponse, Scheme, Target, CONTENT_LENGTH,
    CONTENT_TYPE, FORM_URLENCODED,
};
use crate::params::Params;
use crate::transport::{Transport, UreqTransport};

/// Build the request for `url` without sending it.
///
/// With `Content::Params`, the URL's query string is decoded, overwritten by
/// the given parameters and re-encoded. GET and HEAD carry the result in the
/// URL; every other method sends it as a form body. `Content::Raw` and
/// `Content::None` leave the query string untouched.
///
/// `Content-Type` (form bodies only) and `Content-Length` are added when the
/// caller did not supply them. `headers` itself is never modified.
pub fn compose(
    url: &str,
    method: impl Into<HttpMethod>,
    content: Content,
    headers: &[(String, String)],
) -> Result<HttpRequest, Error> {
    let method = method.into();
    let parsed = Url::parse(url)?;
    let host = parsed
        .host_str()
        .ok_or_else(|| Error::InvalidUrl(format!("`{url}` has no host")))?
        .to_string();
    let scheme = Scheme::from_url_scheme(parsed.scheme());
    let port = parsed.port().unwrap_or_else(|| scheme.default_port());

    let mut headers = headers.to_vec();
    let mut path = parsed.path().to_string();
    let query = parsed.query().filter(|q| !q.is_empty());

    let body = match content {
        Content::Params(params) => {
            let mut merged = match query {
                Some(query) => codec::decode(query)?,
                None => Params::new(),
            };
            merged.merge(params);
            let encoded = codec::encode(&merged);

            if encoded.is_empty() {
                None
            } else if method.params_in_url() {
                path.push('?');
                path.push_str(&encoded);
                None
            } else {
                if find_header(&headers, CONTENT_TYPE).is_none() {
                    headers.push((CONTENT_TYPE.to_string(), FORM_URLENCODED.to_string()));
                }
                Some(encoded)
            }
        }
        Content::Raw(body) => {
            push_query(&mut path, query);
            Some(body)
        }
        Content::None => {
            push_query(&mut path, query);
            None
        }
    };

    if let Some(body) = &body {
        if find_header(&headers, CONTENT_LENGTH).is_none() {
            headers.push((CONTENT_LENGTH.to_string(), body.len().to_string()));
        }
    }

    Ok(HttpRequest {
        method,
        target: Target { scheme, host, port },
        path,
        headers,
        body,
    })
}

fn push_query(path: &mut String, query: Option<&str>) {
    if let Some(query) = query {
        path.push('?');
        path.push_str(query);
    }
}

/// Composes requests and sends them through a `Transport`.
#[derive(Clone, Default)]
pub struct Client<T = UreqTransport> {
    transport: T,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Compose a request and send it. The response is returned unmodified;
    /// transport failures propagate as `Error::Transport`.
    pub fn request(
        &self,
        url: &str,
        method: impl Into<HttpMethod>,
        content: impl Into<Content>,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, Error> {
        let request = compose(url, method, content.into(), headers)?;

        let Target { scheme, host, port } = &request.target;
        match scheme {
            Scheme::Https => debug!(%host, port, "using secure transport"),
            Scheme::Http => debug!(%host, port, "using plain transport"),
        }
        debug!(
            method = %request.method,
            url = %request.path,
            body = ?request.body,
            headers = ?request.headers,
            "dispatching request"
        );

        self.transport.send(request)
    }
}

/// Send a single request with the default `ureq`-backed transport.
///
/// ```no_run
/// use make_request::{make_request, Params};
///
/// let params = Params::new().with("a", 1).with("b", vec![2, 3]);
/// let response = make_request("http://localhost:3000/echo", "POST", params, &[])?;
/// assert_eq!(response.status, 200);
/// # Ok::<(), make_request::Error>(())
/// ```
pub fn make_request(
    url: &str,
    method: impl Into<HttpMethod>,
    content: impl Into<Content>,
    headers: &[(String, String)],
) -> Result<HttpResponse, Error> {
    Client::<UreqTransport>::default().request(url, method, content, headers)
}
