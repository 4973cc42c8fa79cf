//! End-to-end requests against the live echo server.
//!
//! # Design
//! Starts the echo server on a random port, then sends real HTTP requests
//! through `make_request` and checks what the server saw.

use make_request::{make_request, Content, Error, Params};
use mock_server::Echo;
use serde_json::json;

/// Start the echo server on a background thread and return its base URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn echo_of(response: make_request::HttpResponse) -> Echo {
    assert_eq!(response.status, 200);
    serde_json::from_str(&response.into_string().unwrap()).unwrap()
}

#[test]
fn echo_round_trips() {
    let base = start_server();

    // Step 1: plain GET keeps the URL's query string.
    let echo = echo_of(make_request(&format!("{base}/echo/more/path?a=1"), "GET", Content::None, &[]).unwrap());
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.path, "/echo/more/path");
    assert_eq!(serde_json::Value::Object(echo.query_params), json!({"a": "1"}));

    // Step 2: GET parameters override the URL's query values.
    let params = Params::new().with("a", 2).with("c", "x y");
    let echo = echo_of(make_request(&format!("{base}/echo?a=1&b=1"), "GET", params, &[]).unwrap());
    assert_eq!(
        serde_json::Value::Object(echo.query_params),
        json!({"a": "2", "b": "1", "c": "x y"})
    );
    assert!(echo.body.is_empty());

    // Step 3: POST parameters become a form body.
    let params = Params::new().with("a", 1).with("b", vec![2, 3]);
    let echo = echo_of(make_request(&format!("{base}/echo"), "POST", params, &[]).unwrap());
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.path, "/echo");
    assert!(echo.query_params.is_empty());
    assert_eq!(
        serde_json::Value::Object(echo.post_params),
        json!({"a": "1", "b": ["2", "3"]})
    );
    assert_eq!(
        echo.headers.get("content-type").map(String::as_str),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(echo.headers.get("content-length").map(String::as_str), Some("11"));

    // Step 4: a raw body is sent verbatim and the query string is left alone.
    let headers = vec![("Content-Type".to_string(), "text/plain".to_string())];
    let echo = echo_of(make_request(&format!("{base}/echo?keep=1"), "POST", "xXyYzZ", &headers).unwrap());
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.body, "xXyYzZ");
    assert!(echo.post_params.is_empty());
    assert_eq!(serde_json::Value::Object(echo.query_params), json!({"keep": "1"}));
    assert_eq!(echo.headers.get("content-type").map(String::as_str), Some("text/plain"));

    // Step 5: PUT with parameters behaves like POST.
    let echo = echo_of(make_request(&format!("{base}/echo"), "PUT", Params::new().with("k", "/v"), &[]).unwrap());
    assert_eq!(echo.method, "PUT");
    assert_eq!(echo.body, "k=%2Fv");
    assert_eq!(serde_json::Value::Object(echo.post_params), json!({"k": "/v"}));

    // Step 6: caller headers reach the server.
    let headers = vec![("X-Request-Id".to_string(), "abc".to_string())];
    let echo = echo_of(make_request(&format!("{base}/echo"), "GET", Content::None, &headers).unwrap());
    assert_eq!(echo.headers.get("x-request-id").map(String::as_str), Some("abc"));

    // Step 7: a non-standard verb reaches the server as given, with a form body.
    let echo = echo_of(make_request(&format!("{base}/echo"), "PURGE", Params::new().with("a", 1), &[]).unwrap());
    assert_eq!(echo.method, "PURGE");
    assert_eq!(echo.body, "a=1");
    assert_eq!(serde_json::Value::Object(echo.post_params), json!({"a": "1"}));
}

#[test]
fn error_statuses_are_returned_as_responses() {
    let base = start_server();

    let response = make_request(&format!("{base}/status/404"), "GET", Content::None, &[]).unwrap();
    assert_eq!(response.status, 404);
    assert_eq!(response.into_string().unwrap(), "status 404");

    let response = make_request(&format!("{base}/status/503"), "POST", "", &[]).unwrap();
    assert_eq!(response.status, 503);
}

#[test]
fn refused_connection_is_a_transport_error() {
    // Bind then drop to get a port with nothing listening on it.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let err = make_request(&format!("http://127.0.0.1:{port}/"), "GET", Content::None, &[]).unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
