use courier::http::request::{Method, Request, RequestBuilder};
use std::collections::HashMap;

#[test]
fn test_request_header_retrieval_is_case_insensitive() {
    let mut headers = HashMap::new();
    headers.insert("host".to_string(), "example.com".to_string());
    headers.insert("user-agent".to_string(), "curl/7.64.1".to_string());

    let req = Request {
        method: Method::GET,
        target: "/".to_string(),
        version: "HTTP/1.1".to_string(),
        headers,
        body: vec![],
    };

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("HOST"), Some("example.com"));
    assert_eq!(req.host(), Some("example.com"));
    assert_eq!(req.user_agent(), Some("curl/7.64.1"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_content_length_parsing() {
    let req = RequestBuilder::new()
        .method(Method::POST)
        .target("/files/a")
        .header("Content-Length", "42")
        .build()
        .unwrap();

    assert_eq!(req.content_length(), Some(42));
}

#[test]
fn test_request_content_length_missing_or_invalid() {
    let missing = RequestBuilder::new()
        .method(Method::GET)
        .target("/")
        .build()
        .unwrap();
    let invalid = RequestBuilder::new()
        .method(Method::POST)
        .target("/")
        .header("Content-Length", "not-a-number")
        .build()
        .unwrap();

    assert_eq!(missing.content_length(), None);
    assert_eq!(invalid.content_length(), None);
}

#[test]
fn test_request_accept_encoding_accessor() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .target("/echo/abc")
        .header("accept-encoding", "gzip, deflate")
        .build()
        .unwrap();

    assert_eq!(req.accept_encoding(), Some("gzip, deflate"));
}

#[test]
fn test_request_method_from_string() {
    assert_eq!(Method::from("GET"), Method::GET);
    assert_eq!(Method::from("POST"), Method::POST);
    assert_eq!(Method::from("get"), Method::Other("get".to_string())); // Case-sensitive
    assert_eq!(Method::from("PUT"), Method::Other("PUT".to_string()));
}

#[test]
fn test_request_method_display() {
    assert_eq!(Method::GET.to_string(), "GET");
    assert_eq!(Method::from("PATCH").to_string(), "PATCH");
}

#[test]
fn test_request_builder_defaults_version() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .target("/")
        .build()
        .unwrap();

    assert_eq!(req.version, "HTTP/1.1");
    assert!(req.headers.is_empty());
    assert!(req.body.is_empty());
}

#[test]
fn test_request_builder_requires_method_and_target() {
    assert!(RequestBuilder::new().target("/").build().is_err());
    assert!(RequestBuilder::new().method(Method::GET).build().is_err());
    assert!(
        RequestBuilder::new()
            .method(Method::GET)
            .target("no-slash")
            .build()
            .is_err()
    );
}
