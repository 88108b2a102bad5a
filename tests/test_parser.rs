use courier::http::parser::{ParseError, parse_http_request};
use courier::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.target, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.header("Host").unwrap(), "example.com");
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_post_request_with_body() {
    let req = b"POST /files/foo.txt HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.target, "/files/foo.txt");
    assert_eq!(parsed.body, b"hello".to_vec());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_body_truncated_to_content_length() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: 3\r\n\r\nhello";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b"hel".to_vec());
    assert_eq!(consumed, req.len() - 2);
}

#[test]
fn test_parse_body_without_content_length_takes_rest() {
    let req = b"POST /files/a HTTP/1.1\r\nHost: x\r\n\r\nall of it";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b"all of it".to_vec());
}

#[test]
fn test_parse_multiple_headers() {
    let req = b"GET /user-agent HTTP/1.1\r\nHost: localhost:4221\r\nUser-Agent: curl/7.64.1\r\nAccept-Encoding: gzip\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.host(), Some("localhost:4221"));
    assert_eq!(parsed.user_agent(), Some("curl/7.64.1"));
    assert_eq!(parsed.accept_encoding(), Some("gzip"));
}

#[test]
fn test_parse_header_names_case_insensitive() {
    let req = b"GET / HTTP/1.1\r\nuser-AGENT: foo\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.user_agent(), Some("foo"));
}

#[test]
fn test_parse_incomplete_request_missing_blank_line() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::UnterminatedHeaders)));
    assert!(result.unwrap_err().is_incomplete());
}

#[test]
fn test_parse_incomplete_request_partial_body() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello";
    let result = parse_http_request(req);

    assert_eq!(
        result.unwrap_err(),
        ParseError::IncompleteBody {
            head_len: 46,
            expected: 10,
            received: 5
        }
    );
}

#[test]
fn test_parse_request_line_too_few_fields() {
    let result = parse_http_request(b"GET /\r\n\r\n");
    assert_eq!(result.unwrap_err(), ParseError::MalformedRequestLine);

    let result = parse_http_request(b"\r\n\r\n");
    assert_eq!(result.unwrap_err(), ParseError::MalformedRequestLine);
}

#[test]
fn test_parse_request_line_too_many_fields() {
    let result = parse_http_request(b"GET /a b HTTP/1.1\r\n\r\n");
    assert_eq!(result.unwrap_err(), ParseError::MalformedRequestLine);
}

#[test]
fn test_parse_target_must_start_with_slash() {
    let result = parse_http_request(b"GET echo HTTP/1.1\r\n\r\n");
    assert_eq!(result.unwrap_err(), ParseError::MalformedRequestLine);
}

#[test]
fn test_parse_unknown_method_is_structural() {
    let (parsed, _) = parse_http_request(b"DELETE /files/a HTTP/1.1\r\n\r\n").unwrap();
    assert_eq!(parsed.method, Method::Other("DELETE".to_string()));
}

#[test]
fn test_parse_malformed_header_is_ignored() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\nHost: ok\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.len(), 1);
    assert_eq!(parsed.host(), Some("ok"));
}

#[test]
fn test_parse_invalid_content_length() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: lots\r\n\r\n";
    assert_eq!(
        parse_http_request(req).unwrap_err(),
        ParseError::InvalidContentLength
    );
}

#[test]
fn test_parse_content_length_must_be_digits() {
    for value in ["+5", "-5", "5 5", "0x5", ""] {
        let req = format!("POST /files/a HTTP/1.1\r\nContent-Length: {value}\r\n\r\nhello");
        assert_eq!(
            parse_http_request(req.as_bytes()).unwrap_err(),
            ParseError::InvalidContentLength,
            "{value:?}"
        );
    }
}

#[test]
fn test_parse_content_length_overflowing_usize() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: 99999999999999999999999\r\n\r\n";
    assert_eq!(
        parse_http_request(req).unwrap_err(),
        ParseError::InvalidContentLength
    );
}

#[test]
fn test_parse_invalid_utf8_head() {
    let req = b"GET /\xff HTTP/1.1\r\n\r\n";
    assert_eq!(parse_http_request(req).unwrap_err(), ParseError::InvalidEncoding);
}

#[test]
fn test_parse_request_with_binary_body() {
    let req = b"POST /files/bin HTTP/1.1\r\nContent-Length: 4\r\n\r\n\x00\x01\xff\x03";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, vec![0, 1, 255, 3]);
}

#[test]
fn test_parse_echo_target_kept_verbatim() {
    let (parsed, _) = parse_http_request(b"GET /echo/a%20b?x=1 HTTP/1.1\r\n\r\n").unwrap();
    assert_eq!(parsed.target, "/echo/a%20b?x=1");
}
