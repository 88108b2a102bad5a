use crate::http::request::{Method, Request};
use crate::http::tokenizer::tokenize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No `\r\n\r\n` found in the bytes received so far
    UnterminatedHeaders,
    /// Request line without exactly three fields, or a target not starting with `/`
    MalformedRequestLine,
    /// Request head is not valid UTF-8
    InvalidEncoding,
    InvalidContentLength,
    /// Fewer body bytes than `Content-Length` announced
    IncompleteBody {
        head_len: usize,
        expected: usize,
        received: usize,
    },
}

impl ParseError {
    /// Whether more bytes from the peer could still turn this into a valid request.
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            ParseError::UnterminatedHeaders | ParseError::IncompleteBody { .. }
        )
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnterminatedHeaders => write!(f, "request head is not terminated"),
            ParseError::MalformedRequestLine => write!(f, "malformed request line"),
            ParseError::InvalidEncoding => write!(f, "request head is not valid UTF-8"),
            ParseError::InvalidContentLength => write!(f, "invalid Content-Length header"),
            ParseError::IncompleteBody { expected, received, .. } => {
                write!(f, "body has {} of {} bytes", received, expected)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses one request out of `buf`.
///
/// Returns the request and the number of bytes it occupied.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let tokens = tokenize(buf)?;

    let (method, target, version) = parse_request_line(tokens.request_line)?;

    // Headers
    let mut headers = HashMap::new();

    for line in tokens.header_lines {
        match parse_header_line(line) {
            Some((key, value)) => {
                headers.insert(key.to_ascii_lowercase(), value.to_string());
            }
            None => tracing::trace!(line, "Ignoring unparseable header line"),
        }
    }

    // Body
    let content_length = headers
        .get("content-length")
        .map(|v| parse_content_length(v))
        .transpose()?;

    let body = match content_length {
        Some(expected) if tokens.body.len() < expected => {
            return Err(ParseError::IncompleteBody {
                head_len: tokens.head_len,
                expected,
                received: tokens.body.len(),
            });
        }
        Some(expected) => &tokens.body[..expected],
        None => tokens.body,
    };

    let request = Request {
        method,
        target: target.to_string(),
        version: version.to_string(),
        headers,
        body: body.to_vec(),
    };

    Ok((request, tokens.head_len + body.len()))
}

fn parse_request_line(line: &str) -> Result<(Method, &str, &str), ParseError> {
    let mut parts = line.split(' ');

    let (Some(method), Some(target), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ParseError::MalformedRequestLine);
    };

    if method.is_empty() || version.is_empty() || !target.starts_with('/') {
        return Err(ParseError::MalformedRequestLine);
    }

    Ok((Method::from(method), target, version))
}

/// Digits only; `usize::from_str` would also take a leading `+`.
fn parse_content_length(value: &str) -> Result<usize, ParseError> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidContentLength);
    }

    value.parse().map_err(|_| ParseError::InvalidContentLength)
}

/// Splits on the first `:` and drops a single leading space from the value.
fn parse_header_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    if key.is_empty() || key.contains(' ') {
        return None;
    }

    Some((key, value.strip_prefix(' ').unwrap_or(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req).unwrap();

        assert_eq!(parsed.target, "/");
        assert_eq!(parsed.header("Host").unwrap(), "example.com");
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn header_value_keeps_everything_after_one_space() {
        assert_eq!(parse_header_line("X:  two"), Some(("X", " two")));
        assert_eq!(parse_header_line("X:none"), Some(("X", "none")));
        assert_eq!(parse_header_line("Host: a:b"), Some(("Host", "a:b")));
        assert_eq!(parse_header_line("Broken"), None);
    }
}
