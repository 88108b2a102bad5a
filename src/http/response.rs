use crate::http::encoding::ContentEncoding;

/// HTTP status codes supported by the server.
///
/// - `Ok` (200): Request successful
/// - `Created` (201): File written
/// - `BadRequest` (400): Malformed request
/// - `NotFound` (404): Unknown target, unsupported method or missing file
/// - `PayloadTooLarge` (413): Request exceeds the configured size limit
/// - `InternalServerError` (500): Storage failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 413 Payload Too Large
    PayloadTooLarge,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use courier::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::PayloadTooLarge => 413,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use courier::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::PayloadTooLarge => "Payload Too Large",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Headers are kept in insertion order; they are written to the wire in
/// exactly that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers as ordered name/value pairs
    pub headers: Vec<(String, String)>,
    /// Response body as bytes, possibly gzip-compressed
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use courier::http::response::{ResponseBuilder, StatusCode};
/// # use courier::http::encoding::ContentEncoding;
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .content("text/plain", b"abc".to_vec(), ContentEncoding::Identity)
///     .build();
/// assert_eq!(response.header("Content-Length"), Some("3"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Appends a header. Order of calls is the order on the wire.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Sets the response body without touching the headers.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Sets a typed body, encoding it first.
    ///
    /// Emits `Content-Type`, then `Content-Encoding` when the encoding was
    /// actually applied, then `Content-Length` measured on the final bytes.
    pub fn content(
        self,
        content_type: &str,
        body: Vec<u8>,
        encoding: ContentEncoding,
    ) -> Self {
        let (body, applied) = encoding.encode(body);

        let mut builder = self.header("Content-Type", content_type);
        if let Some(value) = applied.header_value() {
            builder = builder.header("Content-Encoding", value);
        }

        builder
            .header("Content-Length", body.len().to_string())
            .body(body)
    }

    /// Builds the final Response.
    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// A response carrying only a status line.
    pub fn empty(status: StatusCode) -> Self {
        ResponseBuilder::new(status).build()
    }

    /// Creates a bare 200 OK response.
    pub fn ok() -> Self {
        Self::empty(StatusCode::Ok)
    }

    /// Creates a 200 OK `text/plain` response, encoded as negotiated.
    pub fn text(body: impl Into<Vec<u8>>, encoding: ContentEncoding) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .content("text/plain", body.into(), encoding)
            .build()
    }

    /// Creates a 200 OK `application/octet-stream` response. Never compressed.
    pub fn octet_stream(body: Vec<u8>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .content("application/octet-stream", body, ContentEncoding::Identity)
            .build()
    }

    pub fn created() -> Self {
        Self::empty(StatusCode::Created)
    }

    pub fn bad_request() -> Self {
        Self::empty(StatusCode::BadRequest)
    }

    pub fn not_found() -> Self {
        Self::empty(StatusCode::NotFound)
    }

    pub fn payload_too_large() -> Self {
        Self::empty(StatusCode::PayloadTooLarge)
    }

    pub fn internal_error() -> Self {
        Self::empty(StatusCode::InternalServerError)
    }

    /// Looks up the first header with this name, ignoring ASCII case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}
