//! Content-encoding negotiation and gzip compression.

use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;

/// Encodings the server can apply to a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Identity,
    Gzip,
}

impl ContentEncoding {
    /// Picks the response encoding from a request's `Accept-Encoding` value.
    ///
    /// The value is read as a comma-separated token list. A token matches
    /// `gzip` ignoring case and any `;` parameters, except that an explicit
    /// `q=0` is a refusal. Substrings do not count: `xgzipy` is not `gzip`.
    ///
    /// # Example
    ///
    /// ```
    /// # use courier::http::encoding::ContentEncoding;
    /// assert_eq!(ContentEncoding::negotiate(Some("deflate, gzip")), ContentEncoding::Gzip);
    /// assert_eq!(ContentEncoding::negotiate(Some("xgzipy")), ContentEncoding::Identity);
    /// assert_eq!(ContentEncoding::negotiate(None), ContentEncoding::Identity);
    /// ```
    pub fn negotiate(accept_encoding: Option<&str>) -> Self {
        let Some(value) = accept_encoding else {
            return ContentEncoding::Identity;
        };

        let accepts_gzip = value.split(',').any(|entry| {
            let mut params = entry.split(';').map(str::trim);
            let token = params.next().unwrap_or_default();
            token.eq_ignore_ascii_case("gzip") && !params.any(is_zero_quality)
        });

        if accepts_gzip {
            ContentEncoding::Gzip
        } else {
            ContentEncoding::Identity
        }
    }

    /// The `Content-Encoding` header value, if one should be sent.
    pub fn header_value(&self) -> Option<&'static str> {
        match self {
            ContentEncoding::Identity => None,
            ContentEncoding::Gzip => Some("gzip"),
        }
    }

    /// Encodes `body`, returning the bytes and the encoding actually applied.
    ///
    /// A compression failure falls back to the identity body.
    pub fn encode(self, body: Vec<u8>) -> (Vec<u8>, ContentEncoding) {
        match self {
            ContentEncoding::Identity => (body, ContentEncoding::Identity),
            ContentEncoding::Gzip => match gzip_compress(&body) {
                Ok(compressed) => (compressed, ContentEncoding::Gzip),
                Err(e) => {
                    tracing::warn!(error = %e, "gzip compression failed, serving identity body");
                    (body, ContentEncoding::Identity)
                }
            },
        }
    }
}

fn is_zero_quality(param: &str) -> bool {
    param
        .strip_prefix("q=")
        .or_else(|| param.strip_prefix("Q="))
        .and_then(|q| q.trim().parse::<f32>().ok())
        .is_some_and(|q| q == 0.0)
}

/// Compresses `data` with a gzip wrapper at the default level.
pub fn gzip_compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
