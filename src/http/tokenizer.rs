//! Splits a raw request buffer into its request line, header lines and body.
//!
//! The tokenizer never looks past the buffer it is given. A head that is not
//! terminated by `\r\n\r\n` inside the buffer is reported as
//! [`ParseError::UnterminatedHeaders`]; the caller decides whether more bytes
//! may still arrive.

use crate::http::parser::ParseError;

const CRLF: &str = "\r\n";
const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// The pieces of a request head, borrowed from the receive buffer.
#[derive(Debug)]
pub struct Tokens<'a> {
    pub request_line: &'a str,
    pub header_lines: HeaderLines<'a>,
    /// Everything after the blank line, untouched
    pub body: &'a [u8],
    /// Bytes up to and including the blank line
    pub head_len: usize,
}

/// Lazy iterator over the header lines of a request head.
#[derive(Debug, Clone)]
pub struct HeaderLines<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for HeaderLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match rest.split_once(CRLF) {
            Some((line, tail)) => {
                self.rest = Some(tail);
                Some(line)
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

pub fn tokenize(buf: &[u8]) -> Result<Tokens<'_>, ParseError> {
    let headers_end = find_headers_end(buf).ok_or(ParseError::UnterminatedHeaders)?;
    let head = std::str::from_utf8(&buf[..headers_end])
        .map_err(|_| ParseError::InvalidEncoding)?;

    let (request_line, header_block) = match head.split_once(CRLF) {
        Some((line, block)) => (line, Some(block)),
        None => (head, None),
    };

    let head_len = headers_end + HEAD_TERMINATOR.len();

    Ok(Tokens {
        request_line,
        header_lines: HeaderLines { rest: header_block },
        body: &buf[head_len..],
        head_len,
    })
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEAD_TERMINATOR.len())
        .position(|w| w == HEAD_TERMINATOR)
}
