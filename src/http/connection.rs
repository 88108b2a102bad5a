use std::sync::Arc;
use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::time::timeout;

use crate::http::parser::{ParseError, parse_http_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::router::Dispatcher;
use crate::storage::FileStorage;

const READ_CHUNK: usize = 1024;

/// Bounds applied to every connection.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Largest request (head and body) accepted
    pub max_request_bytes: usize,
    /// Longest wait for any single read
    pub read_timeout: Duration,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_request_bytes: 64 * 1024,
            read_timeout: Duration::from_secs(10),
        }
    }
}

/// Serves exactly one request on a stream, then closes.
pub struct Connection<T, S> {
    stream: T,
    buffer: BytesMut,
    state: ConnectionState,
    dispatcher: Arc<Dispatcher<S>>,
    limits: Limits,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

/// What reading produced.
enum Incoming {
    Request(Request),
    /// The request cannot be served; answer with this and close
    Rejected(Response),
    /// Peer went away or stalled; close without answering
    Gone,
}

impl<T, S> Connection<T, S>
where
    T: AsyncRead + AsyncWrite + Unpin,
    S: FileStorage,
{
    pub fn new(stream: T, dispatcher: Arc<Dispatcher<S>>, limits: Limits) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            state: ConnectionState::Reading,
            dispatcher,
            limits,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        Incoming::Request(req) => ConnectionState::Processing(req),
                        Incoming::Rejected(response) => {
                            ConnectionState::Writing(ResponseWriter::new(&response))
                        }
                        Incoming::Gone => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(req) => {
                    let response = self.dispatcher.dispatch(req).await;

                    tracing::info!(
                        method = %req.method,
                        target = %req.target,
                        status = response.status.as_u16(),
                        bytes = response.body.len(),
                        "Request handled"
                    );

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    // No keep-alive: one request per connection
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn read_request(&mut self) -> anyhow::Result<Incoming> {
        let mut temp = [0u8; READ_CHUNK];

        loop {
            // Try parsing whatever we already have
            match parse_http_request(&self.buffer) {
                Ok((request, _consumed)) => return Ok(Incoming::Request(request)),

                Err(ParseError::IncompleteBody { head_len, expected, .. })
                    if head_len
                        .checked_add(expected)
                        .is_none_or(|total| total > self.limits.max_request_bytes) =>
                {
                    tracing::warn!(
                        content_length = expected,
                        limit = self.limits.max_request_bytes,
                        "Request body exceeds size limit"
                    );
                    return Ok(Incoming::Rejected(Response::payload_too_large()));
                }

                Err(e) if e.is_incomplete() => {
                    // Need more data
                }

                Err(e) => {
                    tracing::warn!(error = %e, "Rejecting malformed request");
                    return Ok(Incoming::Rejected(Response::bad_request()));
                }
            }

            let room = self.limits.max_request_bytes.saturating_sub(self.buffer.len());
            if room == 0 {
                tracing::warn!(
                    limit = self.limits.max_request_bytes,
                    "Request exceeds size limit"
                );
                return Ok(Incoming::Rejected(Response::payload_too_large()));
            }

            let want = room.min(READ_CHUNK);
            let n = match timeout(self.limits.read_timeout, self.stream.read(&mut temp[..want])).await {
                Ok(read) => read?,
                Err(_) => {
                    tracing::warn!(
                        timeout_ms = self.limits.read_timeout.as_millis() as u64,
                        buffered = self.buffer.len(),
                        "Timed out waiting for request data"
                    );
                    return Ok(Incoming::Gone);
                }
            };

            if n == 0 {
                if self.buffer.is_empty() {
                    // Client closed connection without sending anything
                    return Ok(Incoming::Gone);
                }

                let error = parse_http_request(&self.buffer).err();
                tracing::warn!(error = ?error, "Connection closed mid-request");
                return Ok(Incoming::Rejected(Response::bad_request()));
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }
    }
}
