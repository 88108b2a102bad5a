use crate::http::encoding::ContentEncoding;
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::storage::{FileStorage, StorageError};

pub fn root() -> Response {
    Response::ok()
}

/// Sends the captured part of the target back as the body.
pub fn echo(req: &Request, message: &str) -> Response {
    let encoding = ContentEncoding::negotiate(req.accept_encoding());
    Response::text(message.as_bytes(), encoding)
}

/// Sends the `User-Agent` header back; empty when the header is absent.
pub fn user_agent(req: &Request) -> Response {
    let encoding = ContentEncoding::negotiate(req.accept_encoding());
    Response::text(req.user_agent().unwrap_or_default().as_bytes(), encoding)
}

pub async fn files<S: FileStorage>(storage: &S, req: &Request, name: &str) -> Response {
    match req.method {
        Method::GET => read_file(storage, name).await,
        Method::POST => write_file(storage, name, &req.body).await,
        Method::Other(_) => Response::not_found(),
    }
}

async fn read_file<S: FileStorage>(storage: &S, name: &str) -> Response {
    match storage.read(name).await {
        Ok(contents) => Response::octet_stream(contents),
        Err(StorageError::NotFound | StorageError::InvalidName(_)) => Response::not_found(),
        Err(e) => {
            tracing::warn!(file = name, error = %e, "Failed to read file");
            Response::not_found()
        }
    }
}

async fn write_file<S: FileStorage>(storage: &S, name: &str, body: &[u8]) -> Response {
    match storage.write(name, body).await {
        Ok(()) => Response::created(),
        Err(StorageError::InvalidName(_)) => Response::not_found(),
        Err(e) => {
            tracing::error!(file = name, error = %e, "Failed to write file");
            Response::internal_error()
        }
    }
}
