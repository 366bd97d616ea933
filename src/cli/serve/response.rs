//! Bridge between `tiny_http` and the middleware's request/response values.

use super::{AssetServer, lifecycle::is_shutdown};
use crate::{Request, Response, cli::error_chain, log, router::PLAIN};
use anyhow::Result;
use tiny_http::{Header, StatusCode};

/// Handle a single HTTP request.
pub fn handle_request(request: tiny_http::Request, app: &AssetServer) -> Result<()> {
    if is_shutdown() {
        return send(request, unavailable());
    }

    let incoming = Request {
        method: request.method().as_str().to_string(),
        path: request.url().to_string(),
    };

    let response = match app.call(&incoming) {
        Ok(response) => response,
        Err(err) => {
            let message = error_chain(&err);
            log!("error"; "{} {}: {}", incoming.method, incoming.path, message);
            compile_error(&message)
        }
    };

    send(request, response)
}

/// 500 for a source that failed to compile.
fn compile_error(message: &str) -> Response {
    Response::text(500, PLAIN, format!("{message}\n").into_bytes())
}

/// 503 while shutting down.
fn unavailable() -> Response {
    Response::text(503, PLAIN, b"503 Service Unavailable".to_vec())
}

fn send(request: tiny_http::Request, response: Response) -> Result<()> {
    let mut reply = tiny_http::Response::from_data(response.body)
        .with_status_code(StatusCode(response.status));

    for (name, value) in &response.headers {
        // tiny_http derives Content-Length from the body itself
        if name.eq_ignore_ascii_case("Content-Length") {
            continue;
        }
        if let Ok(header) = Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            reply.add_header(header);
        }
    }

    request.respond(reply)?;
    Ok(())
}
