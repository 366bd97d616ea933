//! Minimal HTTP request/response values exchanged with handlers.

use std::sync::LazyLock;

pub const JAVASCRIPT: &str = "text/javascript";
pub const PLAIN: &str = "text/plain";

static FORBIDDEN: LazyLock<Response> =
    LazyLock::new(|| Response::text(403, PLAIN, b"Forbidden\n".to_vec()));

static NOT_FOUND: LazyLock<Response> =
    LazyLock::new(|| Response::text(404, PLAIN, b"Not Found\n".to_vec()));

/// An inbound request. Only the path matters to the middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    /// Raw request target, possibly percent-encoded and with a query string.
    pub path: String,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            path: path.into(),
        }
    }
}

/// Status, headers and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// Response with `Content-Type` and `Content-Length` set.
    pub fn text(status: u16, content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status,
            headers: vec![
                ("Content-Type".to_string(), content_type.to_string()),
                ("Content-Length".to_string(), body.len().to_string()),
            ],
            body,
        }
    }

    pub fn javascript(body: impl Into<Vec<u8>>) -> Self {
        Self::text(200, JAVASCRIPT, body.into())
    }

    pub fn forbidden() -> Self {
        FORBIDDEN.clone()
    }

    pub fn not_found() -> Self {
        NOT_FOUND.clone()
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_responses() {
        let forbidden = Response::forbidden();
        assert_eq!(forbidden.status, 403);
        assert_eq!(forbidden.body, b"Forbidden\n");
        assert_eq!(forbidden.header("content-type"), Some("text/plain"));
        assert_eq!(forbidden.header("Content-Length"), Some("10"));

        let not_found = Response::not_found();
        assert_eq!(not_found.status, 404);
        assert_eq!(not_found.body, b"Not Found\n");
    }

    #[test]
    fn test_content_length_is_bytes() {
        let response = Response::javascript("var s = \"é\";".to_string());
        assert_eq!(response.header("Content-Length"), Some("13"));
        assert_eq!(response.header("Content-Type"), Some(JAVASCRIPT));
    }
}
