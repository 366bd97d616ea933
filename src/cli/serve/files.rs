//! Static file handler used as the middleware's downstream.

use std::fs;
use std::path::{Path, PathBuf};

use super::path::resolve_path;
use crate::utils::mime::{self, types::PLAIN};
use crate::{Handler, Request, Response, debug};

/// Serves files under a root directory; 404 for anything else.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl Handler for StaticFiles {
    fn call(&self, request: &Request) -> Response {
        let Some(path) = resolve_path(&request.path, &self.root) else {
            return Response::text(404, PLAIN, b"404 Not Found".to_vec());
        };

        match fs::read(&path) {
            Ok(body) => Response::text(200, mime::from_path(&path), body),
            Err(e) => {
                debug!("serve"; "failed to read {}: {}", path.display(), e);
                Response::text(500, PLAIN, b"500 Internal Server Error".to_vec())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_serves_existing_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("style.css"), "body {}").unwrap();

        let response = StaticFiles::new(dir.path()).call(&Request::get("/style.css"));
        assert_eq!(response.status, 200);
        assert_eq!(response.header("Content-Type"), Some(mime::types::CSS));
        assert_eq!(response.body, b"body {}");
    }

    #[test]
    fn test_missing_file_is_404() {
        let dir = TempDir::new().unwrap();
        let response = StaticFiles::new(dir.path()).call(&Request::get("/nope.html"));
        assert_eq!(response.status, 404);
    }

    #[test]
    fn test_missing_root_is_404() {
        let dir = TempDir::new().unwrap();
        let response =
            StaticFiles::new(dir.path().join("public")).call(&Request::get("/index.html"));
        assert_eq!(response.status, 404);
    }
}
