//! HTTP middleware in front of a [`Brewer`].
//!
//! Requests under the configured URL prefix are answered from the brewer;
//! everything else goes to the wrapped downstream handler.
//!
//! ```text
//! path ─► decode ─► under prefix? ──no──► downstream
//!                        │yes
//!                        ▼
//!                  contains ".."? ──yes──► 403
//!                        │no
//!                        ▼
//!              brew(last segment) ──none──► 404 / downstream
//!                        │some
//!                        ▼
//!                       200
//! ```

mod response;

pub use response::{JAVASCRIPT, PLAIN, Request, Response};

use std::sync::Arc;

use percent_encoding::percent_decode_str;

use crate::brew::{BrewError, Brewer};
use crate::compiler::Compiler;
use crate::debug;

/// Anything that can answer a request.
pub trait Handler: Send + Sync {
    fn call(&self, request: &Request) -> Response;
}

impl<F> Handler for F
where
    F: Fn(&Request) -> Response + Send + Sync,
{
    fn call(&self, request: &Request) -> Response {
        self(request)
    }
}

/// What the middleware made of a path, before any fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    /// Not under the prefix: not ours.
    Pass,
    /// Under the prefix with a `..` sequence.
    Forbidden,
    /// Under the prefix, but no such asset.
    NotFound,
    /// Compiled or cached output.
    Asset(Vec<u8>),
}

/// Asset-serving middleware wrapping a downstream handler.
pub struct Middleware<C, D> {
    brewer: Arc<Brewer<C>>,
    downstream: D,
    fall_through: bool,
}

impl<C: Compiler, D: Handler> Middleware<C, D> {
    /// Wrap `downstream`. Missing assets fall through by default.
    pub fn new(brewer: Arc<Brewer<C>>, downstream: D) -> Self {
        Self {
            brewer,
            downstream,
            fall_through: true,
        }
    }

    /// Whether a missing asset under the prefix is handed to downstream
    /// (`true`) or answered with a terminal 404 (`false`).
    pub fn fall_through(mut self, enabled: bool) -> Self {
        self.fall_through = enabled;
        self
    }

    pub fn brewer(&self) -> &Arc<Brewer<C>> {
        &self.brewer
    }

    /// Handle a request, deferring to downstream when it isn't ours.
    ///
    /// Compile failures are returned as errors for the host to report.
    pub fn call(&self, request: &Request) -> Result<Response, BrewError> {
        match self.route(&request.path)? {
            Routed::Asset(body) => Ok(Response::javascript(body)),
            Routed::Forbidden => Ok(Response::forbidden()),
            Routed::NotFound if !self.fall_through => Ok(Response::not_found()),
            Routed::NotFound | Routed::Pass => Ok(self.downstream.call(request)),
        }
    }

    /// Classify a request path without invoking downstream.
    pub fn route(&self, raw_path: &str) -> Result<Routed, BrewError> {
        let path = decode_path(raw_path);
        let prefix = self.brewer.settings().url_prefix.clone();

        if !path.starts_with(&prefix) {
            return Ok(Routed::Pass);
        }
        if path.contains("..") {
            debug!("serve"; "rejected traversal: {}", path);
            return Ok(Routed::Forbidden);
        }

        let name = basename(&path);
        match self.brewer.brew(name) {
            Ok(Some(body)) => Ok(Routed::Asset(body)),
            Ok(None) | Err(BrewError::InvalidName(_)) => Ok(Routed::NotFound),
            Err(err) => Err(err),
        }
    }
}

/// Form-decode the path component, dropping any query string.
///
/// `+` is a space; a literal plus must be sent as `%2B`.
fn decode_path(raw: &str) -> String {
    let path = raw.split('?').next().unwrap_or(raw).replace('+', " ");
    percent_decode_str(&path).decode_utf8_lossy().into_owned()
}

/// Final path segment, ignoring trailing slashes.
fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brew::tests::{EMPTY_JS, Fixture, StubCompiler};
    use crate::config::CompileMode;
    use std::fs;

    fn downstream(_: &Request) -> Response {
        Response::text(200, PLAIN, b"downstream".to_vec())
    }

    fn middleware(fx: &Fixture) -> Middleware<StubCompiler, fn(&Request) -> Response> {
        Middleware::new(Arc::new(fx.brewer(None)), downstream as fn(&Request) -> Response)
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("/javascripts/app.js"), "app.js");
        assert_eq!(basename("/javascripts/lib/app"), "app");
        assert_eq!(basename("/javascripts/"), "javascripts");
        assert_eq!(basename("/"), "");
    }

    #[test]
    fn test_decode_path() {
        assert_eq!(decode_path("/javascripts/my%20app.js"), "/javascripts/my app.js");
        assert_eq!(decode_path("/javascripts/app.js?v=3"), "/javascripts/app.js");
        assert_eq!(decode_path("/javascripts/%2E%2E/secret"), "/javascripts/../secret");
    }

    #[test]
    fn test_decode_plus_as_space() {
        assert_eq!(decode_path("/javascripts/my+app.js"), "/javascripts/my app.js");
        assert_eq!(decode_path("/javascripts/c%2B%2B.js"), "/javascripts/c++.js");
    }

    #[test]
    fn test_outside_prefix_passes() {
        let fx = Fixture::new();
        let mw = middleware(&fx);

        assert_eq!(mw.route("/stylesheets/app.css").unwrap(), Routed::Pass);
        let response = mw.call(&Request::get("/stylesheets/app.css")).unwrap();
        assert_eq!(response.body, b"downstream");
    }

    #[test]
    fn test_traversal_forbidden() {
        let fx = Fixture::new();
        let mw = middleware(&fx);

        let response = mw.call(&Request::get("/javascripts/../config.ru")).unwrap();
        assert_eq!(response, Response::forbidden());

        // Encoded dots are decoded before the check
        let response = mw.call(&Request::get("/javascripts/%2e%2e/x")).unwrap();
        assert_eq!(response.status, 403);
    }

    #[test]
    fn test_serves_compiled_asset() {
        let fx = Fixture::new();
        let mw = middleware(&fx);

        let response = mw.call(&Request::get("/javascripts/app.js")).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.header("Content-Type"), Some("text/javascript"));
        assert_eq!(
            response.header("Content-Length"),
            Some(EMPTY_JS.len().to_string().as_str())
        );
        assert_eq!(response.body, EMPTY_JS.as_bytes());
        assert!(fx.app_js().is_file());
    }

    #[test]
    fn test_serves_prebuilt_bytes_verbatim() {
        let fx = Fixture::new();
        fs::write(fx.js.join("legacy.js"), b"/* \xa9 1999 */").unwrap();
        let mw = middleware(&fx);

        let response = mw.call(&Request::get("/javascripts/legacy.js")).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"/* \xa9 1999 */");
        assert_eq!(response.header("Content-Length"), Some("12"));
    }

    #[test]
    fn test_only_last_segment_is_used() {
        let fx = Fixture::new();
        let mw = middleware(&fx);

        assert_eq!(
            mw.route("/javascripts/deeply/nested/app.coffee").unwrap(),
            Routed::Asset(EMPTY_JS.into())
        );
    }

    #[test]
    fn test_missing_asset_falls_through() {
        let fx = Fixture::new();
        let mw = middleware(&fx);

        assert_eq!(mw.route("/javascripts/ghost.js").unwrap(), Routed::NotFound);
        let response = mw.call(&Request::get("/javascripts/ghost.js")).unwrap();
        assert_eq!(response.body, b"downstream");
    }

    #[test]
    fn test_missing_asset_terminal_404() {
        let fx = Fixture::new();
        let mw = middleware(&fx).fall_through(false);

        let response = mw.call(&Request::get("/javascripts/ghost.js")).unwrap();
        assert_eq!(response, Response::not_found());

        // Requests outside the prefix still reach downstream
        let response = mw.call(&Request::get("/index.html")).unwrap();
        assert_eq!(response.body, b"downstream");
    }

    #[test]
    fn test_prefix_root_is_not_found() {
        let fx = Fixture::new();
        let mw = middleware(&fx).fall_through(false);
        assert_eq!(mw.route("/javascripts/").unwrap(), Routed::NotFound);
    }

    #[test]
    fn test_compile_error_propagates() {
        let fx = Fixture::new();
        fs::write(fx.coffee.join("broken.coffee"), "f = ->> 1").unwrap();
        let mw = middleware(&fx);

        let err = mw.call(&Request::get("/javascripts/broken.js")).unwrap_err();
        assert!(matches!(err, BrewError::Compile { .. }));
    }

    #[test]
    fn test_custom_prefix_after_reconfigure() {
        let fx = Fixture::new();
        let mw = middleware(&fx);

        let mut options = fx.options(Some(CompileMode::Auto));
        options.path = "assets".into();
        mw.brewer().reconfigure(&options);

        assert_eq!(mw.route("/javascripts/app.js").unwrap(), Routed::Pass);
        assert_eq!(
            mw.route("/assets/app.js").unwrap(),
            Routed::Asset(EMPTY_JS.into())
        );
    }

    #[test]
    fn test_closure_downstream() {
        let fx = Fixture::new();
        let mw = Middleware::new(Arc::new(fx.brewer(None)), |req: &Request| {
            Response::text(418, PLAIN, req.path.clone().into_bytes())
        });

        let response = mw.call(&Request::get("/teapot")).unwrap();
        assert_eq!(response.status, 418);
        assert_eq!(response.body, b"/teapot");
    }
}
