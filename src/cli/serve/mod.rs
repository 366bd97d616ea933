//! HTTP host for the asset middleware.
//!
//! Requests under the asset prefix go through [`Middleware`]; everything
//! else is served from `serve.root` by [`StaticFiles`].

mod files;
mod lifecycle;
mod path;
mod response;

pub use files::StaticFiles;
pub use lifecycle::setup_shutdown_handler;

use crate::{
    CommandCompiler, Middleware,
    config::Config,
    debug, log,
};
use anyhow::Result;
use std::sync::Arc;
use tiny_http::Server;

/// Number of worker threads answering requests.
const WORKERS: usize = 4;

type AssetServer = Middleware<CommandCompiler, StaticFiles>;

/// Bind the server and run the request loop until shutdown.
pub fn serve(config: &Config) -> Result<()> {
    let brewer = Arc::new(super::open_brewer(config));
    let settings = brewer.settings();

    let app = Middleware::new(brewer, StaticFiles::new(&config.serve.root))
        .fall_through(config.serve.fall_through);
    let app = Arc::new(app);

    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    lifecycle::register_server(Arc::clone(&server));

    log!("serve"; "http://{}{} (compile = {})", addr, settings.url_prefix, settings.compile);
    debug!("serve"; "static files from {}", config.serve.root.display());

    run_request_loop(&server, &app)
}

fn run_request_loop(server: &Server, app: &Arc<AssetServer>) -> Result<()> {
    // Compilation blocks its request; a small pool keeps other requests moving
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(WORKERS)
        .thread_name(|i| format!("cruller-http-{i}"))
        .build()?;

    for request in server.incoming_requests() {
        let app = Arc::clone(app);
        pool.spawn(move || {
            if let Err(e) = response::handle_request(request, &app) {
                log!("serve"; "request error: {e}");
            }
        });
    }

    log!("serve"; "stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Brewer, config::BrewOptions};
    use std::fs;
    use std::io::{Read, Write};
    use std::net::{IpAddr, Ipv4Addr, SocketAddr, TcpStream};
    use tempfile::TempDir;

    fn get(addr: SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        write!(
            stream,
            "GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"
        )
        .unwrap();
        let mut reply = String::new();
        stream.read_to_string(&mut reply).unwrap();
        reply
    }

    #[test]
    fn test_request_loop_end_to_end() {
        let dir = TempDir::new().unwrap();
        let js = dir.path().join("javascripts");
        let public = dir.path().join("public");
        fs::create_dir_all(&js).unwrap();
        fs::create_dir_all(&public).unwrap();
        fs::write(js.join("jquery.js"), "jQuery()").unwrap();
        fs::write(public.join("index.html"), "<h1>home</h1>").unwrap();

        let options = BrewOptions {
            source: dir.path().join("coffeescripts"),
            destination: js,
            ..Default::default()
        };
        let brewer: Brewer<CommandCompiler> = Brewer::new(&options, None);
        let app = Arc::new(Middleware::new(Arc::new(brewer), StaticFiles::new(&public)));

        let (server, addr) =
            lifecycle::bind_with_retry(IpAddr::V4(Ipv4Addr::LOCALHOST), 0).unwrap();
        let server = Arc::new(server);
        let handle = {
            let server = Arc::clone(&server);
            let app = Arc::clone(&app);
            std::thread::spawn(move || run_request_loop(&server, &app))
        };

        let reply = get(addr, "/javascripts/jquery.js");
        assert!(reply.starts_with("HTTP/1.1 200"), "{reply}");
        assert!(reply.contains("text/javascript"));
        assert!(reply.ends_with("jQuery()"));

        let reply = get(addr, "/");
        assert!(reply.ends_with("<h1>home</h1>"), "{reply}");

        // Missing asset falls through to the static handler's 404
        let reply = get(addr, "/javascripts/ghost.js");
        assert!(reply.starts_with("HTTP/1.1 404"), "{reply}");
        assert!(reply.ends_with("404 Not Found"));

        let reply = get(addr, "/javascripts/..%2Fsecret");
        assert!(reply.starts_with("HTTP/1.1 403"), "{reply}");

        server.unblock();
        handle.join().unwrap().unwrap();
    }
}
