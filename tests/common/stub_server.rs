//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves canned GET responses keyed by request path. Unknown paths get 404.
//! Query strings are ignored when matching, and a route may redirect to
//! another path to exercise redirect following.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

/// One canned response.
#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
    pub location: Option<String>,
}

impl Route {
    /// 200 with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Route {
            status: 200,
            body: body.into(),
            location: None,
        }
    }

    /// An empty-bodied response with the given status.
    pub fn status(status: u16) -> Self {
        Route {
            status,
            body: Vec::new(),
            location: None,
        }
    }

    /// 301 to `target` (a path on the same server), with a throwaway body.
    pub fn redirect(target: &str) -> Self {
        Route {
            status: 301,
            body: b"moved, this body must not be stored".to_vec(),
            location: Some(target.to_string()),
        }
    }
}

/// Starts a server in a background thread serving `routes` (path -> response).
/// Returns the base URL without a trailing slash, e.g. "http://127.0.0.1:12345".
/// The server runs until the process exits.
pub fn start(routes: HashMap<String, Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

/// A base URL nothing listens on, for connection-refused cases.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = match parse_request_path(request) {
        Some(p) => p,
        None => {
            let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\n\r\n");
            return;
        }
    };

    let not_found = Route::status(404);
    let route = routes.get(path).unwrap_or(&not_found);
    let location = match &route.location {
        Some(target) => format!("Location: {}\r\n", target),
        None => String::new(),
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        status_text(route.status),
        route.body.len(),
        location
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&route.body);
}

/// Returns the path of a `GET <path> HTTP/1.1` request line, with any query
/// string stripped.
fn parse_request_path(request: &str) -> Option<&str> {
    let line = request.lines().next()?;
    let mut parts = line.split_whitespace();
    if !parts.next()?.eq_ignore_ascii_case("GET") {
        return None;
    }
    let path = parts.next()?;
    Some(path.split('?').next().unwrap_or(path))
}

fn status_text(status: u16) -> String {
    let reason = match status {
        200 => "OK",
        301 => "Moved Permanently",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    };
    format!("{} {}", status, reason)
}
