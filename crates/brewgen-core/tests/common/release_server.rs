//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves one static body for every GET with a configurable status line and
//! counts the requests it receives.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct ServerOptions {
    /// Status line sent with the body, e.g. "200 OK" or "404 Not Found".
    pub status: &'static str,
    /// If true, advertise twice the body length and close early (body read failure).
    pub truncate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            status: "200 OK",
            truncate: false,
        }
    }
}

pub struct ReleaseServer {
    /// Base URL without trailing slash, e.g. "http://127.0.0.1:12345".
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    paths: Arc<Mutex<Vec<String>>>,
}

impl ReleaseServer {
    /// URL pattern under this server with a `{version}` placeholder.
    pub fn url_pattern(&self) -> String {
        format!("{}/cockroach-v{{version}}.darwin-10.9-amd64.tgz", self.base_url)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread serving `body` with 200 OK.
pub fn start(body: Vec<u8>) -> ReleaseServer {
    start_with_options(body, ServerOptions::default())
}

pub fn start_with_options(body: Vec<u8>, opts: ServerOptions) -> ReleaseServer {
    spawn(Reply::Body(Arc::new(body)), opts)
}

/// Starts a server answering every GET with `302 Found` to `location`.
pub fn start_redirect(location: String) -> ReleaseServer {
    spawn(Reply::Redirect(Arc::new(location)), ServerOptions::default())
}

#[derive(Clone)]
enum Reply {
    Body(Arc<Vec<u8>>),
    Redirect(Arc<String>),
}

fn spawn(reply: Reply, opts: ServerOptions) -> ReleaseServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(AtomicUsize::new(0));
    let paths = Arc::new(Mutex::new(Vec::new()));
    {
        let hits = Arc::clone(&hits);
        let paths = Arc::clone(&paths);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let reply = reply.clone();
                let hits = Arc::clone(&hits);
                let paths = Arc::clone(&paths);
                thread::spawn(move || handle(stream, &reply, opts, &hits, &paths));
            }
        });
    }
    ReleaseServer {
        base_url: format!("http://127.0.0.1:{}", port),
        hits,
        paths,
    }
}

/// A URL on a port with nothing listening.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/cockroach.tgz", port)
}

fn handle(
    mut stream: TcpStream,
    reply: &Reply,
    opts: ServerOptions,
    hits: &AtomicUsize,
    paths: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("").to_string();
    hits.fetch_add(1, Ordering::SeqCst);
    paths.lock().unwrap().push(path);

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        return;
    }
    let body = match reply {
        Reply::Body(body) => body.as_slice(),
        Reply::Redirect(location) => {
            let response = format!(
                "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                location
            );
            let _ = stream.write_all(response.as_bytes());
            return;
        }
    };
    let advertised = if opts.truncate {
        body.len() * 2 + 1
    } else {
        body.len()
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        opts.status, advertised
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}
