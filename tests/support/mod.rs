//! Purpose: Loopback HTTP fixture for integration tests.
//! Exports: `FixtureServer`, `refused_url`.
//! Role: Serve a canned response a fixed number of times on 127.0.0.1.
//! Invariants: Each response closes its connection so clients never reuse it.
//! Invariants: Bounded read timeouts keep a stalled client from hanging the thread.
#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

pub struct FixtureServer {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl FixtureServer {
    pub fn json(body: &str) -> Self {
        Self::start(200, "application/json", body.as_bytes(), 1)
    }

    pub fn start(status: u16, content_type: &str, body: &[u8], max_requests: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fixture");
        let addr = listener.local_addr().expect("fixture addr");
        let hits = Arc::new(AtomicUsize::new(0));
        let response = build_response(status, content_type, body);

        let thread_hits = Arc::clone(&hits);
        thread::spawn(move || {
            for _ in 0..max_requests {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                thread_hits.fetch_add(1, Ordering::SeqCst);
                let _ = respond(stream, &response);
            }
        });

        Self {
            url: format!("http://{addr}/endpoints/locations.json"),
            hits,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// A loopback url whose port has no listener.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}/endpoints/locations.json")
}

fn build_response(status: u16, content_type: &str, body: &[u8]) -> Vec<u8> {
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let mut response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    )
    .into_bytes();
    response.extend_from_slice(body);
    response
}

fn respond(mut stream: TcpStream, response: &[u8]) -> std::io::Result<()> {
    stream.set_read_timeout(Some(Duration::from_secs(5)))?;
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|window| window == b"\r\n\r\n") {
        let read = stream.read(&mut buf)?;
        if read == 0 {
            break;
        }
        request.extend_from_slice(&buf[..read]);
    }
    stream.write_all(response)?;
    stream.flush()
}
