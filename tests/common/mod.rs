//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A canned origin response.
#[derive(Clone)]
pub struct MockAsset {
    pub status: u16,
    pub content_type: &'static str,
    pub body: &'static str,
}

pub fn html(body: &'static str) -> MockAsset {
    MockAsset {
        status: 200,
        content_type: "text/html; charset=utf-8",
        body,
    }
}

/// Request lines (`METHOD path`) seen by a mock origin, in arrival order.
pub type RequestLog = Arc<Mutex<Vec<String>>>;

/// Start a mock asset origin serving `assets` by path; anything else is 404.
pub async fn start_mock_origin(assets: HashMap<&'static str, MockAsset>) -> (SocketAddr, RequestLog) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let assets = Arc::new(assets);

    let seen = log.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let assets = assets.clone();
                    let seen = seen.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 8192];
                        let mut len = 0;
                        while !buf[..len].windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut buf[len..]).await {
                                Ok(0) | Err(_) => return,
                                Ok(n) => len += n,
                            }
                        }
                        let head = String::from_utf8_lossy(&buf[..len]).to_string();
                        let mut parts = head.split_whitespace();
                        let method = parts.next().unwrap_or_default().to_string();
                        let target = parts.next().unwrap_or_default().to_string();
                        let path = target.split('?').next().unwrap_or_default().to_string();
                        seen.lock().unwrap().push(format!("{method} {target}"));

                        let asset = assets.get(path.as_str()).cloned().unwrap_or(MockAsset {
                            status: 404,
                            content_type: "text/plain",
                            body: "missing",
                        });
                        let status_text = match asset.status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            _ => "500 Internal Server Error",
                        };
                        let body = if method == "HEAD" { "" } else { asset.body };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            asset.content_type,
                            asset.body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, log)
}
