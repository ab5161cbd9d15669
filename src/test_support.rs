//! Minimal HTTP responder for exercising the fetcher without a mock-server crate.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Canned answer for requests whose path contains `/org/<org_id>/`.
pub struct Route {
    pub org_id: &'static str,
    pub status_line: &'static str,
    pub body: String,
}

pub struct MockApi {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockApi {
    /// Bind to an ephemeral port and answer every connection from `routes`.
    /// Unknown organizations get a `404`.
    pub async fn start(routes: Vec<Route>) -> MockApi {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(routes);

        let seen = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let routes = Arc::clone(&routes);
                let seen = Arc::clone(&seen);
                tokio::spawn(async move {
                    let mut head = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => head.extend_from_slice(&buf[..n]),
                        }
                    }
                    let head = String::from_utf8_lossy(&head).into_owned();
                    let request_line = head.lines().next().unwrap_or_default().to_string();

                    let (status_line, body) = routes
                        .iter()
                        .find(|r| request_line.contains(&format!("/org/{}/", r.org_id)))
                        .map(|r| (r.status_line, r.body.clone()))
                        .unwrap_or(("404 Not Found", "{}".to_string()));

                    seen.lock().unwrap().push(head);

                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status_line,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        MockApi { base_url, requests }
    }

    /// Raw request heads received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}
