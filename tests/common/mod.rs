//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

/// A canned dashboard the mock API serves.
#[derive(Clone)]
pub struct MockDashboard {
    pub name: &'static str,
    pub downloads: i64,
}

/// Start a mock dashboard API on an ephemeral port.
///
/// Serves `GET /<id>` with a JSON dashboard body when `id` is present
/// in `boards`, 404 otherwise. Returns the bound address and a counter
/// of requests served, so tests can assert how often the upstream was
/// actually hit.
pub async fn start_mock_api(
    boards: HashMap<&'static str, MockDashboard>,
) -> (SocketAddr, Arc<AtomicU32>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicU32::new(0));
    let hit_counter = hits.clone();

    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            let boards = boards.clone();
            let hits = hit_counter.clone();
            tokio::spawn(async move {
                let mut reader = BufReader::new(socket);

                let mut request_line = String::new();
                if reader.read_line(&mut request_line).await.is_err() {
                    return;
                }
                // Drain headers until the blank line.
                loop {
                    let mut line = String::new();
                    match reader.read_line(&mut line).await {
                        Ok(0) => return,
                        Ok(_) if line == "\r\n" || line == "\n" => break,
                        Ok(_) => continue,
                        Err(_) => return,
                    }
                }

                // "GET /<id> HTTP/1.1"
                let path = request_line.split_whitespace().nth(1).unwrap_or("/");
                let id = path.rsplit('/').next().unwrap_or("");
                hits.fetch_add(1, Ordering::SeqCst);

                let (status, body) = match boards.get(id) {
                    Some(board) => (
                        "200 OK",
                        format!(
                            r#"{{"name": "{}", "id": {}, "downloads": {}, "orgName": "mock"}}"#,
                            board.name, id, board.downloads
                        ),
                    ),
                    None => ("404 Not Found", r#"{"message": "not found"}"#.to_string()),
                };

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let mut socket = reader.into_inner();
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, hits)
}
