//! Local HTTP stub standing in for the GitHub API and raw hosts.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

#[derive(Debug, Clone)]
struct Route {
    status: u16,
    body: String,
    delay: Duration,
}

/// A request the stub received.
#[derive(Debug, Clone)]
pub struct Recorded {
    /// Path plus query string.
    pub target: String,
    /// Whether an `Authorization` header was sent.
    pub authorized: bool,
}

#[derive(Default)]
struct State {
    routes: HashMap<String, Route>,
    requests: Vec<Recorded>,
}

/// Serves canned responses by request target; unknown targets get a 404.
///
/// Routes match the full target (path and query) first, then the path alone.
pub struct StubServer {
    addr: SocketAddr,
    state: Arc<Mutex<State>>,
}

impl StubServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(Mutex::new(State::default()));

        let shared = Arc::clone(&state);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve(stream, Arc::clone(&shared)));
            }
        });

        Self { addr, state }
    }

    /// Base URL of the stub.
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}/", self.addr)).unwrap()
    }

    pub fn route(&self, target: &str, status: u16, body: impl Into<String>) {
        self.route_delayed(target, status, body, Duration::ZERO);
    }

    /// Like [`route`](Self::route) but waits `delay` before responding.
    pub fn route_delayed(&self, target: &str, status: u16, body: impl Into<String>, delay: Duration) {
        self.state.lock().unwrap().routes.insert(
            target.to_string(),
            Route {
                status,
                body: body.into(),
                delay,
            },
        );
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Requests whose path starts with `prefix`.
    pub fn hits(&self, prefix: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.target.starts_with(prefix))
            .collect()
    }
}

async fn serve(mut stream: TcpStream, state: Arc<Mutex<State>>) {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buffer.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buffer.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&buffer).to_string();
    let mut lines = head.lines();
    let target = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    let authorized = lines.any(|line| line.to_ascii_lowercase().starts_with("authorization:"));

    let route = {
        let mut state = state.lock().unwrap();
        state.requests.push(Recorded {
            target: target.clone(),
            authorized,
        });
        let path = target.split('?').next().unwrap_or_default();
        state
            .routes
            .get(&target)
            .or_else(|| state.routes.get(path))
            .cloned()
    };
    let route = route.unwrap_or(Route {
        status: 404,
        body: r#"{"message":"Not Found"}"#.to_string(),
        delay: Duration::ZERO,
    });

    if !route.delay.is_zero() {
        tokio::time::sleep(route.delay).await;
    }

    let reason = match route.status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        route.status,
        reason,
        route.body.len(),
        route.body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// A `/user/repos`-style payload for one repository owned by `owner`.
pub fn repo_json(owner: &str, name: &str, pushed_at: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "full_name": format!("{owner}/{name}"),
        "description": null,
        "private": false,
        "fork": false,
        "archived": false,
        "html_url": format!("https://github.com/{owner}/{name}"),
        "homepage": null,
        "stargazers_count": 1,
        "forks_count": 0,
        "watchers_count": 1,
        "language": "Rust",
        "topics": [],
        "license": null,
        "created_at": "2023-01-01T00:00:00Z",
        "updated_at": pushed_at,
        "pushed_at": pushed_at,
        "default_branch": "main",
        "owner": { "login": owner }
    })
}
