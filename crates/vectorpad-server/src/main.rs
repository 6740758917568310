//! VectorPad Drawing Server
//!
//! Stores drawings in memory and serves them over a line-delimited JSON
//! protocol: one request object per line, one response line per request.
//!
//! ## Protocol
//!
//! ```json
//! { "action": "login", "data": { "token": "secret" } }
//! { "action": "getDrawings" }
//! { "action": "addDrawing", "data": { "type": "line", "x": 0, "y": 0, "properties": { ... } } }
//! { "action": "updateDrawing", "data": { "id": "...", "type": "line", ... } }
//! { "action": "deleteDrawing", "data": { "id": "..." } }
//! ```
//!
//! `getDrawings` answers with an array of records; every other action
//! answers `{"status":"ok"}` (plus `id` for `addDrawing`) or
//! `{"status":"error","message":"..."}`.
//!
//! A small HTTP side exposes `/health` and a read-only `/drawings` snapshot.

use axum::{Json, Router, extract::State, routing::get};
use dashmap::DashMap;
use futures_util::{SinkExt, StreamExt};
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::{Framed, LinesCodec, LinesCodecError};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;
use vectorpad_core::wire::{Reply, Request, ShapeRecord};

const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:3030";
/// Longest request line accepted; a longer one gets an error reply and the
/// connection is closed.
const MAX_LINE_LEN: usize = 64 * 1024;

/// A drawing and the token of the session that created it.
#[derive(Debug, Clone)]
struct StoredDrawing {
    owner: String,
    /// Insertion sequence, used to list drawings in creation order.
    seq: u64,
    record: ShapeRecord,
}

/// Shared application state
struct AppState {
    drawings: DashMap<String, StoredDrawing>,
    next_seq: AtomicU64,
}

impl AppState {
    fn new() -> Self {
        Self {
            drawings: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// All drawings in creation order, with `is_owner` set for `viewer`.
    fn snapshot(&self, viewer: Option<&str>) -> Vec<ShapeRecord> {
        let mut stored: Vec<StoredDrawing> =
            self.drawings.iter().map(|entry| entry.value().clone()).collect();
        stored.sort_by_key(|d| d.seq);
        stored
            .into_iter()
            .map(|d| ShapeRecord {
                is_owner: viewer == Some(d.owner.as_str()),
                ..d.record
            })
            .collect()
    }

    fn add(&self, owner: &str, mut record: ShapeRecord) -> String {
        let id = Uuid::new_v4().to_string();
        record.id = Some(id.clone());
        record.is_owner = false;
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.drawings.insert(
            id.clone(),
            StoredDrawing {
                owner: owner.to_string(),
                seq,
                record,
            },
        );
        id
    }

    fn update(&self, owner: &str, mut record: ShapeRecord) -> Result<(), String> {
        let id = record.id.clone().ok_or("Drawing id is required")?;
        let mut stored = self
            .drawings
            .get_mut(&id)
            .ok_or_else(|| format!("Drawing {} not found", id))?;
        if stored.owner != owner {
            return Err(format!("Drawing {} belongs to another user", id));
        }
        record.is_owner = false;
        stored.record = record;
        Ok(())
    }

    fn delete(&self, owner: &str, id: &str) -> Result<(), String> {
        let removed = self.drawings.remove_if(id, |_, stored| stored.owner == owner);
        match removed {
            Some(_) => Ok(()),
            None if self.drawings.contains_key(id) => {
                Err(format!("Drawing {} belongs to another user", id))
            }
            None => Err(format!("Drawing {} not found", id)),
        }
    }
}

/// Per-connection state.
#[derive(Debug, Default)]
struct Session {
    token: Option<String>,
}

impl Session {
    fn owner(&self) -> Result<&str, String> {
        self.token.as_deref().ok_or_else(|| "Login required".to_string())
    }
}

fn to_line<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        warn!("Failed to encode response: {}", e);
        r#"{"status":"error","message":"internal error"}"#.to_string()
    })
}

fn error_line(message: impl Into<String>) -> String {
    to_line(&Reply::error(message))
}

/// Answer one request line.
fn handle_line(state: &AppState, session: &mut Session, line: &str) -> String {
    let request = match serde_json::from_str::<Request>(line) {
        Ok(request) => request,
        Err(e) => {
            warn!("Invalid request: {}", e);
            return error_line(format!("Invalid request: {}", e));
        }
    };

    let result = match request {
        Request::Login { token } => {
            if token.trim().is_empty() {
                Err("Token must not be empty".to_string())
            } else {
                session.token = Some(token);
                Ok(Reply::ok())
            }
        }
        Request::GetDrawings => return to_line(&state.snapshot(session.token.as_deref())),
        Request::AddDrawing(record) => session.owner().map(|owner| {
            let id = state.add(owner, record);
            info!("Drawing {} added", id);
            Reply::created(id)
        }),
        Request::UpdateDrawing(record) => session
            .owner()
            .and_then(|owner| state.update(owner, record))
            .map(|_| Reply::ok()),
        Request::DeleteDrawing { id } => session
            .owner()
            .and_then(|owner| state.delete(owner, &id))
            .map(|_| {
                info!("Drawing {} deleted", id);
                Reply::ok()
            }),
    };
    match result {
        Ok(reply) => to_line(&reply),
        Err(message) => error_line(message),
    }
}

/// Serve the line protocol on one connection until the peer hangs up.
async fn handle_connection(stream: TcpStream, state: Arc<AppState>) {
    let peer = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    info!("New connection: {}", peer);

    let mut lines = Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LEN));
    let mut session = Session::default();

    while let Some(frame) = lines.next().await {
        let response = match frame {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => handle_line(&state, &mut session, &line),
            Err(LinesCodecError::MaxLineLengthExceeded) => {
                warn!("Request from {} exceeds {} bytes", peer, MAX_LINE_LEN);
                let _ = lines.send(error_line("Request too long")).await;
                break;
            }
            Err(LinesCodecError::Io(e)) => {
                warn!("Read error for {}: {}", peer, e);
                break;
            }
        };
        if let Err(e) = lines.send(response).await {
            warn!("Write error for {}: {}", peer, e);
            break;
        }
    }
    info!("Connection closed: {}", peer);
}

/// Pause before the next accept: none for errors tied to a single peer,
/// a short one otherwise (e.g. out of file descriptors).
fn accept_retry_delay(error: &io::Error) -> Duration {
    match error.kind() {
        io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::Interrupted => Duration::ZERO,
        _ => Duration::from_millis(100),
    }
}

async fn serve_lines(listener: TcpListener, state: Arc<AppState>) {
    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                tokio::spawn(handle_connection(stream, state.clone()));
            }
            Err(e) => {
                warn!("Accept failed: {}", e);
                tokio::time::sleep(accept_retry_delay(&e)).await;
            }
        }
    }
}

fn http_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/drawings", get(list_drawings))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check
async fn health() -> &'static str {
    "ok"
}

/// Read-only snapshot of every drawing.
async fn list_drawings(State(state): State<Arc<AppState>>) -> Json<Vec<ShapeRecord>> {
    Json(state.snapshot(None))
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vectorpad_server=info,tower_http=info".into()),
        )
        .init();

    let state = Arc::new(AppState::new());

    let addr = env_or("VECTORPAD_ADDR", DEFAULT_ADDR);
    let http_addr = env_or("VECTORPAD_HTTP_ADDR", DEFAULT_HTTP_ADDR);

    let listener = TcpListener::bind(&addr).await?;
    let http_listener = TcpListener::bind(&http_addr).await?;
    info!("VectorPad drawing server listening on {}", addr);
    info!("HTTP endpoints on http://{}/health and /drawings", http_addr);

    tokio::spawn(serve_lines(listener, state.clone()));
    axum::serve(http_listener, http_router(state)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};

    fn line_record() -> ShapeRecord {
        serde_json::from_value(json!({
            "type": "line", "x": 1, "y": 2,
            "properties": {"x2": 3, "y2": 4, "lineColor": "red", "lineWidth": 2}
        }))
        .unwrap()
    }

    fn request(request: &Request) -> String {
        serde_json::to_string(request).unwrap()
    }

    fn parse(line: &str) -> Value {
        serde_json::from_str(line).unwrap()
    }

    fn login(state: &AppState, token: &str) -> Session {
        let mut session = Session::default();
        let reply = handle_line(
            state,
            &mut session,
            &request(&Request::Login {
                token: token.into(),
            }),
        );
        assert_eq!(parse(&reply)["status"], "ok");
        session
    }

    fn add(state: &AppState, session: &mut Session) -> String {
        let reply = parse(&handle_line(
            state,
            session,
            &request(&Request::AddDrawing(line_record())),
        ));
        reply["id"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_malformed_and_unknown_requests() {
        let state = AppState::new();
        let mut session = Session::default();
        for line in ["not json", r#"{"action":"dance"}"#, r#"{"data":{}}"#] {
            let reply = parse(&handle_line(&state, &mut session, line));
            assert_eq!(reply["status"], "error");
            assert!(reply["message"].as_str().unwrap().starts_with("Invalid request"));
        }
    }

    #[test]
    fn test_login_required_for_changes() {
        let state = AppState::new();
        let mut session = Session::default();
        let reply = parse(&handle_line(
            &state,
            &mut session,
            &request(&Request::AddDrawing(line_record())),
        ));
        assert_eq!(reply, json!({"status": "error", "message": "Login required"}));

        let empty = parse(&handle_line(
            &state,
            &mut session,
            &request(&Request::Login { token: " ".into() }),
        ));
        assert_eq!(empty["status"], "error");
    }

    #[test]
    fn test_ownership_is_per_session() {
        let state = AppState::new();
        let mut alice = login(&state, "alice");
        let mut bob = login(&state, "bob");
        let first = add(&state, &mut alice);
        let second = add(&state, &mut bob);

        let drawings = parse(&handle_line(
            &state,
            &mut alice,
            &request(&Request::GetDrawings),
        ));
        let drawings = drawings.as_array().unwrap();
        assert_eq!(drawings.len(), 2);
        assert_eq!(drawings[0]["id"], first.as_str());
        assert_eq!(drawings[0]["isOwner"], true);
        assert_eq!(drawings[1]["id"], second.as_str());
        assert!(drawings[1].get("isOwner").is_none());
    }

    #[test]
    fn test_update_and_delete_check_owner() {
        let state = AppState::new();
        let mut alice = login(&state, "alice");
        let mut bob = login(&state, "bob");
        let id = add(&state, &mut alice);

        let mut changed = line_record().with_id(id.clone());
        changed.x = 50;
        let update = request(&Request::UpdateDrawing(changed));
        assert_eq!(parse(&handle_line(&state, &mut bob, &update))["status"], "error");
        assert_eq!(parse(&handle_line(&state, &mut alice, &update))["status"], "ok");
        assert_eq!(state.snapshot(None)[0].x, 50);

        let delete = request(&Request::DeleteDrawing { id: id.clone() });
        let denied = parse(&handle_line(&state, &mut bob, &delete));
        assert!(denied["message"].as_str().unwrap().contains("another user"));
        assert_eq!(parse(&handle_line(&state, &mut alice, &delete))["status"], "ok");
        let missing = parse(&handle_line(&state, &mut alice, &delete));
        assert!(missing["message"].as_str().unwrap().contains("not found"));
        assert!(state.snapshot(None).is_empty());
    }

    #[test]
    fn test_update_requires_id() {
        let state = AppState::new();
        let mut alice = login(&state, "alice");
        let reply = parse(&handle_line(
            &state,
            &mut alice,
            &request(&Request::UpdateDrawing(line_record())),
        ));
        assert_eq!(reply["message"], "Drawing id is required");
    }

    #[tokio::test]
    async fn test_line_protocol_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(AppState::new());
        tokio::spawn(serve_lines(listener, state.clone()));

        let stream = TcpStream::connect(addr).await.unwrap();
        let (reader, mut writer) = stream.into_split();
        let mut lines = BufReader::new(reader).lines();

        let requests = [
            request(&Request::Login {
                token: "t".into(),
            }),
            request(&Request::AddDrawing(line_record())),
            request(&Request::GetDrawings),
        ];
        let mut replies = Vec::new();
        for line in requests {
            writer.write_all(format!("{}\n", line).as_bytes()).await.unwrap();
            replies.push(parse(&lines.next_line().await.unwrap().unwrap()));
        }
        assert_eq!(replies[0]["status"], "ok");
        assert_eq!(replies[1]["status"], "ok");
        assert_eq!(replies[2][0]["isOwner"], true);
        assert_eq!(replies[2][0]["properties"]["lineColor"], "red");
        assert_eq!(state.drawings.len(), 1);
    }

    #[tokio::test]
    async fn test_oversized_line_closes_connection() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve_lines(listener, Arc::new(AppState::new())));

        let stream = TcpStream::connect(addr).await.unwrap();
        let (reader, mut writer) = stream.into_split();
        let mut lines = BufReader::new(reader).lines();

        let huge = "x".repeat(MAX_LINE_LEN + 1);
        writer.write_all(huge.as_bytes()).await.unwrap();

        let rejected = parse(&lines.next_line().await.unwrap().unwrap());
        assert_eq!(rejected, json!({"status": "error", "message": "Request too long"}));
        assert!(lines.next_line().await.unwrap_or(None).is_none());
    }

    #[tokio::test]
    async fn test_listener_keeps_serving_after_peer_drops() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve_lines(listener, Arc::new(AppState::new())));

        drop(TcpStream::connect(addr).await.unwrap());
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(b"{\"action\":\"getDrawings\"}\n").await.unwrap();
        let mut lines = BufReader::new(stream).lines();
        assert_eq!(lines.next_line().await.unwrap().unwrap(), "[]");
    }

    #[test]
    fn test_accept_retry_delay() {
        let reset = io::Error::from(io::ErrorKind::ConnectionReset);
        assert_eq!(accept_retry_delay(&reset), Duration::ZERO);
        let exhausted = io::Error::other("too many open files");
        assert_eq!(accept_retry_delay(&exhausted), Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_http_endpoints() {
        let state = Arc::new(AppState::new());
        state.add("someone", line_record());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = http_router(state);
        tokio::spawn(async move { axum::serve(listener, app).await });

        for (path, expected) in [("/health", "ok"), ("/drawings", "\"lineColor\":\"red\"")] {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            let request = format!(
                "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
                path
            );
            stream.write_all(request.as_bytes()).await.unwrap();
            let mut response = String::new();
            stream.read_to_string(&mut response).await.unwrap();
            assert!(response.starts_with("HTTP/1.1 200"), "{}", response);
            assert!(response.contains(expected), "{}", response);
        }
    }
}
