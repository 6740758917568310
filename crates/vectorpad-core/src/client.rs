//! Drawing server client.
//!
//! The socket lives on a background thread so pointer handling never waits
//! on the network. Requests go in over a command channel; every request line
//! gets exactly one response line, delivered back as a [`ClientEvent`] that
//! the interaction loop drains with [`DrawingClient::poll_events`].

use crate::config::ClientConfig;
use crate::wire::{Reply, Request, ShapeRecord, WireError, decode_records};
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::{self, JoinHandle};
use thiserror::Error;

/// Errors that can occur while talking to the drawing server.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Wire(#[from] WireError),
    #[error("invalid server address: {0}")]
    Address(String),
    #[error("not connected")]
    NotConnected,
    #[error("already connected")]
    AlreadyConnected,
    #[error("server closed the connection")]
    Closed,
    #[error("server error: {0}")]
    Server(String),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    /// The last connect or request failed.
    Failed,
}

/// Events from the client worker
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    Connected,
    Disconnected,
    LoggedIn(Reply),
    /// Every drawing on the server, with `is_owner` set for this session's.
    Drawings(Vec<ShapeRecord>),
    Added(Reply),
    Updated(Reply),
    Deleted(Reply),
    /// The server answered with an error reply; the connection stays up.
    Rejected {
        action: &'static str,
        message: String,
    },
    Error { message: String },
}

enum Command {
    Send(Request),
    Close,
}

/// Client for the line-delimited drawing protocol.
pub struct DrawingClient {
    state: ConnectionState,
    cmd_tx: Option<Sender<Command>>,
    event_rx: Option<Receiver<ClientEvent>>,
    _thread: Option<JoinHandle<()>>,
}

impl DrawingClient {
    pub fn new() -> Self {
        Self {
            state: ConnectionState::Disconnected,
            cmd_tx: None,
            event_rx: None,
            _thread: None,
        }
    }

    /// Start the worker and connect in the background. Requests issued
    /// before the connection completes are queued.
    pub fn connect(&mut self, config: &ClientConfig) -> ClientResult<()> {
        if self.cmd_tx.is_some() && self.state != ConnectionState::Failed {
            return Err(ClientError::AlreadyConnected);
        }
        if config.address.trim().is_empty() {
            return Err(ClientError::Address(config.address.clone()));
        }

        self.state = ConnectionState::Connecting;
        let (cmd_tx, cmd_rx) = channel::<Command>();
        let (event_tx, event_rx) = channel::<ClientEvent>();
        let config = config.clone();

        let handle = thread::spawn(move || {
            log::info!("Drawing client: connecting to {}", config.address);
            let stream = match open_stream(&config) {
                Ok(stream) => stream,
                Err(e) => {
                    log::error!("Drawing server connection failed: {}", e);
                    let _ = event_tx.send(ClientEvent::Error {
                        message: format!("Connection failed: {}", e),
                    });
                    return;
                }
            };
            let _ = event_tx.send(ClientEvent::Connected);
            run_worker(stream, &cmd_rx, &event_tx);
            log::info!("Drawing client thread exiting");
        });

        self.cmd_tx = Some(cmd_tx);
        self.event_rx = Some(event_rx);
        self._thread = Some(handle);
        Ok(())
    }

    pub fn login(&self, token: impl Into<String>) -> ClientResult<()> {
        self.send(Request::Login {
            token: token.into(),
        })
    }

    pub fn fetch_drawings(&self) -> ClientResult<()> {
        self.send(Request::GetDrawings)
    }

    pub fn add_drawing(&self, record: ShapeRecord) -> ClientResult<()> {
        self.send(Request::AddDrawing(record))
    }

    pub fn update_drawing(&self, record: ShapeRecord) -> ClientResult<()> {
        self.send(Request::UpdateDrawing(record))
    }

    pub fn delete_drawing(&self, id: impl Into<String>) -> ClientResult<()> {
        self.send(Request::DeleteDrawing { id: id.into() })
    }

    /// Queue any request built elsewhere, such as by the canvas controller.
    pub fn send(&self, request: Request) -> ClientResult<()> {
        let tx = self.cmd_tx.as_ref().ok_or(ClientError::NotConnected)?;
        tx.send(Command::Send(request))
            .map_err(|_| ClientError::NotConnected)
    }

    pub fn disconnect(&mut self) {
        if let Some(tx) = self.cmd_tx.take() {
            let _ = tx.send(Command::Close);
        }
        self.event_rx = None;
        self._thread = None;
        self.state = ConnectionState::Disconnected;
    }

    /// Poll for pending events (non-blocking).
    pub fn poll_events(&mut self) -> Vec<ClientEvent> {
        let Some(rx) = &self.event_rx else {
            return Vec::new();
        };
        let events: Vec<ClientEvent> = rx.try_iter().collect();
        for event in &events {
            match event {
                ClientEvent::Connected => self.state = ConnectionState::Connected,
                ClientEvent::Disconnected => self.state = ConnectionState::Disconnected,
                ClientEvent::Error { .. } => self.state = ConnectionState::Failed,
                _ => {}
            }
        }
        events
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }
}

impl Default for DrawingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DrawingClient {
    fn drop(&mut self) {
        self.disconnect();
    }
}

fn open_stream(config: &ClientConfig) -> ClientResult<TcpStream> {
    let addr = config
        .address
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| ClientError::Address(config.address.clone()))?;
    let stream = TcpStream::connect_timeout(&addr, config.connect_timeout())?;
    stream.set_read_timeout(Some(config.read_timeout()))?;
    stream.set_write_timeout(Some(config.write_timeout()))?;
    Ok(stream)
}

fn run_worker(stream: TcpStream, cmd_rx: &Receiver<Command>, event_tx: &Sender<ClientEvent>) {
    let mut writer = match stream.try_clone() {
        Ok(writer) => writer,
        Err(e) => {
            let _ = event_tx.send(ClientEvent::Error {
                message: e.to_string(),
            });
            return;
        }
    };
    let mut reader = BufReader::new(stream);

    // Blocks until a command arrives; ends when the client is dropped.
    for command in cmd_rx.iter() {
        let request = match command {
            Command::Send(request) => request,
            Command::Close => {
                log::info!("Drawing client close requested");
                return;
            }
        };
        match round_trip(&mut writer, &mut reader, &request) {
            Ok(event) => {
                let _ = event_tx.send(event);
            }
            Err(ClientError::Closed) => {
                log::info!("Drawing server closed the connection");
                let _ = event_tx.send(ClientEvent::Disconnected);
                return;
            }
            Err(ClientError::Io(e)) => {
                log::error!("Drawing client {} failed: {}", request.action(), e);
                let _ = event_tx.send(ClientEvent::Error {
                    message: format!("{} failed: {}", request.action(), e),
                });
                return;
            }
            Err(ClientError::Server(message)) => {
                log::warn!("Drawing client {} rejected: {}", request.action(), message);
                let _ = event_tx.send(ClientEvent::Rejected {
                    action: request.action(),
                    message,
                });
            }
            Err(e) => {
                log::warn!("Drawing client {} failed: {}", request.action(), e);
                let _ = event_tx.send(ClientEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    }
}

/// Write one request line and turn the single response line into an event.
fn round_trip(
    writer: &mut TcpStream,
    reader: &mut BufReader<TcpStream>,
    request: &Request,
) -> ClientResult<ClientEvent> {
    let mut line = request.to_line()?;
    log::debug!("Drawing client sending: {}", preview(&line));
    line.push('\n');
    writer.write_all(line.as_bytes())?;
    writer.flush()?;

    let mut response = String::new();
    if reader.read_line(&mut response)? == 0 {
        return Err(ClientError::Closed);
    }
    let response = response.trim_end();
    log::debug!("Drawing client received: {}", preview(response));

    if let Request::GetDrawings = request {
        return match decode_records(response) {
            Ok(records) => Ok(ClientEvent::Drawings(records)),
            // The server answers a failed fetch with an error reply instead of an array.
            Err(WireError::NotAnArray) => Err(server_error(parse_reply(response)?)),
            Err(e) => Err(e.into()),
        };
    }

    let reply = parse_reply(response)?;
    if !reply.is_ok() {
        return Err(server_error(reply));
    }
    Ok(match request {
        Request::Login { .. } => ClientEvent::LoggedIn(reply),
        Request::AddDrawing(_) => ClientEvent::Added(reply),
        Request::UpdateDrawing(_) => ClientEvent::Updated(reply),
        Request::DeleteDrawing { .. } | Request::GetDrawings => ClientEvent::Deleted(reply),
    })
}

/// At most the first 100 characters of a protocol line, for logging.
fn preview(line: &str) -> &str {
    line.char_indices()
        .nth(100)
        .map_or(line, |(end, _)| &line[..end])
}

fn parse_reply(line: &str) -> ClientResult<Reply> {
    serde_json::from_str(line).map_err(|e| ClientError::Wire(WireError::Json(e)))
}

fn server_error(reply: Reply) -> ClientError {
    ClientError::Server(reply.message.unwrap_or(reply.status))
}
