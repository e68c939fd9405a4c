//! WebSocket transport implementation using `tokio-tungstenite`.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{Mutex, watch};
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;

use crate::{Connection, ConnectionId, Transport, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

type WsStream = WebSocketStream<TcpStream>;

fn io_error(kind: std::io::ErrorKind, e: impl std::error::Error + Send + Sync + 'static) -> std::io::Error {
    std::io::Error::new(kind, e)
}

/// Resolves once the shutdown flag is set.
async fn stopped(mut rx: watch::Receiver<bool>) {
    loop {
        let stopped = *rx.borrow_and_update();
        if stopped {
            return;
        }
        if rx.changed().await.is_err() {
            // Sender gone without a shutdown: never resolve.
            std::future::pending::<()>().await;
        }
    }
}

/// A WebSocket-based [`Transport`] that listens for incoming connections.
pub struct WebSocketTransport {
    listener: TcpListener,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl WebSocketTransport {
    /// Binds a new WebSocket transport to the given address.
    ///
    /// # Errors
    /// [`TransportError::AcceptFailed`] if the address cannot be bound.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::AcceptFailed)?;
        tracing::info!(addr, "WebSocket transport listening");
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Ok(Self {
            listener,
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// The address actually bound (useful after binding port 0).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    async fn upgrade(&self) -> Result<WebSocketConnection, TransportError> {
        let (stream, addr) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::AcceptFailed)?;

        let ws = tokio_tungstenite::accept_async(stream)
            .await
            .map_err(|e| {
                TransportError::AcceptFailed(io_error(
                    std::io::ErrorKind::ConnectionRefused,
                    e,
                ))
            })?;

        let id = ConnectionId::new(
            NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed),
        );
        tracing::debug!(%id, %addr, "accepted WebSocket connection");

        let (sink, source) = ws.split();
        Ok(WebSocketConnection {
            id,
            sink: Mutex::new(sink),
            source: Mutex::new(source),
        })
    }
}

impl Transport for WebSocketTransport {
    type Connection = WebSocketConnection;
    type Error = TransportError;

    async fn accept(&mut self) -> Result<Self::Connection, Self::Error> {
        tokio::select! {
            biased;
            () = stopped(self.shutdown_rx.clone()) => Err(TransportError::Shutdown),
            conn = self.upgrade() => conn,
        }
    }

    async fn shutdown(&self) -> Result<(), Self::Error> {
        self.shutdown_tx.send_replace(true);
        tracing::info!("WebSocket transport shut down");
        Ok(())
    }
}

/// A single WebSocket connection.
///
/// The socket is split so that the read half and the write half are locked
/// independently: a reader parked in [`recv`](Connection::recv) never
/// blocks a writer.
pub struct WebSocketConnection {
    id: ConnectionId,
    sink: Mutex<SplitSink<WsStream, Message>>,
    source: Mutex<SplitStream<WsStream>>,
}

impl Connection for WebSocketConnection {
    type Error = TransportError;

    /// UTF-8 payloads go out as text frames, anything else as binary.
    async fn send(&self, data: &[u8]) -> Result<(), Self::Error> {
        let msg = match std::str::from_utf8(data) {
            Ok(text) => Message::Text(text.into()),
            Err(_) => Message::Binary(data.to_vec().into()),
        };
        self.sink.lock().await.send(msg).await.map_err(|e| {
            TransportError::SendFailed(io_error(std::io::ErrorKind::BrokenPipe, e))
        })
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error> {
        let mut source = self.source.lock().await;
        loop {
            match source.next().await {
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(text.as_bytes().to_vec()));
                }
                Some(Ok(Message::Binary(data))) => return Ok(Some(data.into())),
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // ping/pong/raw frame
                Some(Err(e)) => {
                    return Err(TransportError::ReceiveFailed(io_error(
                        std::io::ErrorKind::ConnectionReset,
                        e,
                    )));
                }
            }
        }
    }

    async fn close(&self) -> Result<(), Self::Error> {
        self.sink.lock().await.close().await.map_err(|e| {
            TransportError::SendFailed(io_error(std::io::ErrorKind::BrokenPipe, e))
        })
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
