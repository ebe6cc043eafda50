//! Connection lifecycle
//!
//! One probe owns one connection; there is no pooling and no reuse.
//! The `&mut` receiver on `send_and_await` keeps at most one wait
//! outstanding per connection.

use futures::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};
use url::Url;

use super::credential::fetch_test_token;
use super::{Matcher, ProbeError};
use crate::models::{InboundMessage, Message};

/// Factory for connections against one endpoint pair
pub struct Probe {
    http: reqwest::Client,
    api_url: String,
    ws_url: String,
}

impl Probe {
    pub fn new(api_url: impl Into<String>, ws_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {e}"))?;

        Ok(Self {
            http,
            api_url: api_url.into(),
            ws_url: ws_url.into(),
        })
    }

    /// Fetch a short-lived authorization token from the companion
    /// HTTP endpoint
    pub async fn acquire_credential(&self) -> Result<String, ProbeError> {
        fetch_test_token(&self.http, &self.api_url).await
    }

    /// Open a connection, resolving only after the handshake
    /// completes
    ///
    /// The token and, when present, the session id are appended as
    /// query parameters. The returned handle is exclusively owned by
    /// the caller.
    pub async fn connect(
        &self,
        token: &str,
        session_id: Option<&str>,
    ) -> Result<Connection, ProbeError> {
        let url = self.build_endpoint(token, session_id)?;
        info!("Connecting to {}", self.ws_url);

        let (ws, _) = connect_async(url.as_str())
            .await
            .map_err(|e| ProbeError::Transport(e.to_string()))?;
        debug!("Connection open");

        Ok(Connection { ws, open: true })
    }

    fn build_endpoint(&self, token: &str, session_id: Option<&str>) -> Result<Url, ProbeError> {
        let mut url = Url::parse(&self.ws_url)
            .map_err(|e| ProbeError::InvalidUrl(format!("{}: {e}", self.ws_url)))?;
        url.query_pairs_mut().append_pair("token", token);
        if let Some(id) = session_id {
            url.query_pairs_mut().append_pair("session_id", id);
        }
        Ok(url)
    }
}

/// An open connection, exclusively owned for its lifetime
pub struct Connection {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    open: bool,
}

impl Connection {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Transmit a message, then suspend until a received message
    /// satisfies the matcher or the timeout elapses
    ///
    /// Non-matching frames are logged and skipped; frames whose
    /// recognized tag fails shape validation are skipped with a
    /// warning. Transport failure during the wait surfaces as
    /// `Transport` with the underlying reason.
    pub async fn send_and_await(
        &mut self,
        message: &Message,
        matcher: &Matcher,
        timeout: Duration,
    ) -> Result<InboundMessage, ProbeError> {
        if !self.open {
            return Err(ProbeError::Transport("connection is closed".to_string()));
        }

        let wire = message
            .to_wire()
            .map_err(|e| ProbeError::Transport(e.to_string()))?;
        debug!("-> {} ({})", message.msg_type, message.request_id);

        self.ws
            .send(WsMessage::Text(wire.into()))
            .await
            .map_err(|e| {
                self.open = false;
                ProbeError::Transport(e.to_string())
            })?;

        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let frame = match tokio::time::timeout_at(deadline, self.ws.next()).await {
                Err(_) => return Err(ProbeError::ResponseTimeout(timeout.as_millis() as u64)),
                Ok(None) => {
                    self.open = false;
                    return Err(ProbeError::Transport(
                        "connection closed by server".to_string(),
                    ));
                }
                Ok(Some(Err(e))) => {
                    self.open = false;
                    return Err(ProbeError::Transport(e.to_string()));
                }
                Ok(Some(Ok(frame))) => frame,
            };

            match frame {
                WsMessage::Text(text) => {
                    let inbound = match InboundMessage::parse(text.as_str()) {
                        Ok(msg) => msg,
                        Err(e) => {
                            debug!("Skipping unparseable frame: {e}");
                            continue;
                        }
                    };

                    if let Err(reason) = inbound.validate_shape() {
                        warn!(
                            "Skipping malformed {} frame: {reason}",
                            inbound.msg_type().unwrap_or("untagged")
                        );
                        continue;
                    }

                    if matcher.matches(&inbound) {
                        debug!("<- {} matched", inbound.msg_type().unwrap_or("untagged"));
                        return Ok(inbound);
                    }
                    debug!(
                        "<- {} ignored by matcher",
                        inbound.msg_type().unwrap_or("untagged")
                    );
                }
                WsMessage::Close(_) => {
                    self.open = false;
                    return Err(ProbeError::Transport(
                        "connection closed by server".to_string(),
                    ));
                }
                // Binary frames are not part of the protocol;
                // ping/pong are answered by the library.
                _ => {}
            }
        }
    }

    /// Release the connection; idempotent and safe after an error
    pub async fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        if let Err(e) = self.ws.close(None).await {
            debug!("Close: {e}");
        }
    }
}
