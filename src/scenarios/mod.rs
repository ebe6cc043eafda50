//! Integration scenarios
//!
//! Each scenario is a self-contained check producing one or more
//! outcomes. Transport scenarios drive the backend through the probe;
//! UI scenarios drive the surface through the observation adapter.

mod connection;
mod rates;
mod sound;

use anyhow::Result;

use crate::models::{ResultLedger, Scenario};
use crate::runner::ScenarioContext;

/// Run a single scenario, recording outcomes into the ledger
pub async fn run_scenario(
    scenario: Scenario,
    ctx: &ScenarioContext,
    ledger: &mut ResultLedger,
) -> Result<()> {
    match scenario {
        Scenario::ConnectionCheck => connection::connection_check(ctx, ledger).await,
        Scenario::RateQuote => rates::rate_quote(ctx, ledger).await,
        Scenario::SessionContinuity => connection::session_continuity(ctx, ledger).await,
        Scenario::SoundHooks => sound::sound_hooks(ctx, ledger).await,
        Scenario::SoundToggle => sound::sound_toggle(ctx, ledger).await,
        Scenario::AccordionSound => sound::accordion_sound(ctx, ledger).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{SinkExt, StreamExt};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio_tungstenite::accept_hdr_async;
    use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
    use tokio_tungstenite::tungstenite::Message as WsMessage;
    use uuid::Uuid;

    async fn spawn_token_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    let _ = stream.read(&mut buf).await;
                    let body = r#"{"test_token":"tok-harness"}"#;
                    let response = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                });
            }
        });

        format!("http://{addr}")
    }

    fn session_from_query(query: &str) -> Option<String> {
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix("session_id=").map(str::to_string))
    }

    /// Backend double: answers ping with a session-bearing pong and
    /// rate_request with a status frame followed by quote_ready
    async fn spawn_ws_backend() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut query: Option<String> = None;
                    let callback =
                        |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
                            query = req.uri().query().map(|q| q.to_string());
                            Ok(resp)
                        };
                    let mut ws = accept_hdr_async(stream, callback).await.unwrap();

                    let session_id = query
                        .as_deref()
                        .and_then(session_from_query)
                        .unwrap_or_else(|| format!("sess-{}", Uuid::new_v4()));

                    while let Some(Ok(frame)) = ws.next().await {
                        let WsMessage::Text(text) = frame else { continue };
                        let Ok(value) = serde_json::from_str::<Value>(text.as_str()) else {
                            continue;
                        };
                        let request_id = value.get("requestId").cloned().unwrap_or(Value::Null);

                        match value.get("type").and_then(Value::as_str) {
                            Some("ping") => {
                                let reply = json!({
                                    "type": "pong",
                                    "session_id": session_id,
                                    "requestId": request_id,
                                });
                                if ws.send(WsMessage::Text(reply.to_string().into())).await.is_err()
                                {
                                    break;
                                }
                            }
                            Some("rate_request") => {
                                let status = json!({
                                    "type": "status",
                                    "message": "fetching rates",
                                });
                                let quote = json!({
                                    "type": "quote_ready",
                                    "session_id": session_id,
                                    "requestId": request_id,
                                    "payload": {
                                        "all_options": [
                                            {"carrier": "usps", "service": "Priority", "price": 12.4},
                                            {"carrier": "ups", "service": "Ground", "price": 9.8},
                                        ],
                                    },
                                });
                                if ws
                                    .send(WsMessage::Text(status.to_string().into()))
                                    .await
                                    .is_err()
                                {
                                    break;
                                }
                                if ws.send(WsMessage::Text(quote.to_string().into())).await.is_err()
                                {
                                    break;
                                }
                            }
                            _ => {}
                        }
                    }
                });
            }
        });

        format!("ws://{addr}/ws")
    }

    async fn backend_context() -> ScenarioContext {
        let api_url = spawn_token_server().await;
        let ws_url = spawn_ws_backend().await;
        ScenarioContext::new(api_url, ws_url).with_timeout(Duration::from_secs(2))
    }

    #[tokio::test]
    async fn connection_check_round_trip() {
        let ctx = backend_context().await;
        let mut ledger = ResultLedger::new();

        run_scenario(Scenario::ConnectionCheck, &ctx, &mut ledger)
            .await
            .unwrap();

        let summary = ledger.summary();
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 0);
        assert_eq!(ledger.outcomes()[0].name, "WebSocket Connection");
        assert_eq!(ledger.outcomes()[1].name, "WebSocket Message");
    }

    #[tokio::test]
    async fn rate_quote_reports_options() {
        let ctx = backend_context().await;
        let mut ledger = ResultLedger::new();

        run_scenario(Scenario::RateQuote, &ctx, &mut ledger)
            .await
            .unwrap();

        let summary = ledger.summary();
        assert_eq!(summary.passed, 3);
        assert_eq!(summary.failed, 0);

        let options = &ledger.outcomes()[2];
        assert_eq!(options.name, "Shipping Options");
        assert!(options.message.contains("2 shipping options"));
    }

    #[tokio::test]
    async fn session_continuity_verifies_identical_id() {
        let ctx = backend_context().await;
        let mut ledger = ResultLedger::new();

        run_scenario(Scenario::SessionContinuity, &ctx, &mut ledger)
            .await
            .unwrap();

        let names: Vec<_> = ledger.outcomes().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "First Connection",
                "Session ID",
                "Second Connection",
                "Session Verification"
            ]
        );
        assert!(ledger.summary().is_all_passed());
    }

    #[tokio::test]
    async fn credential_failure_is_one_failed_outcome() {
        let ws_url = spawn_ws_backend().await;
        let ctx = ScenarioContext::new("http://127.0.0.1:1", ws_url)
            .with_timeout(Duration::from_millis(500));
        let mut ledger = ResultLedger::new();

        run_scenario(Scenario::ConnectionCheck, &ctx, &mut ledger)
            .await
            .unwrap();

        let summary = ledger.summary();
        assert_eq!(summary.passed, 0);
        assert_eq!(summary.failed, 1);
        assert!(ledger.outcomes()[0].message.contains("test token"));
    }
}
