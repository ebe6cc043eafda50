//! Shipping rate scenario
//!
//! Scenario 2: rate_request round trip ending in a quote_ready with
//! at least one shipping option.

use anyhow::Result;
use serde_json::Value;

use crate::models::{Dimensions, InboundMessage, Message, ResultLedger, TestOutcome};
use crate::probe::Matcher;
use crate::runner::ScenarioContext;

fn quote_or_error(msg: &InboundMessage) -> bool {
    matches!(msg.msg_type(), Some("quote_ready") | Some("error"))
}

/// Scenario 2: request quotes for a known parcel and check the
/// options list
pub async fn rate_quote(ctx: &ScenarioContext, ledger: &mut ResultLedger) -> Result<()> {
    let probe = ctx.probe()?;

    let token = match probe.acquire_credential().await {
        Ok(token) => token,
        Err(e) => {
            ledger.record(TestOutcome::fail(
                "Rate Request Connection",
                format!("Failed to get test token: {e}"),
            )?);
            return Ok(());
        }
    };

    let mut conn = match probe.connect(&token, None).await {
        Ok(conn) => conn,
        Err(e) => {
            ledger.record(TestOutcome::fail(
                "Rate Request Connection",
                format!("Error connecting to server: {e}"),
            )?);
            return Ok(());
        }
    };
    ledger.record(TestOutcome::pass(
        "Rate Request Connection",
        "Successfully connected to server",
    )?);

    let request = Message::rate_request("90210", "10001", 5.0, Dimensions::new(12.0, 8.0, 6.0));

    // Status pings may precede the quote; only quote_ready or error
    // settles the wait.
    match conn
        .send_and_await(&request, &Matcher::Predicate(quote_or_error), ctx.timeout)
        .await
    {
        Ok(reply) if reply.msg_type() == Some("quote_ready") => {
            ledger.record(TestOutcome::pass(
                "Quote Ready",
                "Received quote_ready response",
            )?);

            match reply.all_options() {
                Some(options) if !options.is_empty() => {
                    ledger.record(TestOutcome::pass(
                        "Shipping Options",
                        format!("Received {} shipping options", options.len()),
                    )?);
                }
                _ => {
                    ledger.record(TestOutcome::fail(
                        "Shipping Options",
                        "No shipping options in response",
                    )?);
                }
            }
        }
        Ok(reply) => {
            let reason = reply
                .payload()
                .and_then(|p| p.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            ledger.record(TestOutcome::fail(
                "Quote Ready",
                format!("Received error: {reason}"),
            )?);
        }
        Err(e) => {
            ledger.record(TestOutcome::fail("Quote Ready", e.to_string())?);
        }
    }

    conn.close().await;
    Ok(())
}
