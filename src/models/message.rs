//! Wire message models
//!
//! Outbound messages carry a closed payload union keyed by the type
//! tag; inbound messages are parsed copies of arbitrary server JSON.

#![allow(dead_code)]

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Outbound message tags understood by the backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Ping,
    RateRequest,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Ping => "ping",
            MessageType::RateRequest => "rate_request",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parcel dimensions in inches
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }
}

/// Closed payload union; the variant is fixed by the message type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Ping {
        message: String,
    },
    RateRequest {
        from_zip: String,
        to_zip: String,
        weight_lbs: f64,
        dimensions: Dimensions,
    },
}

/// Outbound wire entity
///
/// Serialized as text with the field names the backend expects
/// (`requestId` in camelCase, epoch-millis timestamp). Constructors
/// keep the type tag and payload variant consistent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub msg_type: MessageType,
    pub payload: Payload,
    pub timestamp: i64,
    #[serde(rename = "requestId")]
    pub request_id: String,
}

impl Message {
    fn stamped(msg_type: MessageType, payload: Payload) -> Self {
        Self {
            msg_type,
            payload,
            timestamp: Utc::now().timestamp_millis(),
            request_id: format!("test-{}", Uuid::new_v4()),
        }
    }

    /// Ping message carrying a short text
    pub fn ping(text: impl Into<String>) -> Self {
        Self::stamped(
            MessageType::Ping,
            Payload::Ping {
                message: text.into(),
            },
        )
    }

    /// Shipping rate request for a parcel
    pub fn rate_request(
        from_zip: impl Into<String>,
        to_zip: impl Into<String>,
        weight_lbs: f64,
        dimensions: Dimensions,
    ) -> Self {
        Self::stamped(
            MessageType::RateRequest,
            Payload::RateRequest {
                from_zip: from_zip.into(),
                to_zip: to_zip.into(),
                weight_lbs,
                dimensions,
            },
        )
    }

    /// Serialize to the text wire format
    pub fn to_wire(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Parsed copy of a received message; never mutated
#[derive(Clone, Debug, PartialEq)]
pub struct InboundMessage {
    raw: Value,
}

impl InboundMessage {
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        Ok(Self {
            raw: serde_json::from_str(text)?,
        })
    }

    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// Type tag, when present
    pub fn msg_type(&self) -> Option<&str> {
        self.raw.get("type").and_then(Value::as_str)
    }

    /// Session identifier the backend embeds in some messages
    pub fn session_id(&self) -> Option<&str> {
        self.raw.get("session_id").and_then(Value::as_str)
    }

    /// Request id echoed by the backend, when present
    pub fn request_id(&self) -> Option<&str> {
        self.raw.get("requestId").and_then(Value::as_str)
    }

    pub fn payload(&self) -> Option<&Value> {
        self.raw.get("payload")
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.raw.get(name)
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Shipping options from a quote_ready payload
    pub fn all_options(&self) -> Option<&Vec<Value>> {
        self.payload()?.get("all_options")?.as_array()
    }

    /// Validate the shapes of recognized tags before matching
    ///
    /// Unknown tags pass through untouched; the backend is free to
    /// emit message kinds the harness does not know about.
    pub fn validate_shape(&self) -> Result<(), String> {
        match self.msg_type() {
            Some("quote_ready") => {
                if self.all_options().is_none() {
                    return Err("quote_ready without payload.all_options array".to_string());
                }
                Ok(())
            }
            Some("error") => {
                let has_message = self
                    .payload()
                    .and_then(|p| p.get("message"))
                    .and_then(Value::as_str)
                    .is_some();
                if !has_message {
                    return Err("error without payload.message".to_string());
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
