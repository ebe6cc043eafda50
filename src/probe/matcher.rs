//! Response matchers
//!
//! A matcher decides whether a received message satisfies a pending
//! wait. Backends emit status pings and unrelated message types over
//! the same connection, so the wait is decoupled from what was sent.

#![allow(dead_code)]

use crate::models::InboundMessage;

/// Predicate over a parsed inbound message
#[derive(Clone, Debug)]
pub enum Matcher {
    /// Any inbound message satisfies the wait
    Any,
    /// The type tag equals the given value
    Type(String),
    /// A top-level field is present. The sought field may arrive
    /// after unrelated frames; every frame is inspected until the
    /// deadline.
    HasField(String),
    /// Escape hatch for scenario-specific conditions
    Predicate(fn(&InboundMessage) -> bool),
}

impl Matcher {
    pub fn msg_type(tag: impl Into<String>) -> Self {
        Matcher::Type(tag.into())
    }

    pub fn has_field(name: impl Into<String>) -> Self {
        Matcher::HasField(name.into())
    }

    /// Matcher for any message carrying a session identifier
    pub fn session_bearing() -> Self {
        Matcher::HasField("session_id".to_string())
    }

    pub fn matches(&self, msg: &InboundMessage) -> bool {
        match self {
            Matcher::Any => true,
            Matcher::Type(tag) => msg.msg_type() == Some(tag.as_str()),
            Matcher::HasField(name) => msg.field(name).is_some(),
            Matcher::Predicate(predicate) => predicate(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inbound(text: &str) -> InboundMessage {
        InboundMessage::parse(text).unwrap()
    }

    #[test]
    fn any_matches_everything() {
        assert!(Matcher::Any.matches(&inbound("{}")));
        assert!(Matcher::Any.matches(&inbound(r#"{"type":"pong"}"#)));
    }

    #[test]
    fn type_matcher() {
        let matcher = Matcher::msg_type("quote_ready");
        assert!(matcher.matches(&inbound(r#"{"type":"quote_ready"}"#)));
        assert!(!matcher.matches(&inbound(r#"{"type":"error"}"#)));
        assert!(!matcher.matches(&inbound("{}")));
    }

    #[test]
    fn has_field_matcher() {
        let matcher = Matcher::session_bearing();
        assert!(matcher.matches(&inbound(r#"{"type":"pong","session_id":"s1"}"#)));
        assert!(matcher.matches(&inbound(r#"{"session_id":"s1"}"#)));
        assert!(!matcher.matches(&inbound(r#"{"type":"pong"}"#)));
    }

    #[test]
    fn predicate_matcher() {
        let matcher = Matcher::Predicate(|msg| {
            msg.all_options().map(|o| !o.is_empty()).unwrap_or(false)
        });
        assert!(matcher.matches(&inbound(
            r#"{"type":"quote_ready","payload":{"all_options":[{}]}}"#
        )));
        assert!(!matcher.matches(&inbound(
            r#"{"type":"quote_ready","payload":{"all_options":[]}}"#
        )));
    }
}
