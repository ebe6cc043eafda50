//! Data models for the harness

mod message;
mod outcome;
mod scenario;

pub use message::{Dimensions, InboundMessage, Message, MessageType, Payload};
pub use outcome::{InvalidOutcome, ResultLedger, Summary, TestOutcome};
pub use scenario::Scenario;
